//! Grid persistence
//!
//! Fields are stored as dense comma-separated text: one row per index along
//! the first axis, one column per index along the second axis, no header.

mod csv_grid;

pub use csv_grid::{load_csv, read_grid, save_csv, write_grid};
