//! Signed-distance grid construction and geometric probing

pub mod probe;
pub mod sdf_grid;

// Re-export main types
pub use probe::SurfaceProbe;
pub use sdf_grid::SdfGrid;
