//! Experiment orchestration
//!
//! Runs advancement schemes over a cross product of grid spacings and
//! durations, persisting each resulting field and handing it to an observer.
//!
//! # Example
//!
//! ```rust,no_run
//! use level_set_core::{CsvFieldStore, ExperimentConfig, ExperimentRunner, TracingObserver};
//!
//! let store = CsvFieldStore::new("out");
//! let mut runner = ExperimentRunner::new(ExperimentConfig::default(), store, TracingObserver);
//! let records = runner.run("circle_grid.csv")?;
//! println!("{} fields written", records.len());
//! # Ok::<(), level_set_core::LevelSetError>(())
//! ```

mod config;
mod observer;
mod runner;
mod store;

pub use config::ExperimentConfig;
pub use observer::{FieldObserver, TracingObserver};
pub use runner::{artifact_name, ExperimentKind, ExperimentRecord, ExperimentRunner};
pub use store::{CsvFieldStore, FieldStore};
