//! Result observation seam
//!
//! Plotting lives outside this crate. Observers receive every persisted field
//! together with a human-readable title.

use crate::error::Result;
use crate::solver::FieldData;
use tracing::info;

/// Receives every field produced by an experiment
pub trait FieldObserver {
    /// Called once per persisted field
    ///
    /// # Errors
    ///
    /// An error aborts the experiment.
    fn observe(&mut self, title: &str, field: &FieldData) -> Result<()>;
}

/// Logs a summary of each field
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FieldObserver for TracingObserver {
    fn observe(&mut self, title: &str, field: &FieldData) -> Result<()> {
        let summary = field.summary();
        info!(
            title,
            min = summary.min,
            max = summary.max,
            mean = summary.mean,
            inside_cells = summary.inside_cells,
            "field summary"
        );
        Ok(())
    }
}
