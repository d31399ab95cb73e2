//! Field persistence seam for experiments

use crate::error::{LevelSetError, Result};
use crate::io::{load_csv, save_csv};
use crate::solver::FieldData;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads input fields and persists result fields by name
pub trait FieldStore {
    /// Load a field
    ///
    /// # Errors
    ///
    /// Returns an error if the field cannot be found or decoded.
    fn load(&self, name: &Path) -> Result<FieldData>;

    /// Persist a field under `name` and return where it was written
    ///
    /// # Errors
    ///
    /// Returns an error if the field cannot be written.
    fn save(&mut self, name: &str, field: &FieldData) -> Result<PathBuf>;
}

/// CSV files in a directory
///
/// Relative input names are resolved against the working directory, outputs
/// are written into `root`, which is created on the first save.
#[derive(Debug, Clone)]
pub struct CsvFieldStore {
    root: PathBuf,
}

impl CsvFieldStore {
    /// Store writing into `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FieldStore for CsvFieldStore {
    fn load(&self, name: &Path) -> Result<FieldData> {
        load_csv(name)
    }

    fn save(&mut self, name: &str, field: &FieldData) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).map_err(|e| LevelSetError::io(&self.root, e))?;
        let path = self.root.join(name);
        save_csv(&path, field)?;
        Ok(path)
    }
}
