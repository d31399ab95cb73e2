//! Error types for persistence and experiment configuration
//!
//! The numerical routines are infallible. Everything that touches the file
//! system or parses user input reports failures through [`LevelSetError`].

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LevelSetError>;

/// Errors raised while loading, saving or configuring experiments
#[derive(Error, Debug)]
pub enum LevelSetError {
    /// File system failure (open, create, create directory)
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV reader or writer failure
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// Path being read or written
        path: PathBuf,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// A cell could not be parsed as a real number
    #[error("parse error in {path} line {line}: {message}")]
    Parse {
        /// Path being read
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Description of the offending cell
        message: String,
    },

    /// A row has a different number of columns than the first row
    #[error("ragged grid in {path} line {line}: expected {expected} columns, found {found}")]
    Shape {
        /// Path being read
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Column count of the first row
        expected: usize,
        /// Column count of this row
        found: usize,
    },

    /// The file contained no grid rows
    #[error("grid file {path} contains no rows")]
    EmptyGrid {
        /// Path being read
        path: PathBuf,
    },

    /// Invalid experiment configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file is not valid JSON for [`crate::ExperimentConfig`]
    #[error("malformed configuration file {path}: {source}")]
    ConfigFormat {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl LevelSetError {
    /// Wrap an I/O error with the path that produced it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
