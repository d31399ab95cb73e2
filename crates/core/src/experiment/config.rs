//! Experiment configuration
//!
//! Every field has a default, so a configuration file only needs to name what
//! it changes. The defaults reproduce the reference sweep: speed 10, durations
//! 0.1 and 1, spacings 1 and 0.25, both schemes, direction (1, 0).

use crate::core_types::Vec2;
use crate::error::{LevelSetError, Result};
use crate::solver::AdvectionScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters of an experiment sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Shape label used as the artifact name prefix (e.g. "circle")
    pub shape_label: String,
    /// Uniform normal speed for the scheme comparison phase
    pub speed: f64,
    /// Durations advanced in the scheme comparison phase
    pub durations: Vec<f64>,
    /// Grid spacings swept in both phases
    pub spacings: Vec<f64>,
    /// Schemes compared in the first phase
    pub schemes: Vec<AdvectionScheme>,
    /// Driving direction for vector-projected velocity
    pub direction: Vec2,
    /// Duration of the geometry-driven phase
    pub geometry_duration: f64,
    /// Whether to run the geometry-driven phase at all
    pub geometry_phase: bool,
    /// Equal sub-steps per duration (1 = a single update of the full duration)
    pub substeps: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            shape_label: "circle".to_string(),
            speed: 10.0,
            durations: vec![0.1, 1.0],
            spacings: vec![1.0, 0.25],
            schemes: vec![AdvectionScheme::Simple, AdvectionScheme::EngquistOsher],
            direction: Vec2::new(1.0, 0.0),
            geometry_duration: 1.0,
            geometry_phase: true,
            substeps: 1,
        }
    }
}

impl ExperimentConfig {
    /// Load a configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON for
    /// this structure.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| LevelSetError::io(path, e))?;
        serde_json::from_str(&text).map_err(|e| LevelSetError::ConfigFormat {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Check caller-side preconditions
    ///
    /// The numerical core trusts its inputs, so spacings and durations are
    /// checked here, before any field is touched.
    ///
    /// # Errors
    ///
    /// Returns [`LevelSetError::Config`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.shape_label.is_empty() {
            return Err(LevelSetError::config("shape_label must not be empty"));
        }
        if self.spacings.is_empty() {
            return Err(LevelSetError::config("at least one spacing is required"));
        }
        if let Some(h) = self.spacings.iter().find(|&&h| !(h > 0.0 && h.is_finite())) {
            return Err(LevelSetError::config(format!(
                "spacing must be positive and finite, got {h}"
            )));
        }
        if let Some(t) = self.durations.iter().find(|&&t| !(t > 0.0 && t.is_finite())) {
            return Err(LevelSetError::config(format!(
                "duration must be positive and finite, got {t}"
            )));
        }
        if self.geometry_phase
            && !(self.geometry_duration > 0.0 && self.geometry_duration.is_finite())
        {
            return Err(LevelSetError::config(format!(
                "geometry_duration must be positive and finite, got {}",
                self.geometry_duration
            )));
        }
        if self.substeps == 0 {
            return Err(LevelSetError::config("substeps must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExperimentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.durations, vec![0.1, 1.0]);
        assert_eq!(config.spacings, vec![1.0, 0.25]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{ "shape_label": "rectangle", "schemes": ["engquist_osher"] }"#)
                .unwrap();
        assert_eq!(config.shape_label, "rectangle");
        assert_eq!(config.schemes, vec![AdvectionScheme::EngquistOsher]);
        assert_eq!(config.speed, 10.0);
        assert_eq!(config.direction, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_direction_from_json_array() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{ "direction": [0.0, -1.0] }"#).unwrap();
        assert_eq!(config.direction, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_rejects_non_positive_spacing() {
        let config = ExperimentConfig {
            spacings: vec![1.0, 0.0],
            ..ExperimentConfig::default()
        };
        assert!(matches!(config.validate(), Err(LevelSetError::Config(_))));
    }

    #[test]
    fn test_rejects_negative_duration() {
        let config = ExperimentConfig {
            durations: vec![-0.1],
            ..ExperimentConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_substeps() {
        let config = ExperimentConfig {
            substeps: 0,
            ..ExperimentConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err =
            ExperimentConfig::from_json_file(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, LevelSetError::Io { .. }));
    }
}
