//! Experiment runner
//!
//! Two phases, both reading the same initial field:
//!
//! 1. Scheme comparison: every configured scheme × spacing × duration, driven
//!    by a uniform speed.
//! 2. Geometry-driven (Engquist-Osher only): for every spacing, a velocity field
//!    projected from the configured direction, then one from curvature.
//!
//! The first failing load, save or observation aborts the run. Fields already
//! persisted are left in place.

use super::config::ExperimentConfig;
use super::observer::FieldObserver;
use super::store::FieldStore;
use crate::error::Result;
use crate::solver::{
    advance, derive_velocity, AdvectionScheme, CpuLevelSetSolver, FieldData, FieldSummary,
    ProfilerScope, VelocityMode, VelocitySpec,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// What produced a persisted field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentKind {
    /// Uniform speed advanced with the given scheme
    Scheme(AdvectionScheme),
    /// Engquist-Osher with a vector-projected velocity
    VectorVelocity,
    /// Engquist-Osher with a curvature velocity
    CurvatureVelocity,
}

impl ExperimentKind {
    /// Label used in artifact names and titles
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Scheme(scheme) => scheme.label(),
            Self::VectorVelocity => "vector_velocity",
            Self::CurvatureVelocity => "curvature_velocity",
        }
    }
}

/// One persisted experiment result
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentRecord {
    /// What produced the field
    pub kind: ExperimentKind,
    /// Advanced duration
    pub duration: f64,
    /// Grid spacing used by the scheme
    pub spacing: f64,
    /// Where the field was written
    pub path: PathBuf,
    /// Statistics of the written field
    pub summary: FieldSummary,
}

/// Artifact file name: `{shape}_{method}_t_{t}_dx_{spacing}.csv`
///
/// Numbers use their shortest decimal form (`0.1`, `1`, `0.25`).
#[must_use]
pub fn artifact_name(shape: &str, kind: ExperimentKind, duration: f64, spacing: f64) -> String {
    format!(
        "{}_{}_t_{}_dx_{}.csv",
        shape.to_lowercase(),
        kind.label(),
        duration,
        spacing
    )
}

fn artifact_title(shape: &str, kind: ExperimentKind, duration: f64, spacing: f64) -> String {
    let mut chars = shape.chars();
    let shape = chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect::<String>()
    });
    format!(
        "{}    {}    t={}    dx={}",
        shape,
        kind.label().replace('_', " "),
        duration,
        spacing
    )
}

/// Drives experiment sweeps over a store and an observer
pub struct ExperimentRunner<S, O> {
    config: ExperimentConfig,
    store: S,
    observer: O,
}

impl<S: FieldStore, O: FieldObserver> ExperimentRunner<S, O> {
    /// Create a runner
    pub fn new(config: ExperimentConfig, store: S, observer: O) -> Self {
        Self {
            config,
            store,
            observer,
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Consume the runner and return its store and observer
    pub fn into_parts(self) -> (S, O) {
        (self.store, self.observer)
    }

    /// Run both phases against the field stored at `initial`
    ///
    /// # Errors
    ///
    /// Returns the first configuration, load, save or observer error.
    pub fn run(&mut self, initial: impl AsRef<Path>) -> Result<Vec<ExperimentRecord>> {
        self.config.validate()?;
        let initial = initial.as_ref();
        let _scope = ProfilerScope::new("experiment");

        let mut records = Vec::new();
        self.compare_advancements(initial, &mut records)?;
        if self.config.geometry_phase {
            self.geometry_experiments(initial, &mut records)?;
        }

        info!(fields = records.len(), "experiment finished");
        Ok(records)
    }

    /// Phase 1: uniform speed, every scheme × spacing × duration
    ///
    /// # Errors
    ///
    /// Returns the first load, save or observer error.
    pub fn compare_advancements(
        &mut self,
        initial: &Path,
        records: &mut Vec<ExperimentRecord>,
    ) -> Result<()> {
        let schemes = self.config.schemes.clone();
        let spacings = self.config.spacings.clone();
        let durations = self.config.durations.clone();
        let velocity = VelocitySpec::Uniform(self.config.speed);

        for &scheme in &schemes {
            for &spacing in &spacings {
                let phi = self.store.load(initial)?;
                for &duration in &durations {
                    let result = self.evolve(&phi, &velocity, spacing, duration, scheme);
                    let record =
                        self.persist(ExperimentKind::Scheme(scheme), duration, spacing, &result)?;
                    records.push(record);
                }
            }
        }
        Ok(())
    }

    /// Phase 2: vector-projected and curvature velocities, Engquist-Osher
    ///
    /// # Errors
    ///
    /// Returns the first load, save or observer error.
    pub fn geometry_experiments(
        &mut self,
        initial: &Path,
        records: &mut Vec<ExperimentRecord>,
    ) -> Result<()> {
        let phi = self.store.load(initial)?;
        let spacings = self.config.spacings.clone();
        let duration = self.config.geometry_duration;
        let scheme = AdvectionScheme::EngquistOsher;

        for &spacing in &spacings {
            let vector_velocity = VelocitySpec::Field(derive_velocity(
                &phi,
                VelocityMode::VectorProjection(self.config.direction),
            ));
            let result = self.evolve(&phi, &vector_velocity, spacing, duration, scheme);
            records.push(self.persist(ExperimentKind::VectorVelocity, duration, spacing, &result)?);

            let curvature_velocity =
                VelocitySpec::Field(derive_velocity(&phi, VelocityMode::Curvature));
            let result = self.evolve(&phi, &curvature_velocity, spacing, duration, scheme);
            records.push(self.persist(
                ExperimentKind::CurvatureVelocity,
                duration,
                spacing,
                &result,
            )?);
        }
        Ok(())
    }

    fn evolve(
        &self,
        phi: &FieldData,
        velocity: &VelocitySpec,
        spacing: f64,
        duration: f64,
        scheme: AdvectionScheme,
    ) -> FieldData {
        if self.config.substeps == 1 {
            return advance(phi, velocity, spacing, duration, scheme);
        }
        let mut solver = CpuLevelSetSolver::new(phi.clone(), velocity, spacing, scheme);
        solver.run(duration, self.config.substeps);
        solver.into_level_set()
    }

    fn persist(
        &mut self,
        kind: ExperimentKind,
        duration: f64,
        spacing: f64,
        field: &FieldData,
    ) -> Result<ExperimentRecord> {
        let shape = self.config.shape_label.as_str();
        let name = artifact_name(shape, kind, duration, spacing);
        let title = artifact_title(shape, kind, duration, spacing);

        let path = self.store.save(&name, field)?;
        info!(path = %path.display(), "saved grid");
        self.observer.observe(&title, field)?;

        Ok(ExperimentRecord {
            kind,
            duration,
            spacing,
            path,
            summary: field.summary(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names() {
        let simple = ExperimentKind::Scheme(AdvectionScheme::Simple);
        assert_eq!(
            artifact_name("Circle", simple, 0.1, 1.0),
            "circle_simple_advance_t_0.1_dx_1.csv"
        );
        assert_eq!(
            artifact_name("rectangle", ExperimentKind::CurvatureVelocity, 1.0, 0.25),
            "rectangle_curvature_velocity_t_1_dx_0.25.csv"
        );
    }

    #[test]
    fn test_artifact_title() {
        let kind = ExperimentKind::Scheme(AdvectionScheme::EngquistOsher);
        assert_eq!(
            artifact_title("circle", kind, 0.1, 0.25),
            "Circle    engquist osher    t=0.1    dx=0.25"
        );
    }
}
