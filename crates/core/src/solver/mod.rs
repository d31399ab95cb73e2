//! Level set solver module
//!
//! Numerical core of the crate: field storage, clamped finite differences,
//! velocity derivation and the two advancement schemes.
//!
//! # Example
//!
//! ```rust
//! use level_set_core::solver::{advance, AdvectionScheme, FieldData, VelocitySpec};
//!
//! let phi = FieldData::with_value(21, 21, 5.0);
//! let next = advance(&phi, &VelocitySpec::Uniform(2.0), 1.0, 1.0, AdvectionScheme::Simple);
//! assert!(next.as_slice().iter().all(|&v| v == 3.0));
//! ```

mod cpu;
pub mod derivative;
mod fields;
mod level_set;
pub mod profiler;
#[allow(clippy::module_name_repetitions)]
mod r#trait;
pub mod velocity;

// Re-exports
pub use cpu::CpuLevelSetSolver;
pub use derivative::central_difference;
pub use fields::{FieldData, FieldSummary};
pub use level_set::{
    advance, simple_advance, step_engquist_osher_cpu, upwind_gradient_magnitude,
    AdvectionScheme, LevelSetParams, VelocitySpec,
};
pub use profiler::ProfilerScope;
pub use r#trait::SurfaceGeometry;
pub use velocity::{derive_velocity, velocity_from_curvature, velocity_from_vector, VelocityMode};
