//! Level Set Front Propagation Core Library
//!
//! Advances an implicit 2-D surface, stored as a sampled signed-distance field,
//! under a prescribed normal velocity. The Hamilton-Jacobi level set equation
//!
//! ```text
//! ∂φ/∂t + V|∇φ| = 0
//! ```
//!
//! is integrated with either a naive subtraction scheme or the entropy-satisfying
//! Engquist-Osher upwind scheme.
//!
//! ## Components
//!
//! - [`solver::FieldData`]: dense 2-D grid of `f64` values
//! - [`solver::central_difference`]: clamped central-difference gradient
//! - [`solver::derive_velocity`]: speed fields from surface normals or curvature
//! - [`solver::advance`]: one time step with a chosen [`solver::AdvectionScheme`]
//! - [`experiment::ExperimentRunner`]: scheme × spacing × duration sweeps

// Core types and utilities
pub mod core_types;
pub mod error;

// Numerical core
pub mod grid;
pub mod solver;

// Persistence and orchestration
pub mod experiment;
pub mod io;

// Re-export core types
pub use core_types::Vec2;
pub use error::{LevelSetError, Result};

// Re-export numerical types
pub use grid::{SdfGrid, SurfaceProbe};
pub use solver::{
    advance, central_difference, derive_velocity, AdvectionScheme, CpuLevelSetSolver, FieldData,
    SurfaceGeometry, VelocityMode, VelocitySpec,
};

// Re-export orchestration types
pub use experiment::{
    CsvFieldStore, ExperimentConfig, ExperimentRecord, ExperimentRunner, FieldObserver,
    FieldStore, TracingObserver,
};
