//! Surface geometry capability
//!
//! This module defines the `SurfaceGeometry` trait, the narrow interface through
//! which velocity derivation queries the implicit surface. It says nothing
//! about how the signed-distance field was built or stored.

use crate::core_types::Vec2;

/// Geometric queries on an implicit surface sampled on a grid
///
/// Implementors answer per-cell questions about the surface whose zero level
/// set is stored in a signed-distance field.
pub trait SurfaceGeometry {
    /// Grid dimensions as `(n_x, n_y)`
    fn dimensions(&self) -> (usize, usize);

    /// Unit outward normal at cell `(x, y)`
    ///
    /// Returns the zero vector where the gradient vanishes.
    fn normal(&self, x: usize, y: usize) -> Vec2;

    /// Signed curvature κ at cell `(x, y)`
    ///
    /// Positive for convex regions of a surface whose inside is φ < 0.
    fn curvature(&self, x: usize, y: usize) -> f64;
}
