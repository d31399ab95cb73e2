//! Vector type alias for 2D directions and surface normals.

use nalgebra::Vector2;

/// 2D vector type for advection directions and surface normals.
///
/// This is a simple alias for `nalgebra::Vector2<f64>`, used for the unit
/// normals returned by [`crate::SurfaceGeometry`] and the constant driving
/// direction of vector-projected velocity fields.
pub type Vec2 = Vector2<f64>;
