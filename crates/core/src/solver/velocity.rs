//! Velocity fields derived from surface geometry
//!
//! Produces a per-cell normal speed for the level set equation:
//! - constant speed everywhere
//! - projection of a constant direction onto the local normal, `V = d · n`
//! - curvature-driven flow, `V = −κ`

use super::fields::FieldData;
use super::r#trait::SurfaceGeometry;
use crate::core_types::Vec2;
use crate::grid::SurfaceProbe;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How to build a velocity field from a level set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityMode {
    /// Same speed in every cell
    Constant(f64),
    /// Constant direction projected onto each cell's normal
    VectorProjection(Vec2),
    /// Negative local curvature (mean curvature flow)
    Curvature,
}

/// Project a constant direction onto the surface normal at every cell
///
/// A uniform driving vector yields anisotropic speeds: cells whose normal
/// faces the direction move fastest, cells with a perpendicular normal stay.
pub fn velocity_from_vector<G: SurfaceGeometry + ?Sized>(
    geometry: &G,
    direction: Vec2,
) -> FieldData {
    let (width, height) = geometry.dimensions();
    FieldData::from_fn(width, height, |x, y| direction.dot(&geometry.normal(x, y)))
}

/// Use the negative local curvature as the speed at every cell
///
/// High positive curvature regions retreat, which smooths the front.
pub fn velocity_from_curvature<G: SurfaceGeometry + ?Sized>(geometry: &G) -> FieldData {
    let (width, height) = geometry.dimensions();
    FieldData::from_fn(width, height, |x, y| -geometry.curvature(x, y))
}

/// Build a velocity field for `field` according to `mode`
///
/// Geometric modes view the field through a unit-spacing [`SurfaceProbe`], so
/// normals and curvature are measured in cell units.
#[must_use]
pub fn derive_velocity(field: &FieldData, mode: VelocityMode) -> FieldData {
    debug!(?mode, width = field.width, height = field.height, "deriving velocity");
    match mode {
        VelocityMode::Constant(v) => FieldData::with_value(field.width, field.height, v),
        VelocityMode::VectorProjection(direction) => {
            velocity_from_vector(&SurfaceProbe::new(field, 1.0), direction)
        }
        VelocityMode::Curvature => velocity_from_curvature(&SurfaceProbe::new(field, 1.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Fixed answers, independent of any field
    struct Stub {
        normal: Vec2,
        curvature: f64,
    }

    impl SurfaceGeometry for Stub {
        fn dimensions(&self) -> (usize, usize) {
            (3, 2)
        }

        fn normal(&self, _x: usize, _y: usize) -> Vec2 {
            self.normal
        }

        fn curvature(&self, _x: usize, _y: usize) -> f64 {
            self.curvature
        }
    }

    #[test]
    fn test_vector_projection_uses_dot_product() {
        let stub = Stub {
            normal: Vec2::new(0.6, 0.8),
            curvature: 0.0,
        };
        let v = velocity_from_vector(&stub, Vec2::new(2.0, -1.0));
        assert_eq!(v.dimensions(), (3, 2));
        assert!(v.data.iter().all(|&s| (s - 0.4).abs() < 1e-12));
    }

    #[test]
    fn test_curvature_velocity_is_negated() {
        let stub = Stub {
            normal: Vec2::zeros(),
            curvature: 0.25,
        };
        let v = velocity_from_curvature(&stub);
        assert!(v.data.iter().all(|&s| s == -0.25));
    }

    #[test]
    fn test_constant_mode() {
        let field = FieldData::new(4, 3);
        let v = derive_velocity(&field, VelocityMode::Constant(10.0));
        assert_eq!(v, FieldData::with_value(4, 3, 10.0));
    }

    #[test]
    fn test_vector_projection_on_vertical_plane() {
        // φ = x - 4: normal is +x everywhere
        let field = FieldData::from_fn(9, 5, |x, _| x as f64 - 4.0);
        let v = derive_velocity(&field, VelocityMode::VectorProjection(Vec2::new(1.0, 0.0)));
        for &s in &v.data {
            assert_relative_eq!(s, 1.0, epsilon = 1e-12);
        }

        let v = derive_velocity(&field, VelocityMode::VectorProjection(Vec2::new(0.0, 3.0)));
        assert!(v.data.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_flat_front_has_zero_curvature_speed() {
        let field = FieldData::from_fn(8, 8, |_, y| y as f64 - 3.5);
        let v = derive_velocity(&field, VelocityMode::Curvature);
        assert!(v.data.iter().all(|&s| s == 0.0));
    }
}
