//! Normal and curvature evaluation on a borrowed field
//!
//! # Curvature
//!
//! ```text
//! κ = (φxx φy² − 2 φx φy φxy + φyy φx²) / (φx² + φy²)^(3/2)
//! ```
//!
//! All derivatives use the clamped stencils from [`crate::solver::derivative`].

use crate::core_types::Vec2;
use crate::solver::derivative::{central_difference, second_differences};
use crate::solver::{FieldData, SurfaceGeometry};

/// Squared gradient magnitude below which normal and curvature are undefined
const GRADIENT_EPSILON: f64 = 1e-10;

/// Read-only geometric view of a level set field
#[derive(Debug, Clone, Copy)]
pub struct SurfaceProbe<'a> {
    field: &'a FieldData,
    spacing: f64,
}

impl<'a> SurfaceProbe<'a> {
    /// View `field` as a surface sampled with the given grid spacing
    #[must_use]
    pub fn new(field: &'a FieldData, spacing: f64) -> Self {
        Self { field, spacing }
    }

    /// Grid spacing used for derivatives
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }
}

impl SurfaceGeometry for SurfaceProbe<'_> {
    fn dimensions(&self) -> (usize, usize) {
        self.field.dimensions()
    }

    fn normal(&self, x: usize, y: usize) -> Vec2 {
        let (phi_x, phi_y) = central_difference(self.field, x, y, self.spacing);
        let gradient = Vec2::new(phi_x, phi_y);
        if gradient.norm_squared() > GRADIENT_EPSILON {
            gradient.normalize()
        } else {
            Vec2::zeros()
        }
    }

    fn curvature(&self, x: usize, y: usize) -> f64 {
        let (phi_x, phi_y) = central_difference(self.field, x, y, self.spacing);
        let grad_sq = phi_x * phi_x + phi_y * phi_y;
        if grad_sq <= GRADIENT_EPSILON {
            return 0.0;
        }

        let (phi_xx, phi_yy, phi_xy) = second_differences(self.field, x, y, self.spacing);
        let numerator =
            phi_xx * phi_y * phi_y - 2.0 * phi_x * phi_y * phi_xy + phi_yy * phi_x * phi_x;
        numerator / grad_sq.powf(1.5)
    }
}
