//! Signed-distance fields for primitive shapes
//!
//! Cell `(x, y)` sits at the physical point `(x·h, y·h)`. Distances are
//! negative inside the shape and positive outside.

use super::probe::SurfaceProbe;
use crate::core_types::Vec2;
use crate::solver::{FieldData, SurfaceGeometry};

/// Signed-distance field with its grid spacing
#[derive(Debug, Clone, PartialEq)]
pub struct SdfGrid {
    /// Sampled distances
    pub field: FieldData,
    /// Physical distance between adjacent cells
    pub spacing: f64,
}

impl SdfGrid {
    /// Create an all-zero grid
    ///
    /// # Arguments
    ///
    /// * `width` - Cells along the first axis (`n_x`)
    /// * `height` - Cells along the second axis (`n_y`)
    /// * `spacing` - Physical distance between adjacent cells
    #[must_use]
    pub fn new(width: usize, height: usize, spacing: f64) -> Self {
        Self {
            field: FieldData::new(width, height),
            spacing,
        }
    }

    /// Physical position of cell `(x, y)`
    #[must_use]
    pub fn position(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(x as f64 * self.spacing, y as f64 * self.spacing)
    }

    /// Fill with the signed distance to a circle
    pub fn distance_circle(&mut self, center: Vec2, radius: f64) {
        self.fill_with(|p| (p - center).norm() - radius);
    }

    /// Fill with the signed distance to an axis-aligned rectangle
    pub fn distance_rectangle(&mut self, min_corner: Vec2, max_corner: Vec2) {
        let center = (min_corner + max_corner) * 0.5;
        let half_extent = (max_corner - min_corner) * 0.5;

        self.fill_with(|p| {
            let d = (p - center).abs() - half_extent;
            let outside = Vec2::new(d.x.max(0.0), d.y.max(0.0)).norm();
            let inside = d.x.max(d.y).min(0.0);
            outside + inside
        });
    }

    /// Geometric view using this grid's spacing
    #[must_use]
    pub fn probe(&self) -> SurfaceProbe<'_> {
        SurfaceProbe::new(&self.field, self.spacing)
    }

    fn fill_with(&mut self, distance: impl Fn(Vec2) -> f64) {
        let (width, height) = self.field.dimensions();
        for y in 0..height {
            for x in 0..width {
                let p = self.position(x, y);
                self.field.set(x, y, distance(p));
            }
        }
    }
}

impl SurfaceGeometry for SdfGrid {
    fn dimensions(&self) -> (usize, usize) {
        self.field.dimensions()
    }

    fn normal(&self, x: usize, y: usize) -> Vec2 {
        self.probe().normal(x, y)
    }

    fn curvature(&self, x: usize, y: usize) -> f64 {
        self.probe().curvature(x, y)
    }
}
