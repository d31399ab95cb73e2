//! Dense 2D field storage
//!
//! Level set values and per-cell velocities share the same container: a flat
//! `Vec<f64>` in row-major order. Time stepping never mutates a field that is
//! being read; each step writes into a separate buffer.

use rayon::prelude::*;

/// Field data container
///
/// Stores 2D field data as a flat `Vec<f64>` in row-major order.
/// `width` is the extent along the first axis (`n_x`) and `height` the extent
/// along the second axis (`n_y`).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData {
    /// Field values in row-major order (y * width + x)
    pub data: Vec<f64>,
    /// Grid width in cells (`n_x`)
    pub width: usize,
    /// Grid height in cells (`n_y`)
    pub height: usize,
}

impl FieldData {
    /// Create a new field with given dimensions, initialized to zero
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, 0.0)
    }

    /// Create a new field with given dimensions, initialized to a value
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    /// * `value` - Initial value for all cells
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f64) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Create a field by evaluating `f(x, y)` at every cell
    #[must_use]
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Grid dimensions as `(n_x, n_y)`
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Whether `other` has the same dimensions as this field
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x] = value;
    }

    /// Value at `(x + dx, y + dy)` with both indices clamped to the grid
    ///
    /// Out-of-range neighbours collapse onto the nearest boundary cell.
    #[must_use]
    pub fn clamped(&self, x: usize, y: usize, dx: isize, dy: isize) -> f64 {
        let cx = clamp_index(x, dx, self.width);
        let cy = clamp_index(y, dy, self.height);
        self.data[cy * self.width + cx]
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Summary statistics for logging and comparison
    #[must_use]
    pub fn summary(&self) -> FieldSummary {
        let (min, max, sum, inside) = self
            .data
            .par_iter()
            .fold(
                || (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0_usize),
                |(min, max, sum, inside), &v| {
                    (min.min(v), max.max(v), sum + v, inside + usize::from(v < 0.0))
                },
            )
            .reduce(
                || (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0_usize),
                |a, b| (a.0.min(b.0), a.1.max(b.1), a.2 + b.2, a.3 + b.3),
            );

        let mean = if self.data.is_empty() {
            0.0
        } else {
            sum / self.data.len() as f64
        };

        FieldSummary {
            min,
            max,
            mean,
            inside_cells: inside,
        }
    }
}

#[inline]
fn clamp_index(i: usize, offset: isize, len: usize) -> usize {
    let shifted = i as isize + offset;
    shifted.clamp(0, len as isize - 1) as usize
}

/// Aggregate statistics of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
    /// Smallest cell value
    pub min: f64,
    /// Largest cell value
    pub max: f64,
    /// Arithmetic mean of all cells
    pub mean: f64,
    /// Number of cells strictly inside the surface (φ < 0)
    pub inside_cells: usize,
}
