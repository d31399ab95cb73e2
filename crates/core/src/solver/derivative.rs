//! Central-difference gradient estimation
//!
//! ```text
//! Dx = (φ[x+1, y] − φ[x−1, y]) / (2h)
//! Dy = (φ[x, y+1] − φ[x, y−1]) / (2h)
//! ```
//!
//! Neighbour indices are clamped to `[0, n − 1]`. At a boundary cell the
//! outside neighbour is the cell itself, so the stencil there spans a single
//! cell while the divisor stays `2h`.

use super::fields::FieldData;

/// Partial derivatives `(Dx, Dy)` of `field` at cell `(x, y)`
///
/// # Arguments
///
/// * `field` - Field to differentiate
/// * `x` - Cell index along the first axis
/// * `y` - Cell index along the second axis
/// * `spacing` - Physical distance between adjacent cells
#[must_use]
pub fn central_difference(field: &FieldData, x: usize, y: usize, spacing: f64) -> (f64, f64) {
    let two_h = 2.0 * spacing;
    let dx = (field.clamped(x, y, 1, 0) - field.clamped(x, y, -1, 0)) / two_h;
    let dy = (field.clamped(x, y, 0, 1) - field.clamped(x, y, 0, -1)) / two_h;
    (dx, dy)
}

/// Second derivatives `(Dxx, Dyy, Dxy)` with the same clamped stencil
#[must_use]
pub fn second_differences(field: &FieldData, x: usize, y: usize, spacing: f64) -> (f64, f64, f64) {
    let h2 = spacing * spacing;
    let center = field.get(x, y);

    let dxx = (field.clamped(x, y, 1, 0) - 2.0 * center + field.clamped(x, y, -1, 0)) / h2;
    let dyy = (field.clamped(x, y, 0, 1) - 2.0 * center + field.clamped(x, y, 0, -1)) / h2;
    let dxy = (field.clamped(x, y, 1, 1) - field.clamped(x, y, -1, 1) - field.clamped(x, y, 1, -1)
        + field.clamped(x, y, -1, -1))
        / (4.0 * h2);

    (dxx, dyy, dxy)
}
