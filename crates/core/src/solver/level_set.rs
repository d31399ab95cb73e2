//! Level set front advancement
//!
//! Implements time stepping of the level set φ field under a normal speed V.
//!
//! # Level Set Method
//!
//! The surface is represented implicitly as the zero level set of φ:
//! - φ < 0: Inside
//! - φ = 0: Front
//! - φ > 0: Outside
//!
//! Evolution equation: ∂φ/∂t + V|∇φ| = 0
//!
//! # Schemes
//!
//! - [`AdvectionScheme::Simple`]: `φ_new = φ − V·Δt`. Ignores |∇φ| entirely and
//!   serves only as a baseline for comparison.
//! - [`AdvectionScheme::EngquistOsher`]: upwind estimate of |∇φ| selected by the
//!   sign of V, then `φ_new = φ − V·|∇φ|·Δt`.
//!
//! No CFL check is made and the field is never reinitialized to a true distance
//! function after a step. Both are the caller's concern.
//!
//! # References
//!
//! - Osher & Sethian (1988) "Fronts propagating with curvature-dependent speed"
//! - Sethian (1999) "Level Set Methods and Fast Marching Methods"

use super::derivative::central_difference;
use super::fields::FieldData;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Time integration scheme for the level set equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvectionScheme {
    /// Linear subtraction `φ − V·Δt`
    Simple,
    /// Engquist-Osher upwind gradient, `φ − V·|∇φ|·Δt`
    EngquistOsher,
}

impl AdvectionScheme {
    /// Label used in artifact names
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Simple => "simple_advance",
            Self::EngquistOsher => "engquist_osher",
        }
    }
}

impl fmt::Display for AdvectionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normal speed driving an advancement step
#[derive(Debug, Clone, PartialEq)]
pub enum VelocitySpec {
    /// Same speed in every cell
    Uniform(f64),
    /// One speed per cell, same dimensions as the level set field
    Field(FieldData),
}

impl VelocitySpec {
    /// Expand to a full per-cell field of the given dimensions
    #[must_use]
    pub fn to_field(&self, width: usize, height: usize) -> FieldData {
        match self {
            Self::Uniform(v) => FieldData::with_value(width, height, *v),
            Self::Field(field) => {
                assert_velocity_shape(width, height, field);
                field.clone()
            }
        }
    }
}

/// Parameters for a single advancement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSetParams {
    /// Timestep Δt
    pub dt: f64,
    /// Grid spacing h (identical along both axes)
    pub spacing: f64,
}

/// Advance `field` by one step of `dt` with the chosen scheme
///
/// Returns a new field; `field` is only read. The Simple scheme ignores
/// `spacing`.
///
/// # Arguments
///
/// * `field` - Current level set φ
/// * `velocity` - Normal speed, uniform or per cell
/// * `spacing` - Grid spacing h
/// * `dt` - Timestep Δt
/// * `scheme` - Integration scheme
///
/// # Panics
///
/// Panics if a per-cell velocity field does not match the dimensions of `field`
#[must_use]
pub fn advance(
    field: &FieldData,
    velocity: &VelocitySpec,
    spacing: f64,
    dt: f64,
    scheme: AdvectionScheme,
) -> FieldData {
    debug!(
        %scheme,
        width = field.width,
        height = field.height,
        dt,
        spacing,
        "advancing level set"
    );

    let mut out = FieldData::new(field.width, field.height);
    match scheme {
        AdvectionScheme::Simple => simple_advance_into(field, velocity, dt, &mut out),
        AdvectionScheme::EngquistOsher => {
            let params = LevelSetParams { dt, spacing };
            match velocity {
                VelocitySpec::Field(v) => step_engquist_osher_cpu(field, v, &mut out, params),
                VelocitySpec::Uniform(_) => {
                    let v = velocity.to_field(field.width, field.height);
                    step_engquist_osher_cpu(field, &v, &mut out, params);
                }
            }
        }
    }
    out
}

/// Simple scheme: `φ_new = φ − V·Δt`, elementwise
#[must_use]
pub fn simple_advance(field: &FieldData, velocity: &VelocitySpec, dt: f64) -> FieldData {
    let mut out = FieldData::new(field.width, field.height);
    simple_advance_into(field, velocity, dt, &mut out);
    out
}

fn simple_advance_into(
    phi_in: &FieldData,
    velocity: &VelocitySpec,
    dt: f64,
    phi_out: &mut FieldData,
) {
    let width = phi_in.width;

    match velocity {
        VelocitySpec::Uniform(v) => {
            phi_out
                .as_mut_slice()
                .par_iter_mut()
                .zip(phi_in.as_slice().par_iter())
                .for_each(|(out, &phi)| *out = phi - v * dt);
        }
        VelocitySpec::Field(v) => {
            assert_velocity_shape(width, phi_in.height, v);
            phi_out
                .as_mut_slice()
                .par_iter_mut()
                .zip(phi_in.as_slice().par_iter())
                .zip(v.as_slice().par_iter())
                .for_each(|((out, &phi), &speed)| *out = phi - speed * dt);
        }
    }
}

/// Engquist-Osher upwind step
///
/// For every cell:
/// 1. `(Dx, Dy)` from clamped central differences
/// 2. Upwind |∇φ| chosen by the sign of V
/// 3. `φ_out = φ_in − V·|∇φ|·Δt`
///
/// Rows of `phi_out` are filled in parallel. Every read goes to `phi_in`, so
/// the result is identical to a sequential sweep.
///
/// # Arguments
///
/// * `phi_in` - Pre-step level set field
/// * `velocity` - Per-cell normal speed
/// * `phi_out` - Output buffer, overwritten completely
/// * `params` - Timestep and grid spacing
///
/// # Panics
///
/// Panics if the three fields do not share dimensions
pub fn step_engquist_osher_cpu(
    phi_in: &FieldData,
    velocity: &FieldData,
    phi_out: &mut FieldData,
    params: LevelSetParams,
) {
    let width = phi_in.width;
    assert_velocity_shape(width, phi_in.height, velocity);
    assert!(
        phi_in.same_shape(phi_out),
        "Output buffer must match level set dimensions"
    );

    if phi_in.data.is_empty() {
        return;
    }

    phi_out
        .as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let (d_x, d_y) = central_difference(phi_in, x, y, params.spacing);
                let v = velocity.get(x, y);

                let grad_mag = upwind_gradient_magnitude(d_x, d_y, v);

                // Hamilton-Jacobi update: ∂φ/∂t + V|∇φ| = 0
                *cell = phi_in.get(x, y) - v * grad_mag * params.dt;
            }
        });
}

/// Upwind gradient magnitude for speed `v`
#[inline]
#[must_use]
pub fn upwind_gradient_magnitude(d_x: f64, d_y: f64, v: f64) -> f64 {
    if v < 0.0 {
        (upwind_negative(d_x) + upwind_negative(d_y)).sqrt()
    } else {
        (upwind_positive(d_x) + upwind_positive(d_y)).sqrt()
    }
}

/// `max(−d, 0)² + min(−d, 0)²`, used when the front recedes (V < 0)
#[inline]
fn upwind_negative(d: f64) -> f64 {
    f64::max(-d, 0.0).powi(2) + f64::min(-d, 0.0).powi(2)
}

/// `max(d, 0)² + min(d, 0)²`, used when the front advances (V ≥ 0)
#[inline]
fn upwind_positive(d: f64) -> f64 {
    f64::max(d, 0.0).powi(2) + f64::min(d, 0.0).powi(2)
}

fn assert_velocity_shape(width: usize, height: usize, velocity: &FieldData) {
    assert!(
        velocity.width == width && velocity.height == height,
        "Velocity field is {}x{} but level set is {}x{}",
        velocity.width,
        velocity.height,
        width,
        height
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp_x(width: usize, height: usize) -> FieldData {
        FieldData::from_fn(width, height, |x, _| x as f64)
    }

    #[test]
    fn test_simple_uniform_constant_field() {
        let field = FieldData::with_value(21, 21, 5.0);
        let out = advance(
            &field,
            &VelocitySpec::Uniform(2.0),
            1.0,
            1.0,
            AdvectionScheme::Simple,
        );
        assert!(out.data.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_simple_zero_velocity_is_identity() {
        let field = FieldData::from_fn(8, 5, |x, y| (x as f64 - 3.3) * (y as f64 + 0.7));
        for dt in [0.0, 0.1, 1.0, 37.5] {
            let out = simple_advance(&field, &VelocitySpec::Uniform(0.0), dt);
            assert_eq!(out, field);
        }
    }

    #[test]
    fn test_simple_is_linear_in_time() {
        let field = FieldData::from_fn(6, 6, |x, y| x as f64 * 0.3 - y as f64 * 1.7);
        let velocity = VelocitySpec::Field(FieldData::from_fn(6, 6, |x, y| (x + 2 * y) as f64));

        let once = simple_advance(&field, &velocity, 0.75);
        let twice = simple_advance(&simple_advance(&field, &velocity, 0.5), &velocity, 0.25);
        for (a, b) in once.data.iter().zip(&twice.data) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_simple_per_cell_velocity() {
        let field = FieldData::with_value(3, 2, 1.0);
        let velocity = VelocitySpec::Field(FieldData::from_fn(3, 2, |x, _| x as f64));
        let out = simple_advance(&field, &velocity, 0.5);
        assert_eq!(out.get(0, 1), 1.0);
        assert_eq!(out.get(1, 1), 0.5);
        assert_eq!(out.get(2, 0), 0.0);
    }

    #[test]
    fn test_engquist_osher_zero_velocity_is_identity() {
        let field = FieldData::from_fn(9, 7, |x, y| {
            ((x as f64 - 4.0).powi(2) + (y as f64 - 3.0).powi(2)).sqrt() - 2.0
        });
        for spacing in [1.0, 0.25, 3.0] {
            let out = advance(
                &field,
                &VelocitySpec::Uniform(0.0),
                spacing,
                1.0,
                AdvectionScheme::EngquistOsher,
            );
            assert_eq!(out, field);
        }
    }

    #[test]
    fn test_engquist_osher_ramp_with_positive_speed() {
        let (width, height) = (10, 6);
        let field = ramp_x(width, height);
        let out = advance(
            &field,
            &VelocitySpec::Uniform(1.0),
            1.0,
            1.0,
            AdvectionScheme::EngquistOsher,
        );

        for y in 0..height {
            for x in 1..width - 1 {
                assert_eq!(out.get(x, y), field.get(x, y) - 1.0);
            }
            // Clamped stencil gives Dx = 0.5 on both boundary columns
            assert_eq!(out.get(0, y), field.get(0, y) - 0.5);
            assert_eq!(out.get(width - 1, y), field.get(width - 1, y) - 0.5);
        }
    }

    #[test]
    fn test_engquist_osher_negative_speed_branch() {
        let field = FieldData::from_fn(7, 5, |x, _| 2.0 * x as f64);
        let (v, dt) = (-1.5, 0.2);
        let out = advance(
            &field,
            &VelocitySpec::Uniform(v),
            1.0,
            dt,
            AdvectionScheme::EngquistOsher,
        );

        // Dx = 2, Dy = 0 in the interior: |∇φ| = |Dx|, change is |V|·|Dx|·Δt
        let expected_change = 1.5 * 2.0 * 0.2;
        for y in 0..5 {
            for x in 1..6 {
                let change = out.get(x, y) - field.get(x, y);
                assert_relative_eq!(change.abs(), expected_change, epsilon = 1e-12);
                assert!(change > 0.0, "φ − V|∇φ|Δt with V < 0 raises φ");
            }
        }
    }

    #[test]
    fn test_upwind_branches_agree_on_magnitude() {
        for (dx, dy) in [(1.0, 0.0), (-0.5, 2.0), (0.0, -3.0), (0.3, 0.4)] {
            let pos = upwind_gradient_magnitude(dx, dy, 1.0);
            let neg = upwind_gradient_magnitude(dx, dy, -1.0);
            assert_relative_eq!(pos, f64::hypot(dx, dy), epsilon = 1e-12);
            assert_relative_eq!(neg, f64::hypot(dx, dy), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_engquist_osher_circle_expands() {
        let n = 21;
        let c = 10.0;
        let field = FieldData::from_fn(n, n, |x, y| {
            ((x as f64 - c).powi(2) + (y as f64 - c).powi(2)).sqrt() - 3.0
        });
        let out = advance(
            &field,
            &VelocitySpec::Uniform(1.0),
            1.0,
            0.1,
            AdvectionScheme::EngquistOsher,
        );

        // Just outside the front φ decreases: the surface moves outward
        let (tx, ty) = (14, 10);
        assert!(field.get(tx, ty) > 0.0);
        assert!(out.get(tx, ty) < field.get(tx, ty));
        assert!(out.summary().inside_cells >= field.summary().inside_cells);
    }

    #[test]
    fn test_input_is_not_modified() {
        let field = ramp_x(5, 5);
        let snapshot = field.clone();
        let _ = advance(
            &field,
            &VelocitySpec::Uniform(3.0),
            0.5,
            1.0,
            AdvectionScheme::EngquistOsher,
        );
        assert_eq!(field, snapshot);
    }

    #[test]
    #[should_panic(expected = "Velocity field is 3x3 but level set is 4x4")]
    fn test_velocity_shape_mismatch_panics() {
        let field = FieldData::new(4, 4);
        let velocity = VelocitySpec::Field(FieldData::new(3, 3));
        let _ = advance(&field, &velocity, 1.0, 1.0, AdvectionScheme::EngquistOsher);
    }

    #[test]
    fn test_empty_grid_advances_under_both_schemes() {
        for (width, height) in [(0, 3), (3, 0), (0, 0)] {
            let field = FieldData::new(width, height);
            for scheme in [AdvectionScheme::Simple, AdvectionScheme::EngquistOsher] {
                let out = advance(&field, &VelocitySpec::Uniform(1.0), 1.0, 1.0, scheme);
                assert_eq!(out.dimensions(), (width, height));
                assert!(out.data.is_empty());
            }
        }
    }

    #[test]
    fn test_scheme_labels() {
        assert_eq!(AdvectionScheme::Simple.to_string(), "simple_advance");
        assert_eq!(AdvectionScheme::EngquistOsher.label(), "engquist_osher");
    }
}
