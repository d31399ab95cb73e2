//! CPU level set solver with ping-pong buffers
//!
//! Holds the current level set and a back buffer of the same size. Each step
//! reads the front buffer, writes the back buffer, then swaps, so consecutive
//! steps never alias and no per-step allocation is needed.

use super::fields::FieldData;
use super::level_set::{step_engquist_osher_cpu, AdvectionScheme, LevelSetParams, VelocitySpec};
use tracing::debug;

/// Multi-step level set solver
///
/// The velocity field is fixed for the lifetime of a run; call
/// [`CpuLevelSetSolver::update_velocity`] to change it between steps.
pub struct CpuLevelSetSolver {
    // Ping-pong buffers (read from one, write to other, then swap)
    phi: FieldData,
    phi_back: FieldData,

    velocity: FieldData,
    scheme: AdvectionScheme,
    spacing: f64,

    steps_taken: usize,
    elapsed: f64,
}

impl CpuLevelSetSolver {
    /// Create a solver for an initial level set
    ///
    /// # Arguments
    ///
    /// * `phi` - Initial level set field
    /// * `velocity` - Normal speed, uniform or per cell
    /// * `spacing` - Grid spacing h
    /// * `scheme` - Integration scheme used by every step
    ///
    /// # Panics
    ///
    /// Panics if a per-cell velocity field does not match `phi`
    #[must_use]
    pub fn new(
        phi: FieldData,
        velocity: &VelocitySpec,
        spacing: f64,
        scheme: AdvectionScheme,
    ) -> Self {
        let (width, height) = phi.dimensions();
        Self {
            phi_back: FieldData::new(width, height),
            velocity: velocity.to_field(width, height),
            phi,
            scheme,
            spacing,
            steps_taken: 0,
            elapsed: 0.0,
        }
    }

    /// Replace the velocity field
    ///
    /// # Panics
    ///
    /// Panics if a per-cell velocity field does not match the level set
    pub fn update_velocity(&mut self, velocity: &VelocitySpec) {
        self.velocity = velocity.to_field(self.phi.width, self.phi.height);
    }

    /// Perform one timestep
    pub fn step(&mut self, dt: f64) {
        match self.scheme {
            AdvectionScheme::Simple => {
                for ((out, &phi), &v) in self
                    .phi_back
                    .as_mut_slice()
                    .iter_mut()
                    .zip(self.phi.as_slice())
                    .zip(self.velocity.as_slice())
                {
                    *out = phi - v * dt;
                }
            }
            AdvectionScheme::EngquistOsher => {
                let params = LevelSetParams {
                    dt,
                    spacing: self.spacing,
                };
                step_engquist_osher_cpu(&self.phi, &self.velocity, &mut self.phi_back, params);
            }
        }

        // Swap buffers
        std::mem::swap(&mut self.phi, &mut self.phi_back);
        self.steps_taken += 1;
        self.elapsed += dt;
    }

    /// Advance by `duration` split into `substeps` equal steps
    ///
    /// `substeps == 0` leaves the field untouched.
    pub fn run(&mut self, duration: f64, substeps: usize) {
        if substeps == 0 {
            return;
        }
        let dt = duration / substeps as f64;
        debug!(
            scheme = %self.scheme,
            duration,
            substeps,
            dt,
            "running level set solver"
        );
        for _ in 0..substeps {
            self.step(dt);
        }
    }

    /// Current level set field
    #[must_use]
    pub fn level_set(&self) -> &FieldData {
        &self.phi
    }

    /// Consume the solver and return the current level set
    #[must_use]
    pub fn into_level_set(self) -> FieldData {
        self.phi
    }

    /// Number of steps performed so far
    #[must_use]
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Total simulated time so far
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::level_set::advance;
    use approx::assert_relative_eq;

    fn circle(n: usize) -> FieldData {
        let c = (n / 2) as f64;
        FieldData::from_fn(n, n, |x, y| {
            ((x as f64 - c).powi(2) + (y as f64 - c).powi(2)).sqrt() - 4.0
        })
    }

    #[test]
    fn test_single_step_matches_advance() {
        for scheme in [AdvectionScheme::Simple, AdvectionScheme::EngquistOsher] {
            let phi = circle(17);
            let velocity = VelocitySpec::Uniform(-2.0);
            let expected = advance(&phi, &velocity, 0.5, 0.3, scheme);

            let mut solver = CpuLevelSetSolver::new(phi, &velocity, 0.5, scheme);
            solver.run(0.3, 1);

            assert_eq!(solver.level_set(), &expected);
            assert_eq!(solver.steps_taken(), 1);
        }
    }

    #[test]
    fn test_steps_are_sequential() {
        let phi = circle(15);
        let velocity = VelocitySpec::Uniform(1.0);
        let scheme = AdvectionScheme::EngquistOsher;

        let first = advance(&phi, &velocity, 1.0, 0.1, scheme);
        let second = advance(&first, &velocity, 1.0, 0.1, scheme);

        let mut solver = CpuLevelSetSolver::new(phi, &velocity, 1.0, scheme);
        solver.step(0.1);
        solver.step(0.1);

        assert_eq!(solver.level_set(), &second);
        assert_relative_eq!(solver.elapsed(), 0.2);
    }

    #[test]
    fn test_simple_substeps_sum_to_duration() {
        let phi = FieldData::with_value(4, 4, 5.0);
        let mut solver =
            CpuLevelSetSolver::new(phi, &VelocitySpec::Uniform(2.0), 1.0, AdvectionScheme::Simple);
        solver.run(1.0, 4);
        assert_eq!(solver.steps_taken(), 4);
        assert!(solver
            .into_level_set()
            .data
            .iter()
            .all(|&v| (v - 3.0).abs() < 1e-12));
    }

    #[test]
    fn test_zero_substeps_is_noop() {
        let phi = circle(9);
        let snapshot = phi.clone();
        let mut solver = CpuLevelSetSolver::new(
            phi,
            &VelocitySpec::Uniform(1.0),
            1.0,
            AdvectionScheme::EngquistOsher,
        );
        solver.run(1.0, 0);
        assert_eq!(solver.level_set(), &snapshot);
        assert_eq!(solver.steps_taken(), 0);
    }

    #[test]
    fn test_update_velocity() {
        let phi = FieldData::with_value(3, 3, 1.0);
        let mut solver =
            CpuLevelSetSolver::new(phi, &VelocitySpec::Uniform(0.0), 1.0, AdvectionScheme::Simple);
        solver.step(1.0);
        solver.update_velocity(&VelocitySpec::Field(FieldData::with_value(3, 3, 0.5)));
        solver.step(1.0);
        assert!(solver.level_set().data.iter().all(|&v| v == 0.5));
    }
}
