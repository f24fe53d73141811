use crate::error::FeedError;

/// The command a motion controller issues to traverse a curve.
///
/// Velocities are in curve length units per second. A `v_cruise` of zero
/// means "unset" and resolves to `v_max` when the profile is built.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeedConfig {
    /// Maximum velocity.
    pub v_max: f64,

    /// Time to accelerate from rest to `v_max` (seconds).
    pub tv_max: f64,

    /// Velocity when entering the curve.
    pub v_in: f64,

    /// Target cruise velocity, 0 for `v_max`.
    pub v_cruise: f64,

    /// Velocity when leaving the curve.
    pub v_out: f64,

    /// Newton-Raphson stop tolerance on the parameter step.
    pub epsilon: f64,

    /// Newton-Raphson iteration cap.
    pub iterations: u16,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            v_max: 200.0,
            tv_max: 0.1,
            v_in: 0.0,
            v_cruise: 0.0,
            v_out: 0.0,
            epsilon: 1e-7,
            iterations: 10,
        }
    }
}

impl FeedConfig {
    /// Creates a config from rest to rest, cruising at `v_max`.
    pub fn new(v_max: f64, tv_max: f64) -> Self {
        Self {
            v_max,
            tv_max,
            ..Self::default()
        }
    }

    /// Sets entry, cruise and exit velocities.
    pub fn with_velocities(mut self, v_in: f64, v_cruise: f64, v_out: f64) -> Self {
        self.v_in = v_in;
        self.v_cruise = v_cruise;
        self.v_out = v_out;
        self
    }

    pub fn with_entry(mut self, v_in: f64) -> Self {
        self.v_in = v_in;
        self
    }

    pub fn with_cruise(mut self, v_cruise: f64) -> Self {
        self.v_cruise = v_cruise;
        self
    }

    pub fn with_exit(mut self, v_out: f64) -> Self {
        self.v_out = v_out;
        self
    }

    /// Overrides the Newton-Raphson tolerance and iteration cap.
    pub fn with_solver(mut self, epsilon: f64, iterations: u16) -> Self {
        self.epsilon = epsilon;
        self.iterations = iterations;
        self
    }

    /// Cruise velocity with the "unset" zero resolved to `v_max`.
    pub fn resolved_cruise(&self) -> f64 {
        if self.v_cruise == 0.0 {
            self.v_max
        } else {
            self.v_cruise
        }
    }

    /// Checks the limits and that every velocity lies in `[0, v_max]`.
    pub fn validate(&self) -> Result<(), FeedError> {
        if !(self.v_max.is_finite() && self.v_max > 0.0) {
            return Err(FeedError::InvalidMaxVelocity(self.v_max));
        }
        if !(self.tv_max.is_finite() && self.tv_max > 0.0) {
            return Err(FeedError::InvalidRampTime(self.tv_max));
        }
        for (name, value) in [
            ("entry", self.v_in),
            ("cruise", self.v_cruise),
            ("exit", self.v_out),
        ] {
            if !(0.0..=self.v_max).contains(&value) {
                return Err(FeedError::VelocityOutOfRange {
                    name,
                    value,
                    v_max: self.v_max,
                });
            }
        }
        if self.iterations == 0 || !(self.epsilon > 0.0) {
            return Err(FeedError::InvalidSolver);
        }
        Ok(())
    }
}
