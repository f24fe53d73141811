use core::sync::atomic::{AtomicU32, Ordering};

use tracing::debug;

use crate::complex::Complex;
use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::feed_phase::FeedPhase;
use crate::feed_plan::{FeedPattern, FeedPlan};
use crate::ph_curve::Curve;
use crate::storage::{Heap, Storage};

/// Result of one Newton-Raphson inversion `s(E) = F(tau)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inversion {
    /// Curve parameter estimate, clamped to `[0, 1]`.
    pub e: f64,

    /// Iterations performed.
    pub iterations: u16,

    /// Last parameter step.
    pub delta: f64,

    /// False when the iteration cap was reached before the step fell below tolerance.
    pub converged: bool,
}

/// A bounded-acceleration feed-rate profile along a [`Curve`].
///
/// The profile plans how arc length is covered over time (ramp up, cruise,
/// ramp down) and maps an elapsed-time fraction `tau ∈ [0, 1]` back to the
/// curve parameter through [`FeedProfile::ekt`]. It borrows the curve and
/// cannot outlive it.
#[derive(Debug)]
pub struct FeedProfile<'a, K: Storage = Heap> {
    /// Curve being traversed.
    curve: &'a Curve<K>,

    /// Command limits as requested.
    config: FeedConfig,

    /// Classification, distances and times.
    plan: FeedPlan,

    /// (accel, cruise, decel)
    phases: [FeedPhase; 3],

    /// Number of inversions that hit the iteration cap.
    shortfalls: AtomicU32,
}

impl<'a, K: Storage> FeedProfile<'a, K> {
    /// Plans a traversal of `curve`. Panics when `config` breaks the
    /// command contract, see [`FeedProfile::try_new`].
    pub fn new(curve: &'a Curve<K>, config: FeedConfig) -> Self {
        Self::try_new(curve, config).unwrap_or_else(|err| panic!("invalid feed command: {err}"))
    }

    /// Plans a traversal of `curve`.
    ///
    /// Requires `v_max > 0`, `tv_max > 0`, every velocity in `[0, v_max]`,
    /// and `v_in == v_out` when both differ from the cruise velocity.
    pub fn try_new(curve: &'a Curve<K>, config: FeedConfig) -> Result<Self, FeedError> {
        let plan = FeedPlan::classify(curve.total_length(), &config)?;

        let (v_in, v_cruise, v_out) = plan.vel;
        let (t_accel, t_cruise, t_decel) = plan.time;
        let (s_accel, s_cruise, _) = plan.dist;
        let phases = [
            FeedPhase::new(t_accel, 0.0, v_in, v_cruise),
            FeedPhase::new(t_cruise, s_accel, v_cruise, v_cruise),
            FeedPhase::new(t_decel, s_accel + s_cruise, v_cruise, v_out),
        ];

        debug!(
            pattern = plan.pattern.code(),
            length = plan.length,
            duration = plan.duration,
            t_accel,
            t_cruise,
            t_decel,
            v_cruise,
            "planned feed profile"
        );

        Ok(Self {
            curve,
            config,
            plan,
            phases,
            shortfalls: AtomicU32::new(0),
        })
    }

    /// Arc length covered at elapsed-time fraction `tau ∈ [0, 1]`.
    #[doc(alias = "Ft")]
    pub fn ft(&self, tau: f64) -> f64 {
        assert!((0.0..=1.0).contains(&tau), "time fraction {tau} outside [0, 1]");
        let [accel, cruise, decel] = &self.phases;
        let elapsed = tau * self.plan.duration;
        if tau < self.plan.tau_cruise {
            let t = if tau > 0.0 { elapsed / accel.time } else { 0.0 };
            accel.distance(t)
        } else if tau < self.plan.tau_decel {
            let t = (elapsed - accel.time) / cruise.time;
            cruise.distance(t.clamp(0.0, 1.0))
        } else {
            let t = if tau >= 1.0 {
                1.0
            } else {
                (elapsed - accel.time - cruise.time) / decel.time
            };
            decel.distance(t.clamp(0.0, 1.0))
        }
    }

    /// Curve parameter reached at elapsed-time fraction `tau`, warm-started
    /// from the previous estimate `e_prev`.
    ///
    /// Callers sample with increasing `tau`. The result is always usable;
    /// see [`FeedProfile::solve`] for the convergence diagnostic.
    #[doc(alias = "Ekt")]
    pub fn ekt(&self, e_prev: f64, tau: f64) -> f64 {
        self.solve(e_prev, tau).e
    }

    /// Newton-Raphson solve of `s(E) = ft(tau)` from `e_prev`.
    ///
    /// Each step is `E += (ft(tau) - s(E)) / sigma(E)`, clamped to `[0, 1]`.
    /// Stops once `|ΔE| < epsilon` or after `iterations` steps, returning the
    /// last estimate either way.
    ///
    /// Where the parametric speed vanishes (a zero of the quadratic root) the
    /// Newton step is undefined; the solver then takes a chord step
    /// `residual / S` instead and records the inversion as a shortfall.
    pub fn solve(&self, e_prev: f64, tau: f64) -> Inversion {
        let target = self.ft(tau);
        let mut e = if e_prev.is_nan() { 0.0 } else { e_prev.clamp(0.0, 1.0) };
        let mut delta = 0.0;
        let mut degenerate = false;
        let mut result = None;
        for iteration in 1..=self.config.iterations {
            let residual = target - self.curve.s(e);
            delta = if residual == 0.0 {
                0.0
            } else {
                residual / self.curve.sigma(e)
            };
            if !delta.is_finite() {
                degenerate = true;
                debug!(tau, e, "zero parametric speed, taking a chord step");
                delta = residual / self.curve.total_length();
                if !delta.is_finite() {
                    delta = 0.0;
                }
            }
            e = (e + delta).clamp(0.0, 1.0);
            if delta.abs() < self.config.epsilon {
                result = Some(Inversion {
                    e,
                    iterations: iteration,
                    delta,
                    converged: true,
                });
                break;
            }
        }
        let inversion = result.unwrap_or_else(|| {
            debug!(tau, e, delta, "ekt() hit the iteration cap");
            Inversion {
                e,
                iterations: self.config.iterations,
                delta,
                converged: false,
            }
        });
        if degenerate || !inversion.converged {
            self.shortfalls.fetch_add(1, Ordering::Relaxed);
        }
        inversion
    }

    /// Number of inversions that stopped at the iteration cap or crossed a
    /// zero-speed point.
    pub fn shortfalls(&self) -> u32 {
        self.shortfalls.load(Ordering::Relaxed)
    }

    pub fn curve(&self) -> &'a Curve<K> {
        self.curve
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn plan(&self) -> &FeedPlan {
        &self.plan
    }

    /// Phases in order (accelerate, cruise, decelerate).
    pub fn phases(&self) -> &[FeedPhase; 3] {
        &self.phases
    }

    pub fn pattern(&self) -> FeedPattern {
        self.plan.pattern
    }

    /// Feed velocity at time fraction `tau`.
    pub fn velocity(&self, tau: f64) -> f64 {
        assert!((0.0..=1.0).contains(&tau), "time fraction {tau} outside [0, 1]");
        let [accel, cruise, decel] = &self.phases;
        let elapsed = tau * self.plan.duration;
        if tau < self.plan.tau_cruise {
            accel.velocity(elapsed / accel.time)
        } else if tau < self.plan.tau_decel {
            cruise.vel_in
        } else if decel.time > 0.0 {
            let t = (elapsed - accel.time - cruise.time) / decel.time;
            decel.velocity(t.clamp(0.0, 1.0))
        } else {
            decel.vel_out
        }
    }

    /// Position on the curve at parameter `e`.
    pub fn r(&self, e: f64) -> Complex {
        self.curve.r(e)
    }

    /// Arc length at parameter `e`.
    pub fn s(&self, e: f64) -> f64 {
        self.curve.s(e)
    }

    /// Parametric speed at parameter `e`.
    pub fn sigma(&self, e: f64) -> f64 {
        self.curve.sigma(e)
    }

    /// Total traversal time.
    pub fn t_s(&self) -> f64 {
        self.plan.duration
    }

    pub fn t_accel(&self) -> f64 {
        self.plan.time.0
    }

    pub fn t_cruise(&self) -> f64 {
        self.plan.time.1
    }

    pub fn t_decel(&self) -> f64 {
        self.plan.time.2
    }

    pub fn s_accel(&self) -> f64 {
        self.plan.dist.0
    }

    pub fn s_cruise(&self) -> f64 {
        self.plan.dist.1
    }

    pub fn s_decel(&self) -> f64 {
        self.plan.dist.2
    }

    pub fn tau_cruise(&self) -> f64 {
        self.plan.tau_cruise
    }

    pub fn tau_decel(&self) -> f64 {
        self.plan.tau_decel
    }

    /// Total path length.
    pub fn total_length(&self) -> f64 {
        self.plan.length
    }

    pub fn v_in(&self) -> f64 {
        self.plan.vel.0
    }

    /// Cruise velocity after resolving zero and scaling short ramps.
    pub fn v_cruise(&self) -> f64 {
        self.plan.vel.1
    }

    pub fn v_out(&self) -> f64 {
        self.plan.vel.2
    }

    pub fn v_max(&self) -> f64 {
        self.config.v_max
    }

    pub fn tv_max(&self) -> f64 {
        self.config.tv_max
    }
}
