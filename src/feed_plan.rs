use core::fmt;

use crate::config::FeedConfig;
use crate::error::FeedError;

/// The seven mutually exclusive ways a feed profile can be shaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeedPattern {
    /// `v_in == v_cruise == v_out`: constant velocity throughout.
    Cruise,
    /// Velocity change only, too short to finish the ramp: the ramp is
    /// scaled down to span the whole curve.
    AccelerateShort,
    /// Velocity change over the full ramp, then cruise.
    AccelerateCruise,
    /// Mirror of [`FeedPattern::AccelerateShort`] at the exit.
    DecelerateShort,
    /// Cruise, then the full exit ramp.
    CruiseDecelerate,
    /// Ramp up and down with no cruise in between.
    AccelerateDecelerate,
    /// Ramp up, cruise, ramp down.
    AccelerateCruiseDecelerate,
}

impl FeedPattern {
    /// Short tag: A, B1, B2, C1, C2, D1 or D2.
    pub fn code(&self) -> &'static str {
        match self {
            FeedPattern::Cruise => "A",
            FeedPattern::AccelerateShort => "B1",
            FeedPattern::AccelerateCruise => "B2",
            FeedPattern::DecelerateShort => "C1",
            FeedPattern::CruiseDecelerate => "C2",
            FeedPattern::AccelerateDecelerate => "D1",
            FeedPattern::AccelerateCruiseDecelerate => "D2",
        }
    }

    /// True when the profile contains no constant-velocity segment.
    pub fn is_short(&self) -> bool {
        matches!(
            self,
            FeedPattern::AccelerateShort
                | FeedPattern::DecelerateShort
                | FeedPattern::AccelerateDecelerate
        )
    }
}

impl fmt::Display for FeedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Phase distances, times and boundaries for traversing a path length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedPlan {
    pub pattern: FeedPattern,

    /// (v_in, v_cruise, v_out) after resolving and scaling the cruise velocity.
    pub vel: (f64, f64, f64),

    /// Path length being traversed.
    pub length: f64,

    /// (accel, cruise, decel) distances.
    pub dist: (f64, f64, f64),

    /// (accel, cruise, decel) durations.
    pub time: (f64, f64, f64),

    /// Total traversal time.
    pub duration: f64,

    /// Time fraction at which cruising starts.
    pub tau_cruise: f64,

    /// Time fraction at which deceleration starts.
    pub tau_decel: f64,
}

impl FeedPlan {
    /// Classifies the motion for a path of `length` and computes the phases.
    ///
    /// `s_max = v_max · tv_max / 2` is the distance of a full ramp from rest
    /// to `v_max`. When a ramp does not fit, the cruise velocity and ramp
    /// time are scaled by `sqrt(available / s_max)`.
    pub fn classify(length: f64, config: &FeedConfig) -> Result<Self, FeedError> {
        config.validate()?;

        let v_in = config.v_in;
        let v_out = config.v_out;
        let mut v_cruise = config.resolved_cruise();
        let tv_max = config.tv_max;
        let s_max = config.v_max * tv_max / 2.0;

        let (mut s_accel, mut t_accel) = (0.0, 0.0);
        let (mut s_decel, mut t_decel) = (0.0, 0.0);

        let pattern = if v_in == v_cruise && v_cruise == v_out {
            FeedPattern::Cruise
        } else if v_in != v_cruise && v_cruise == v_out {
            if s_max > length {
                let ratio = (length / s_max).sqrt();
                s_accel = length;
                t_accel = tv_max * ratio;
                v_cruise *= ratio;
                FeedPattern::AccelerateShort
            } else {
                s_accel = s_max;
                t_accel = tv_max;
                FeedPattern::AccelerateCruise
            }
        } else if v_in == v_cruise && v_cruise != v_out {
            if s_max > length {
                let ratio = (length / s_max).sqrt();
                s_decel = length;
                t_decel = tv_max * ratio;
                v_cruise *= ratio;
                FeedPattern::DecelerateShort
            } else {
                s_decel = s_max;
                t_decel = tv_max;
                FeedPattern::CruiseDecelerate
            }
        } else {
            if v_in != v_out {
                return Err(FeedError::AsymmetricProfile { v_in, v_out });
            }
            let half = length / 2.0;
            let pattern = if s_max > half {
                let ratio = (half / s_max).sqrt();
                s_accel = half;
                t_accel = tv_max * ratio;
                v_cruise *= ratio;
                FeedPattern::AccelerateDecelerate
            } else {
                s_accel = s_max;
                t_accel = tv_max;
                FeedPattern::AccelerateCruiseDecelerate
            };
            s_decel = s_accel;
            t_decel = t_accel;
            pattern
        };

        let s_cruise = length - s_accel - s_decel;
        let t_cruise = if s_cruise > 0.0 { s_cruise / v_cruise } else { 0.0 };
        let duration = t_accel + t_cruise + t_decel;
        let (tau_cruise, tau_decel) = if duration > 0.0 {
            (t_accel / duration, 1.0 - t_decel / duration)
        } else {
            (0.0, 1.0)
        };

        Ok(Self {
            pattern,
            vel: (v_in, v_cruise, v_out),
            length,
            dist: (s_accel, s_cruise, s_decel),
            time: (t_accel, t_cruise, t_decel),
            duration,
            tau_cruise,
            tau_decel,
        })
    }
}
