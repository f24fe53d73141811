use thiserror::Error;

use crate::complex::Complex;

/// Failure to append to a fixed-capacity sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage capacity of {capacity} elements exceeded")]
    CapacityExceeded { capacity: usize },
}

/// Violations of the curve construction contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// `z` and `q` must have the same length.
    #[error("root and offset sequences differ in length ({roots} roots, {offsets} offsets)")]
    LengthMismatch { roots: usize, offsets: usize },

    /// At least three roots (two segments) are required.
    #[error("a PH curve needs at least 3 roots, got {0}")]
    TooFewRoots(usize),

    /// `z[0]` is a placeholder and must be zero.
    #[error("first root must be zero, got {0:.6}")]
    NonZeroFirstRoot(Complex),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Violations of the feed-rate command contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    #[error("maximum velocity must be positive and finite, got {0}")]
    InvalidMaxVelocity(f64),

    #[error("time to reach maximum velocity must be positive and finite, got {0}")]
    InvalidRampTime(f64),

    /// A velocity lies outside `[0, v_max]`.
    #[error("{name} velocity {value} is outside [0, {v_max}]")]
    VelocityOutOfRange {
        name: &'static str,
        value: f64,
        v_max: f64,
    },

    /// Accelerate-cruise-decelerate profiles need equal entry and exit velocity.
    #[error("entry velocity {v_in} and exit velocity {v_out} must match when both differ from cruise velocity")]
    AsymmetricProfile { v_in: f64, v_out: f64 },

    #[error("Newton-Raphson needs at least one iteration and a positive tolerance")]
    InvalidSolver,
}
