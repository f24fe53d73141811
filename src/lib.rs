//! # ph5_motion
//!
//! Pythagorean-hodograph (PH) quintic curves and feed-rate planning along them.
//!
//! A PH curve's hodograph is the square of a complex polynomial, so its
//! speed is a polynomial and its arc length has an exact closed form. This
//! makes it cheap to move a tool along the curve at a planned velocity:
//! plan how arc length grows over time, then invert arc length back to the
//! curve parameter with a few Newton-Raphson steps per control tick.
//!
//! This library provides the following modules:
//! - `complex` for the complex number type used for points and vectors.
//! - `bernstein` for the Bernstein basis polynomials.
//! - `storage` for heap or fixed-capacity coefficient storage.
//! - `ph_curve` for the PH quintic spline and its position/speed/arc-length queries.
//! - `config` for the feed command (velocity limits, solver settings).
//! - `feed_plan` for classifying a motion into one of seven profile shapes.
//! - `feed_phase` for a single accelerate/cruise/decelerate phase.
//! - `ph_feed` for the feed profile and the time-to-parameter inversion.
//! - `feed_executor` for walking a feed profile in discrete ticks.
//!
//! ```
//! use ph5_motion::{Complex, Curve, FeedConfig, FeedProfile};
//!
//! // arc through (-1,1), (0,2), (1,1)
//! let z = [
//!     Complex::ZERO,
//!     Complex::new(1.124171968973597, 0.444771808762066),
//!     Complex::new(1.124171968973597, -0.444771808762066),
//! ];
//! let q = [Complex::new(-1.0, 1.0), Complex::new(0.0, 2.0), Complex::new(1.0, 1.0)];
//! let curve = Curve::new(&z, &q);
//! let feed = FeedProfile::new(&curve, FeedConfig::new(100.0, 0.01));
//!
//! let mut e = 0.0;
//! for k in 0..=100 {
//!     e = feed.ekt(e, k as f64 / 100.0);
//!     let _point = curve.r(e);
//! }
//! assert!(curve.r(e).approx_eq(Complex::new(1.0, 1.0), 1e-6));
//! ```

pub mod bernstein;
pub mod complex;
pub mod config;
pub mod error;
pub mod feed_executor;
pub mod feed_phase;
pub mod feed_plan;
pub mod ph_curve;
pub mod ph_feed;
pub mod storage;

// Re-export main structs for convenience:
pub use complex::Complex;
pub use config::FeedConfig;
pub use error::{CurveError, FeedError, StorageError};
pub use feed_executor::FeedExecutor;
pub use feed_phase::FeedPhase;
pub use feed_plan::{FeedPattern, FeedPlan};
pub use ph_curve::Curve;
pub use ph_feed::{FeedProfile, Inversion};
pub use storage::{Bounded, Embedded, Heap, Storage};
