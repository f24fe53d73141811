use crate::bernstein::basis6;

/// One phase (accelerate, cruise or decelerate) of a feed profile.
///
/// The velocity over the phase is a quintic Bernstein blend with three
/// control points at the entry velocity and three at the exit velocity, so
/// it starts and ends with zero acceleration. Its integral, the distance
/// covered, is a degree-6 Bernstein polynomial with coefficients `f`.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct FeedPhase {
    /// Phase duration (seconds).
    pub time: f64,

    /// Distance covered before the phase starts.
    pub pos: f64,

    /// Entry velocity.
    pub vel_in: f64,

    /// Exit velocity.
    pub vel_out: f64,

    /// Cumulative velocity control-point sums `F_k`, `k = 0..=6`.
    pub f: [f64; 7],
}

impl FeedPhase {
    /// Creates a phase lasting `time` that starts at distance `pos`.
    pub fn new(time: f64, pos: f64, vel_in: f64, vel_out: f64) -> Self {
        let mut f = [0.0; 7];
        for k in 1..7 {
            let v = if k - 1 < 3 { vel_in } else { vel_out };
            f[k] = f[k - 1] + v;
        }
        Self {
            time,
            pos,
            vel_in,
            vel_out,
            f,
        }
    }

    /// Distance covered during the phase, `time · (vel_in + vel_out) / 2`.
    pub fn length(&self) -> f64 {
        self.f[6] * self.time / 6.0
    }

    /// Cumulative distance at local time fraction `t ∈ [0, 1]`.
    ///
    /// A zero-duration phase contributes nothing beyond `pos`.
    pub fn distance(&self, t: f64) -> f64 {
        if self.time <= 0.0 {
            return self.pos;
        }
        let b = basis6(t);
        let sum: f64 = self.f.iter().zip(b.iter()).map(|(f, b)| f * b).sum();
        sum * self.time / 6.0 + self.pos
    }

    /// Velocity at local time fraction `t ∈ [0, 1]`.
    pub fn velocity(&self, t: f64) -> f64 {
        // derivative of the degree-6 blend: a quintic over the V(j) controls
        let t1 = 1.0 - t;
        let b = [
            t1.powi(5),
            5.0 * t * t1.powi(4),
            10.0 * t * t * t1.powi(3),
            10.0 * t.powi(3) * t1 * t1,
            5.0 * t.powi(4) * t1,
            t.powi(5),
        ];
        let lo: f64 = b[..3].iter().sum();
        let hi: f64 = b[3..].iter().sum();
        self.vel_in * lo + self.vel_out * hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_coefficients() {
        let phase = FeedPhase::new(1.0, 0.0, 2.0, 5.0);
        assert_eq!(phase.f, [0.0, 2.0, 4.0, 6.0, 11.0, 16.0, 21.0]);
    }

    #[test]
    fn distance_endpoints() {
        let phase = FeedPhase::new(0.01, 3.0, 0.0, 100.0);
        assert_eq!(phase.distance(0.0), 3.0);
        assert!((phase.distance(1.0) - 3.5).abs() < 1e-12);
        assert!((phase.length() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn constant_velocity_is_linear() {
        let phase = FeedPhase::new(2.0, 1.0, 3.0, 3.0);
        for &t in &[0.0, 0.25, 0.5, 0.9, 1.0] {
            assert!((phase.distance(t) - (1.0 + 6.0 * t)).abs() < 1e-12);
            assert!((phase.velocity(t) - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn symmetric_ramp_reaches_half_distance_at_midpoint() {
        let phase = FeedPhase::new(1.0, 0.0, 0.0, 10.0);
        assert!((phase.velocity(0.5) - 5.0).abs() < 1e-12);
        assert_eq!(phase.velocity(0.0), 0.0);
        assert!((phase.velocity(1.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn zero_duration_phase_is_flat() {
        let phase = FeedPhase::new(0.0, 7.0, 4.0, 9.0);
        assert_eq!(phase.distance(0.3), 7.0);
        assert_eq!(phase.length(), 0.0);
    }
}
