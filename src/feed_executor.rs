use crate::complex::Complex;
use crate::ph_feed::FeedProfile;
use crate::storage::{Heap, Storage};

/// FeedExecutor walks a [`FeedProfile`] in discrete ticks at a fixed
/// frequency, producing the curve parameter and position for each tick.
#[derive(Debug)]
pub struct FeedExecutor<'p, 'a, K: Storage = Heap> {
    /// Profile being traversed
    feed: &'p FeedProfile<'a, K>,

    /// Update frequency in Hz
    freq: f64,

    /// Current time-step in discrete ticks
    time: u32,

    /// Duration of the traversal in ticks
    duration: u32,

    /// Current curve parameter
    e: f64,

    /// Current time fraction
    tau: f64,

    /// Current position
    pos: Complex,
}

impl<'p, 'a, K: Storage> FeedExecutor<'p, 'a, K> {
    /// Creates a new executor ticking at `freq` Hz. Panics if `freq` is not positive.
    pub fn new(feed: &'p FeedProfile<'a, K>, freq: f64) -> Self {
        assert!(freq.is_finite() && freq > 0.0, "tick frequency must be positive, got {freq}");
        let duration = ((feed.t_s() * freq).ceil() as u32).max(1);
        Self {
            feed,
            freq,
            time: 0,
            duration,
            e: 0.0,
            tau: 0.0,
            pos: feed.r(0.0),
        }
    }

    /// Advances one tick. Does nothing once the traversal is complete.
    pub fn tick(&mut self) {
        if self.is_done() {
            return;
        }
        self.time += 1;
        self.tau = (self.time as f64 / self.duration as f64).min(1.0);
        self.e = self.feed.ekt(self.e, self.tau);
        self.pos = self.feed.r(self.e);
    }

    /// Returns to the start of the curve.
    pub fn reset(&mut self) {
        self.time = 0;
        self.tau = 0.0;
        self.e = 0.0;
        self.pos = self.feed.r(0.0);
    }

    /// Checks if the last tick has been reached.
    pub fn is_done(&self) -> bool {
        self.time >= self.duration
    }

    /// Returns the current time fraction.
    pub fn get_tau(&self) -> f64 {
        self.tau
    }

    /// Returns the current curve parameter.
    pub fn get_e(&self) -> f64 {
        self.e
    }

    /// Returns the current position.
    pub fn get_pos(&self) -> Complex {
        self.pos
    }

    /// Returns the arc length covered so far.
    pub fn get_s(&self) -> f64 {
        self.feed.s(self.e)
    }

    /// Returns the elapsed time in seconds.
    pub fn get_time(&self) -> f64 {
        self.time as f64 / self.freq
    }

    /// Returns the number of ticks the traversal spans.
    pub fn get_duration(&self) -> u32 {
        self.duration
    }
}

impl<K: Storage> Iterator for FeedExecutor<'_, '_, K> {
    type Item = (f64, Complex);

    /// Ticks and yields `(tau, position)` until the traversal completes.
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }
        self.tick();
        Some((self.tau, self.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::ph_curve::Curve;

    fn arc() -> Curve {
        let z = [
            Complex::ZERO,
            Complex::new(1.124171968973597, 0.444771808762066),
            Complex::new(1.124171968973597, -0.444771808762066),
        ];
        let q = [
            Complex::new(-1.0, 1.0),
            Complex::new(0.0, 2.0),
            Complex::new(1.0, 1.0),
        ];
        Curve::new(&z, &q)
    }

    #[test]
    fn walks_from_start_to_end() {
        let ph = arc();
        let feed = FeedProfile::new(&ph, FeedConfig::new(100.0, 0.01));
        let mut exec = FeedExecutor::new(&feed, 10_000.0);
        assert_eq!(exec.get_duration(), 406);
        assert!(exec.get_pos().approx_eq(Complex::new(-1.0, 1.0), 1e-12));

        let mut last_s = 0.0;
        while !exec.is_done() {
            exec.tick();
            assert!(exec.get_s() >= last_s - 1e-9);
            last_s = exec.get_s();
        }
        assert_eq!(exec.get_tau(), 1.0);
        assert!(exec.get_pos().approx_eq(Complex::new(1.0, 1.0), 1e-6));
        assert!((exec.get_time() - 0.0406).abs() < 1e-12);

        // further ticks hold the final state
        exec.tick();
        assert_eq!(exec.get_tau(), 1.0);
    }

    #[test]
    fn iterator_yields_every_tick() {
        let ph = arc();
        let feed = FeedProfile::new(&ph, FeedConfig::new(100.0, 0.01));
        let exec = FeedExecutor::new(&feed, 1_000.0);
        let samples: Vec<_> = exec.collect();
        assert_eq!(samples.len(), 41);
        let (tau, pos) = samples[samples.len() - 1];
        assert_eq!(tau, 1.0);
        assert!(pos.approx_eq(Complex::new(1.0, 1.0), 1e-6));
    }

    #[test]
    fn reset_restarts_traversal() {
        let ph = arc();
        let feed = FeedProfile::new(&ph, FeedConfig::new(100.0, 0.01));
        let mut exec = FeedExecutor::new(&feed, 1_000.0);
        for _ in 0..10 {
            exec.tick();
        }
        assert!(exec.get_e() > 0.0);
        exec.reset();
        assert_eq!(exec.get_e(), 0.0);
        assert_eq!(exec.get_tau(), 0.0);
        assert!(!exec.is_done());
    }

    #[test]
    #[should_panic(expected = "tick frequency")]
    fn rejects_zero_frequency() {
        let ph = arc();
        let feed = FeedProfile::new(&ph, FeedConfig::new(100.0, 0.01));
        let _ = FeedExecutor::new(&feed, 0.0);
    }
}
