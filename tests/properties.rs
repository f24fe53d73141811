//! Invariants that hold for any well-formed PH curve and feed profile.

use ph5_motion::{Complex, Curve, FeedConfig, FeedError, FeedPattern, FeedProfile};

/// Builds a continuous curve from roots alone: each offset is the end point
/// of the previous segment.
fn chained_curve(z: &[Complex], start: Complex) -> Curve {
    let loose = Curve::new(z, &vec![Complex::ZERO; z.len()]);
    let mut q = vec![start];
    for i in 1..z.len() {
        let poly = loose.control_polygon(i);
        let end = q[i - 1] + (poly[5] - poly[0]);
        q.push(end);
    }
    Curve::new(z, &q)
}

fn s_curve() -> Curve {
    let z = [
        Complex::ZERO,
        Complex::new(1.0, 0.3),
        Complex::new(0.8, -0.4),
        Complex::new(1.2, 0.1),
        Complex::new(0.9, 0.5),
        Complex::new(1.1, -0.2),
    ];
    chained_curve(&z, Complex::new(2.0, -1.0))
}

#[test]
fn arc_length_endpoints_and_monotonicity() {
    let ph = s_curve();
    assert_eq!(ph.s(0.0), 0.0);
    assert_eq!(ph.s(1.0), ph.total_length());
    let mut prev = 0.0;
    for k in 0..=1000 {
        let s = ph.s(k as f64 / 1000.0);
        assert!(s >= prev, "s decreased at k={k}");
        prev = s;
    }
}

#[test]
fn knots_are_continuous() {
    let ph = s_curve();
    for i in 1..ph.segments() {
        let end = ph.segment_point(i, 1.0);
        let start = ph.segment_point(i + 1, 0.0);
        assert!(end.approx_eq(start, 1e-12), "knot {i}: {end} vs {start}");
    }
    // global parameter agrees with the segment view at every knot
    let n = ph.segments();
    for i in 0..=n {
        let p = i as f64 / n as f64;
        let seg = i.clamp(1, n);
        let e = if i == 0 { 0.0 } else { 1.0 };
        assert!(ph.r(p).approx_eq(ph.segment_point(seg, e), 1e-12));
    }
}

#[test]
fn arc_length_is_continuous_across_knots() {
    let ph = s_curve();
    let n = ph.segments() as f64;
    for i in 1..ph.segments() {
        let p = i as f64 / n;
        let below = ph.s(p - 1e-12);
        let above = ph.s(p + 1e-12);
        assert!((above - below).abs() < 1e-9);
    }
}

#[test]
fn speed_matches_arc_length_derivative() {
    let ph = s_curve();
    let h = 1e-6;
    for k in 1..20 {
        let p = k as f64 / 20.0 + 0.013;
        let fd = (ph.s(p + h) - ph.s(p - h)) / (2.0 * h);
        let sigma = ph.sigma(p);
        assert!((fd - sigma).abs() < 1e-4 * sigma.max(1.0), "p={p} fd={fd} sigma={sigma}");
        assert_eq!(sigma, ph.rprime(p).modulus());
    }
}

#[test]
fn hodograph_matches_position_derivative() {
    let ph = s_curve();
    let h = 1e-6;
    for &p in &[0.05, 0.31, 0.5, 0.77, 0.95] {
        let fd = (ph.r(p + h) - ph.r(p - h)) / (2.0 * h);
        assert!(fd.approx_eq(ph.rprime(p), 1e-4), "p={p}");
    }
}

#[test]
fn inversion_round_trip() {
    let ph = s_curve();
    let feed = FeedProfile::new(&ph, FeedConfig::new(50.0, 0.05));
    let mut e = 0.0;
    for k in 0..=500 {
        let tau = k as f64 / 500.0;
        let inv = feed.solve(e, tau);
        e = inv.e;
        if inv.converged {
            assert!((ph.s(e) - feed.ft(tau)).abs() < 1e-7, "tau={tau}");
        }
    }
    assert_eq!(feed.shortfalls(), 0);
    assert!((e - 1.0).abs() < 1e-9);
}

#[test]
fn every_pattern_is_reachable() {
    let ph = s_curve();
    let s = ph.total_length();
    // ramp from rest to 100 in tv_max covers 50·tv_max
    let long = 0.1 * s / 50.0;
    let short = 10.0 * s / 50.0;
    let cases = [
        (long, (60.0, 60.0, 60.0), FeedPattern::Cruise),
        (short, (0.0, 100.0, 100.0), FeedPattern::AccelerateShort),
        (long, (0.0, 100.0, 100.0), FeedPattern::AccelerateCruise),
        (short, (100.0, 100.0, 0.0), FeedPattern::DecelerateShort),
        (long, (100.0, 100.0, 0.0), FeedPattern::CruiseDecelerate),
        (short, (0.0, 100.0, 0.0), FeedPattern::AccelerateDecelerate),
        (long, (0.0, 100.0, 0.0), FeedPattern::AccelerateCruiseDecelerate),
    ];
    for (tv_max, (v_in, v_cruise, v_out), pattern) in cases {
        let cfg = FeedConfig::new(100.0, tv_max).with_velocities(v_in, v_cruise, v_out);
        let feed = FeedProfile::new(&ph, cfg);
        assert_eq!(feed.pattern(), pattern);
        assert!((feed.ft(1.0) - s).abs() < 1e-9, "{pattern}");
        let e = feed.ekt(0.0, 1.0);
        assert!((e - 1.0).abs() < 1e-6, "{pattern}: e={e}");
    }
}

#[test]
fn asymmetric_command_is_rejected() {
    let ph = s_curve();
    let cfg = FeedConfig::new(100.0, 0.01).with_velocities(10.0, 80.0, 20.0);
    assert_eq!(
        FeedProfile::try_new(&ph, cfg).unwrap_err(),
        FeedError::AsymmetricProfile { v_in: 10.0, v_out: 20.0 }
    );
}

#[test]
fn minimum_curve_is_finite() {
    let z = [Complex::ZERO, Complex::new(1.0, 0.5), Complex::new(0.7, -0.2)];
    let ph = chained_curve(&z, Complex::ZERO);
    assert_eq!(ph.segments(), 2);
    for k in 0..=50 {
        let p = k as f64 / 50.0;
        let r = ph.r(p);
        assert!(r.re.is_finite() && r.im.is_finite());
        assert!(ph.s(p).is_finite());
        assert!(ph.sigma(p).is_finite());
    }
    assert!(ph.segment_point(1, 1.0).approx_eq(ph.segment_point(2, 0.0), 1e-12));
}

#[test]
fn inversion_survives_zero_speed_points() {
    let a = Complex::new(1.0, 0.5);
    // zero of the quadratic root at the start, and mid-curve at p = 0.5
    let start_cusp = chained_curve(&[Complex::ZERO, a, a * 3.0], Complex::ZERO);
    let mid_cusp = chained_curve(&[Complex::ZERO, a, Complex::ZERO, -a], Complex::ZERO);
    assert_eq!(start_cusp.sigma(0.0), 0.0);
    assert!(mid_cusp.sigma(0.5) < 1e-12);

    for ph in [&start_cusp, &mid_cusp] {
        let feed = FeedProfile::new(ph, FeedConfig::new(100.0, 0.01));
        let mut e = 0.0;
        for k in 0..=400 {
            let tau = k as f64 / 400.0;
            e = feed.ekt(e, tau);
            assert!(e.is_finite() && (0.0..=1.0).contains(&e), "tau={tau} e={e}");
            assert!(ph.s(e).is_finite());
        }
        assert!((ph.s(e) - ph.total_length()).abs() < 1e-6);
    }

    let feed = FeedProfile::new(&start_cusp, FeedConfig::new(100.0, 0.01));
    let _ = feed.ekt(0.0, 0.5);
    assert!(feed.shortfalls() >= 1);
}
