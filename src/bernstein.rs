//! Bernstein basis polynomials of degree 5 (curve position, arc length)
//! and degree 6 (feed distance).

/// Binomial coefficients C(5, k).
pub const CHOOSE5: [f64; 6] = [1.0, 5.0, 10.0, 10.0, 5.0, 1.0];

/// Binomial coefficients C(6, k).
pub const CHOOSE6: [f64; 7] = [1.0, 6.0, 15.0, 20.0, 15.0, 6.0, 1.0];

/// `C(n,k) t^k (1-t)^(n-k)` where `n = choose.len() - 1`.
#[inline]
fn bernstein(choose: &[f64], k: usize, t: f64) -> f64 {
    let n = choose.len() - 1;
    choose[k] * t.powi(k as i32) * (1.0 - t).powi((n - k) as i32)
}

/// Degree-5 Bernstein basis function. Panics when `k > 5`.
#[inline]
pub fn bernstein5(k: usize, t: f64) -> f64 {
    bernstein(&CHOOSE5, k, t)
}

/// Degree-6 Bernstein basis function. Panics when `k > 6`.
#[inline]
pub fn bernstein6(k: usize, t: f64) -> f64 {
    bernstein(&CHOOSE6, k, t)
}

/// All six degree-5 basis values at `t`, sharing the power products.
pub(crate) fn basis5(t: f64) -> [f64; 6] {
    let mut tk = [1.0; 6];
    let mut t1k = [1.0; 6];
    let t1 = 1.0 - t;
    for k in 1..6 {
        tk[k] = tk[k - 1] * t;
        t1k[k] = t1k[k - 1] * t1;
    }
    let mut out = [0.0; 6];
    for k in 0..6 {
        out[k] = CHOOSE5[k] * tk[k] * t1k[5 - k];
    }
    out
}

/// All seven degree-6 basis values at `t`.
pub(crate) fn basis6(t: f64) -> [f64; 7] {
    let mut tk = [1.0; 7];
    let mut t1k = [1.0; 7];
    let t1 = 1.0 - t;
    for k in 1..7 {
        tk[k] = tk[k - 1] * t;
        t1k[k] = t1k[k - 1] * t1;
    }
    let mut out = [0.0; 7];
    for k in 0..7 {
        out[k] = CHOOSE6[k] * tk[k] * t1k[6 - k];
    }
    out
}
