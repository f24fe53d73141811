use core::fmt;

use tracing::debug;

use crate::bernstein::basis5;
use crate::complex::Complex;
use crate::error::{CurveError, StorageError};
use crate::storage::{Heap, Sequence, Storage};

/// A Pythagorean-hodograph quintic spline of `N` segments.
///
/// The curve is defined by `N + 1` complex roots `z` (with `z[0] == 0` as a
/// placeholder) and `N` offsets `q` (one per segment, stored with the same
/// length as `z`). Within segment `i` the hodograph is the square of a
/// quadratic complex polynomial `w(e)`, so the speed `|w(e)|²` is a
/// polynomial and the arc length has an exact closed form.
///
/// All per-segment control data and the total arc length are computed once
/// at construction; the curve is read-only afterwards.
pub struct Curve<K: Storage = Heap> {
    /// Roots `z[0..=N]`.
    z: K::Seq<Complex>,

    /// Offsets, `q[i-1]` is the start point of segment `i`.
    q: K::Seq<Complex>,

    /// Quadratic root control points `(w0, w1, w2)` per segment.
    w: K::Seq<[Complex; 3]>,

    /// Quintic Bezier control points `p0..p5` per segment.
    p: K::Seq<[Complex; 6]>,

    /// Degree-4 Bernstein coefficients of the squared speed per segment.
    sigma: K::Seq<[f64; 5]>,

    /// Arc length accumulated before each segment.
    s_before: K::Seq<f64>,

    /// Number of segments.
    n: usize,

    /// Total arc length.
    length: f64,
}

impl Curve {
    /// Builds a heap-backed curve. Panics if the roots/offsets break the
    /// construction contract, see [`Curve::try_new`].
    pub fn new(z: &[Complex], q: &[Complex]) -> Self {
        Self::with_storage(z, q)
    }

    /// Builds a heap-backed curve, reporting contract violations.
    pub fn try_new(z: &[Complex], q: &[Complex]) -> Result<Self, CurveError> {
        Self::try_with_storage(z, q)
    }
}

impl<K: Storage> Curve<K> {
    /// Builds a curve in the chosen storage. Panics on contract violation.
    pub fn with_storage(z: &[Complex], q: &[Complex]) -> Self {
        Self::try_with_storage(z, q).unwrap_or_else(|err| panic!("invalid PH curve: {err}"))
    }

    /// Builds a curve in the chosen storage.
    ///
    /// Requires `z.len() == q.len()`, at least three roots and `z[0] == 0`.
    /// Bounded storage rejects curves that do not fit its capacity.
    pub fn try_with_storage(z: &[Complex], q: &[Complex]) -> Result<Self, CurveError> {
        if z.len() != q.len() {
            return Err(CurveError::LengthMismatch {
                roots: z.len(),
                offsets: q.len(),
            });
        }
        if z.len() < 3 {
            return Err(CurveError::TooFewRoots(z.len()));
        }
        if z[0] != Complex::ZERO {
            return Err(CurveError::NonZeroFirstRoot(z[0]));
        }

        if let Some(capacity) = <K::Seq<Complex> as Sequence<Complex>>::capacity_limit() {
            if z.len() > capacity {
                return Err(StorageError::CapacityExceeded { capacity }.into());
            }
        }

        let n = z.len() - 1;
        let z_seq: K::Seq<Complex> = Sequence::from_slice(z)?;
        let q_seq: K::Seq<Complex> = Sequence::from_slice(q)?;

        let mut w: K::Seq<[Complex; 3]> = Sequence::empty();
        let mut p: K::Seq<[Complex; 6]> = Sequence::empty();
        let mut sigma: K::Seq<[f64; 5]> = Sequence::empty();
        let mut s_before: K::Seq<f64> = Sequence::empty();

        let mut length = 0.0;
        for i in 1..=n {
            let wi = Self::root_stencil(z, i);
            let sigma_i = Self::speed_moments(&wi);
            w.push(wi)?;
            p.push(Self::control_points(&wi, q[i - 1]))?;
            sigma.push(sigma_i)?;
            s_before.push(length)?;
            length += Self::segment_length(&sigma_i, 1.0);
        }

        debug!(segments = n, length, "constructed PH quintic curve");

        Ok(Self {
            z: z_seq,
            q: q_seq,
            w,
            p,
            sigma,
            s_before,
            n,
            length,
        })
    }

    /// Quadratic root control points of segment `i` (1-based).
    ///
    /// Interior segments average neighbouring roots; the first and last
    /// segments extrapolate one-sidedly since there is no neighbour beyond
    /// the ends.
    fn root_stencil(z: &[Complex], i: usize) -> [Complex; 3] {
        let n = z.len() - 1;
        if i == 1 {
            [(z[1] * 3.0 - z[2]) / 2.0, z[1], (z[1] + z[2]) / 2.0]
        } else if i == n {
            [(z[n - 1] + z[n]) / 2.0, z[n], (z[n] * 3.0 - z[n - 1]) / 2.0]
        } else {
            [(z[i - 1] + z[i]) / 2.0, z[i], (z[i] + z[i + 1]) / 2.0]
        }
    }

    /// Bezier control points of the integral of `w(e)²` starting at `q0`.
    fn control_points(w: &[Complex; 3], q0: Complex) -> [Complex; 6] {
        let [w0, w1, w2] = *w;
        let p0 = q0;
        let p1 = p0 + w0 * w0 / 5.0;
        let p2 = p1 + w0 * w1 / 5.0;
        let p3 = p2 + (2.0 / 15.0) * (w1 * w1) + (1.0 / 15.0) * (w0 * w2);
        let p4 = p3 + w1 * w2 / 5.0;
        let p5 = p4 + w2 * w2 / 5.0;
        [p0, p1, p2, p3, p4, p5]
    }

    /// Bernstein coefficients of `|w(e)|²` (degree 4).
    fn speed_moments(w: &[Complex; 3]) -> [f64; 5] {
        let (u0, v0) = (w[0].re, w[0].im);
        let (u1, v1) = (w[1].re, w[1].im);
        let (u2, v2) = (w[2].re, w[2].im);
        [
            u0 * u0 + v0 * v0,
            u0 * u1 + v0 * v1,
            (2.0 / 3.0) * (u1 * u1 + v1 * v1) + (1.0 / 3.0) * (u0 * u2 + v0 * v2),
            u1 * u2 + v1 * v2,
            u2 * u2 + v2 * v2,
        ]
    }

    /// Arc length of a segment from `e = 0` to `e`.
    ///
    /// The antiderivative of a degree-4 Bernstein polynomial is degree 5
    /// with coefficients `sik = (sigma_0 + ... + sigma_(k-1)) / 5`.
    fn segment_length(sigma: &[f64; 5], e: f64) -> f64 {
        let b = basis5(e);
        let mut partial = 0.0;
        let mut sum = 0.0;
        for k in 1..=5 {
            partial += sigma[k - 1];
            sum += partial / 5.0 * b[k];
        }
        sum
    }

    /// Maps a global parameter to `(segment, local e)`.
    ///
    /// `p = 1` lands on the last segment with `e = 1`. Every query goes
    /// through here so they agree on the segment at knots.
    #[inline]
    fn locate(&self, p: f64) -> (usize, f64) {
        assert!(
            (0.0..=1.0).contains(&p),
            "curve parameter {p} outside [0, 1]"
        );
        let pn = p * self.n as f64;
        let i = (pn.ceil() as usize).clamp(1, self.n);
        (i, pn - i as f64 + 1.0)
    }

    /// Local quadratic root `w(e)` of segment `i`.
    #[inline]
    fn root_at(&self, i: usize, e: f64) -> Complex {
        let [w0, w1, w2] = self.w[i - 1];
        let e1 = 1.0 - e;
        w0 * (e1 * e1) + w1 * (2.0 * e * e1) + w2 * (e * e)
    }

    /// Position on segment `i` (1-based) at local coordinate `e ∈ [0, 1]`.
    pub fn segment_point(&self, i: usize, e: f64) -> Complex {
        assert!((1..=self.n).contains(&i), "segment {i} outside 1..={}", self.n);
        assert!((0.0..=1.0).contains(&e), "segment coordinate {e} outside [0, 1]");
        let b = basis5(e);
        let mut sum = Complex::ZERO;
        for (pk, bk) in self.p[i - 1].iter().zip(b.iter()) {
            sum += *pk * *bk;
        }
        sum
    }

    /// Position at `p ∈ [0, 1]`.
    pub fn r(&self, p: f64) -> Complex {
        let (i, e) = self.locate(p);
        self.segment_point(i, e)
    }

    /// Hodograph (first derivative with respect to `p`) at `p ∈ [0, 1]`.
    pub fn rprime(&self, p: f64) -> Complex {
        let (i, e) = self.locate(p);
        let w = self.root_at(i, e);
        w * w * self.n as f64
    }

    /// Parametric speed `|r'(p)|`, i.e. `ds/dp`.
    pub fn sigma(&self, p: f64) -> f64 {
        self.rprime(p).modulus()
    }

    /// Arc length from the start of the curve to `p ∈ [0, 1]`.
    pub fn s(&self, p: f64) -> f64 {
        let (i, e) = self.locate(p);
        if p >= 1.0 {
            return self.length;
        }
        if p <= 0.0 {
            return 0.0;
        }
        self.s_before[i - 1] + Self::segment_length(&self.sigma[i - 1], e)
    }

    /// Total arc length `S = s(1)`.
    pub fn total_length(&self) -> f64 {
        self.length
    }

    /// Number of segments `N`.
    pub fn segments(&self) -> usize {
        self.n
    }

    pub fn roots(&self) -> &[Complex] {
        &self.z
    }

    pub fn offsets(&self) -> &[Complex] {
        &self.q
    }

    /// Quadratic root control points of segment `i` (1-based).
    pub fn root_controls(&self, i: usize) -> [Complex; 3] {
        self.w[i - 1]
    }

    /// Quintic control points of segment `i` (1-based).
    pub fn control_polygon(&self, i: usize) -> [Complex; 6] {
        self.p[i - 1]
    }

    /// Squared-speed Bernstein coefficients of segment `i` (1-based).
    pub fn speed_coefficients(&self, i: usize) -> [f64; 5] {
        self.sigma[i - 1]
    }
}

impl<K: Storage> fmt::Debug for Curve<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("z", &self.z)
            .field("q", &self.q)
            .field("segments", &self.n)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}
