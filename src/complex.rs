use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A complex number `re + im·i`, used as a 2D point or vector in the plane.
///
/// PH curves are built from squares of complex polynomials, so every
/// control point and hodograph value in this crate is a `Complex`.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };

    /// Creates a new Complex from its real and imaginary parts.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Real part.
    #[inline]
    pub fn re(&self) -> f64 {
        self.re
    }

    /// Imaginary part.
    #[inline]
    pub fn im(&self) -> f64 {
        self.im
    }

    /// Euclidean length `sqrt(re² + im²)`.
    #[inline]
    pub fn modulus(&self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    #[inline]
    pub fn conj(&self) -> Complex {
        Complex::new(self.re, -self.im)
    }

    /// Multiplicative inverse. Panics on a zero-modulus value.
    #[inline]
    pub fn recip(&self) -> Complex {
        let denom = self.re * self.re + self.im * self.im;
        assert!(denom != 0.0, "reciprocal of zero complex value");
        Complex::new(self.re / denom, -self.im / denom)
    }

    /// Principal square root.
    ///
    /// For `im >= 0` the result is `(p, q)` with `p = sqrt((m + re)/2)` and
    /// `q = sqrt((m - re)/2)`, `m` being the modulus. Otherwise `(p, -q)`.
    pub fn sqrt(&self) -> Complex {
        let m = self.modulus();
        let p = ((m + self.re) / 2.0).sqrt();
        let q = ((m - self.re) / 2.0).sqrt();
        if self.im >= 0.0 {
            Complex::new(p, q)
        } else {
            Complex::new(p, -q)
        }
    }

    /// Tolerance-based equality on both components.
    pub fn approx_eq(&self, other: Complex, tolerance: f64) -> bool {
        (self.re - other.re).abs() <= tolerance && (self.im - other.im).abs() <= tolerance
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Complex::new(re, 0.0)
    }
}

impl Add for Complex {
    type Output = Complex;
    #[inline]
    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Add<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn add(self, k: f64) -> Complex {
        Complex::new(self.re + k, self.im)
    }
}

impl AddAssign for Complex {
    #[inline]
    fn add_assign(&mut self, rhs: Complex) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl Sub for Complex {
    type Output = Complex;
    #[inline]
    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Sub<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn sub(self, k: f64) -> Complex {
        Complex::new(self.re - k, self.im)
    }
}

impl Neg for Complex {
    type Output = Complex;
    #[inline]
    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl Mul for Complex {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn mul(self, k: f64) -> Complex {
        Complex::new(self.re * k, self.im * k)
    }
}

impl Mul<Complex> for f64 {
    type Output = Complex;
    #[inline]
    fn mul(self, c: Complex) -> Complex {
        Complex::new(self * c.re, self * c.im)
    }
}

impl Div for Complex {
    type Output = Complex;
    /// Panics when `rhs` has zero modulus.
    #[inline]
    fn div(self, rhs: Complex) -> Complex {
        let denom = rhs.re * rhs.re + rhs.im * rhs.im;
        assert!(denom != 0.0, "division by zero complex value");
        Complex::new(
            (self.re * rhs.re + self.im * rhs.im) / denom,
            (self.im * rhs.re - self.re * rhs.im) / denom,
        )
    }
}

impl Div<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn div(self, k: f64) -> Complex {
        assert!(k != 0.0, "division of complex value by zero");
        Complex::new(self.re / k, self.im / k)
    }
}

/// Formats as `a+bi` with the formatter's precision (0 places by default).
/// The unit imaginary is written as `i`/`-i` and zero parts are dropped.
impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = f.precision().unwrap_or(0);
        let re = format!("{:.*}", places, self.re);
        if self.im == 0.0 {
            return f.write_str(&re);
        }
        let im = format!("{:.*}", places, self.im);
        let mut out = String::new();
        if self.im < 0.0 {
            if self.re != 0.0 {
                out.push_str(&re);
            }
            if self.im == -1.0 {
                out.push('-');
            } else {
                out.push_str(&im);
            }
        } else {
            if self.re != 0.0 {
                out.push_str(&re);
                out.push('+');
            }
            if self.im != 1.0 {
                out.push_str(&im);
            }
        }
        out.push('i');
        f.write_str(&out)
    }
}
