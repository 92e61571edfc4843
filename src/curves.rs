//! Modular arithmetic and the group law of short-Weierstrass curves
//! y^2 = x^3 + a*x + b over the field of integers modulo a prime.

use crate::error::{KeyError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::ops::{Add, Mul, Neg};
use std::sync::Arc;

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) s.t. a * x + b * y == gcd
#[must_use]
pub fn extended_euclidean_algorithm(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Returns the modular inverse i of x, with (x * i) mod p == 1.
///
/// Fails with [`KeyError::ArithmeticPrecondition`] when gcd(x, p) != 1,
/// which for a prime p only happens when x is a multiple of p.
pub fn mod_inv(x: &BigInt, p: &BigInt) -> Result<BigInt> {
    let x = x.mod_floor(p);
    let (gcd, s, _) = extended_euclidean_algorithm(&x, p);
    if !gcd.is_one() {
        return Err(KeyError::ArithmeticPrecondition(format!(
            "{x:x} has no inverse modulo {p:x}"
        )));
    }
    Ok(s.mod_floor(p))
}

/// Curve parameters: coefficients a and b, field prime p and subgroup order n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    pub p: BigInt,
    pub a: BigInt,
    pub b: BigInt,
    pub n: BigInt,
}

impl Curve {
    pub fn new(p: BigInt, a: BigInt, b: BigInt, n: BigInt) -> Self {
        Curve { p, a, b, n }
    }

    /// Whether (x, y) satisfies the curve equation modulo p
    pub fn contains(&self, x: &BigInt, y: &BigInt) -> bool {
        let lhs = (y * y).mod_floor(&self.p);
        let rhs = (x * x * x + &self.a * x + &self.b).mod_floor(&self.p);
        lhs == rhs
    }
}

/// A point on a curve: either the identity element or an affine pair.
///
/// Affine points share their curve through an `Arc`. [`Point::new`] and the
/// group operations produce coordinates reduced into `[0, p)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine {
        x: BigInt,
        y: BigInt,
        curve: Arc<Curve>,
    },
}

impl Point {
    /// Affine point with coordinates reduced modulo p. Does not check
    /// curve membership, see [`Point::on_curve`] for the checked form.
    #[must_use]
    pub fn new(curve: Arc<Curve>, x: BigInt, y: BigInt) -> Self {
        let x = x.mod_floor(&curve.p);
        let y = y.mod_floor(&curve.p);
        Point::Affine { x, y, curve }
    }

    /// Affine point, rejecting coordinates that do not satisfy the curve equation
    pub fn on_curve(curve: Arc<Curve>, x: BigInt, y: BigInt) -> Result<Self> {
        let point = Point::new(curve, x, y);
        if !point.is_on_curve() {
            return Err(KeyError::InvalidInput("point is not on the curve".into()));
        }
        Ok(point)
    }

    /// Point at infinity
    #[must_use]
    pub const fn infinity() -> Self {
        Point::Infinity
    }

    #[must_use]
    #[inline]
    pub const fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    #[inline]
    pub fn x(&self) -> Option<&BigInt> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    #[inline]
    pub fn y(&self) -> Option<&BigInt> {
        match self {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }

    #[inline]
    pub fn curve(&self) -> Option<&Arc<Curve>> {
        match self {
            Point::Infinity => None,
            Point::Affine { curve, .. } => Some(curve),
        }
    }

    /// The identity is always on the curve.
    pub fn is_on_curve(&self) -> bool {
        match self {
            Point::Infinity => true,
            Point::Affine { x, y, curve } => curve.contains(x, y),
        }
    }

    /// Same point with coordinates reduced into `[0, p)`
    #[must_use]
    pub fn reduced(&self) -> Point {
        match self {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y, curve } => Point::new(Arc::clone(curve), x.clone(), y.clone()),
        }
    }

    /// Group addition, reporting a non-invertible slope denominator as an error.
    /// Operands are reduced modulo p first, so unreduced `Affine` values are accepted.
    pub fn checked_add(&self, other: &Point) -> Result<Point> {
        let (x1, y1, curve) = match self {
            Point::Infinity => return Ok(other.reduced()),
            Point::Affine { x, y, curve } => (x, y, curve),
        };
        let (x2, y2, other_curve) = match other {
            Point::Infinity => return Ok(self.reduced()),
            Point::Affine { x, y, curve } => (x, y, curve),
        };
        if !Arc::ptr_eq(curve, other_curve) && curve != other_curve {
            return Err(KeyError::ArithmeticPrecondition(
                "points lie on different curves".into(),
            ));
        }

        let p = &curve.p;
        let (x1, y1) = (x1.mod_floor(p), y1.mod_floor(p));
        let (x2, y2) = (x2.mod_floor(p), y2.mod_floor(p));

        // P + (-P) = 0, which includes doubling a point with y == 0
        if x1 == x2 && (y1 != y2 || y1.is_zero()) {
            return Ok(Point::Infinity);
        }

        let (numerator, denominator) = if x1 == x2 {
            (BigInt::from(3) * &x1 * &x1 + &curve.a, BigInt::from(2) * &y1)
        } else {
            (&y1 - &y2, &x1 - &x2)
        };
        let m = (numerator.mod_floor(p) * mod_inv(&denominator, p)?).mod_floor(p);

        let rx = (&m * &m - &x1 - &x2).mod_floor(p);
        let ry = (-(&y1 + &m * (&rx - &x1))).mod_floor(p);

        Ok(Point::Affine {
            x: rx,
            y: ry,
            curve: Arc::clone(curve),
        })
    }

    /// Double-and-add scalar multiplication, least significant bit first.
    /// Negative scalars are rejected.
    pub fn checked_mul(&self, k: &BigInt) -> Result<Point> {
        if k.is_negative() {
            return Err(KeyError::InvalidInput("scalar must be non-negative".into()));
        }
        let mut result = Point::Infinity;
        let mut addend = self.clone();
        let mut k = k.clone();

        while !k.is_zero() {
            if k.is_odd() {
                result = result.checked_add(&addend)?;
            }
            addend = addend.checked_add(&addend)?;
            k >>= 1;
        }
        Ok(result)
    }
}

impl Neg for &Point {
    type Output = Point;

    fn neg(self) -> Point {
        match self {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y, curve } => Point::new(Arc::clone(curve), x.clone(), -y),
        }
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        -&self
    }
}

/// # Panics
///
/// Panics if the slope denominator is not invertible, which cannot happen
/// for points on the same curve over a prime field.
impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Point {
        &self + &other
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    #[inline]
    fn add(self, other: &Point) -> Point {
        self.checked_add(other).unwrap_or_else(|e| panic!("{e}"))
    }
}

/// Scalar multiplication: k * Point
impl Mul<&Point> for &BigInt {
    type Output = Point;

    fn mul(self, point: &Point) -> Point {
        scalar_mul(self, point)
    }
}

impl Mul<&Point> for BigInt {
    type Output = Point;

    fn mul(self, point: &Point) -> Point {
        scalar_mul(&self, point)
    }
}

impl Mul<Point> for BigInt {
    type Output = Point;

    fn mul(self, point: Point) -> Point {
        scalar_mul(&self, &point)
    }
}

/// k * point for a non-negative k.
///
/// # Panics
///
/// Panics on a negative scalar or a non-invertible intermediate slope.
#[must_use]
pub fn scalar_mul(k: &BigInt, point: &Point) -> Point {
    point.checked_mul(k).unwrap_or_else(|e| panic!("{e}"))
}
