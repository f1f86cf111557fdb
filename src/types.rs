//! Strongly-typed geometric primitives for mathdiagrams.
//!
//! Two planes are in play:
//! - the mathematical plane (`Point`), y up, origin wherever the diagram puts it
//! - the device plane (`glam::DVec2`), origin top-left, y down, pixels
//!
//! Keeping them as distinct types means a math-plane point can only reach
//! the surface by going through a `Transform`.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Check that `val` is a finite, strictly positive number.
pub fn check_positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Device units per mathematical unit. Always finite and > 0.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Scale(f64);

impl Scale {
    /// Create a Scale with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(val: f64) -> Result<Self, NumericError> {
        check_positive(val).map(Scale)
    }

    /// Get the raw value
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in the mathematical plane.
///
/// Behaves like a complex number `x + iy`, which is the most compact way to
/// write rotations and polar offsets in proof diagrams:
///
/// ```
/// use mathdiagrams::Point;
///
/// let a = Point::polar(1.0, std::f64::consts::FRAC_PI_2);
/// let b = a * Point::I; // rotate by another 90 degrees
/// assert!((b.x + 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };
    pub const ONE: Point = Point { x: 1.0, y: 0.0 };
    pub const I: Point = Point { x: 0.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Point at `radius` from the origin, `angle` radians counter-clockwise from +x.
    pub fn polar(radius: f64, angle: f64) -> Self {
        Point {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    /// Complex conjugate (mirror across the x axis)
    #[inline]
    pub fn conj(self) -> Self {
        Point {
            x: self.x,
            y: -self.y,
        }
    }

    /// Distance from the origin
    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle from +x in radians, in (-π, π]
    #[inline]
    pub fn arg(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Check if both coordinates are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<f64> for Point {
    /// A real number is a point on the x axis.
    fn from(x: f64) -> Self {
        Point { x, y: 0.0 }
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        dvec2(p.x, p.y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;
    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// Complex multiplication: scales by `|rhs|` and rotates by `arg(rhs)`
impl Mul<Point> for Point {
    type Output = Point;
    fn mul(self, rhs: Point) -> Point {
        Point::new(
            self.x * rhs.x - self.y * rhs.y,
            self.x * rhs.y + self.y * rhs.x,
        )
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.y < 0.0 {
            write!(f, "{}-{}i", self.x, -self.y)
        } else {
            write!(f, "{}+{}i", self.x, self.y)
        }
    }
}

/// Degrees to radians
#[inline]
pub fn d2r(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Radians to degrees
#[inline]
pub fn r2d(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Rendered size of a string, in device units
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
}

/// Visible region of the mathematical plane
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLimits {
    pub left_bottom: Point,
    pub right_top: Point,
}

impl CanvasLimits {
    /// Check whether a math-plane point falls on the canvas (edges included)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left_bottom.x
            && p.x <= self.right_top.x
            && p.y >= self.left_bottom.y
            && p.y <= self.right_top.y
    }
}
