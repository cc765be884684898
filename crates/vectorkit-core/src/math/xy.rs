//! 2D point / vector arithmetic.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::angle::Angle;

/// A point or a displacement in 2D space.
///
/// `Xy` is a plain `Copy` value: the methods taking `self` return a new value,
/// the `*Assign` operators and [`Xy::rotate_mut`] update in place for call
/// sites that accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Xy {
    pub x: f64,
    pub y: f64,
}

impl Xy {
    /// Creates a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin, also the null displacement.
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Component-wise sum.
    pub fn plus(self, other: Xy) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference, `self - other`.
    pub fn minus(self, other: Xy) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Adds every vector in `others` to `self`.
    pub fn plus_all<I: IntoIterator<Item = Xy>>(self, others: I) -> Self {
        others.into_iter().fold(self, Xy::plus)
    }

    /// Subtracts every vector in `others` from `self`.
    pub fn minus_all<I: IntoIterator<Item = Xy>>(self, others: I) -> Self {
        others.into_iter().fold(self, Xy::minus)
    }

    /// Adds `n` to both coordinates.
    pub fn plus_num(self, n: f64) -> Self {
        Self::new(self.x + n, self.y + n)
    }

    /// Multiplies both coordinates by `k`.
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    /// Divides both coordinates by `k`. No guard against zero.
    pub fn divide(self, k: f64) -> Self {
        Self::new(self.x / k, self.y / k)
    }

    /// Rotates `self` about `origin` by `degrees` (positive turns x toward y).
    pub fn rotate(self, origin: Xy, degrees: f64) -> Self {
        let (cos, sin) = Angle::cos_sin(degrees);
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Self::new(dx * cos - dy * sin + origin.x, dx * sin + dy * cos + origin.y)
    }

    /// In-place [`Xy::rotate`], returning `self` for chaining.
    pub fn rotate_mut(&mut self, origin: Xy, degrees: f64) -> &mut Self {
        *self = self.rotate(origin, degrees);
        self
    }

    /// Euclidean norm.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// The coordinates as `(x, y)`.
    pub fn tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Exact comparison with the origin.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Dot product.
    pub fn dot(a: Xy, b: Xy) -> f64 {
        a.x * b.x + a.y * b.y
    }

    /// Z component of the 3D cross product of `a` and `b`.
    pub fn cross(a: Xy, b: Xy) -> f64 {
        a.x * b.y - a.y * b.x
    }

    /// Euclidean distance between two points.
    pub fn distance(a: Xy, b: Xy) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }

    /// The vector pointing from `to` to `from` (`from - to`).
    pub fn vector(from: Xy, to: Xy) -> Xy {
        from.minus(to)
    }

    /// Reflects `point` through `origin`.
    pub fn symmetric(point: Xy, origin: Xy) -> Xy {
        Xy::new(2.0 * origin.x - point.x, 2.0 * origin.y - point.y)
    }

    /// Moves `point` a further `distance` along the ray from `origin` through `point`.
    ///
    /// Coincident points have no direction, so `point` is returned as is.
    pub fn lerp(point: Xy, origin: Xy, distance: f64) -> Xy {
        let length = Xy::distance(point, origin);
        if length == 0.0 {
            return point;
        }
        let t = distance / length;
        Xy::new(
            point.x + (point.x - origin.x) * t,
            point.y + (point.y - origin.y) * t,
        )
    }

    /// Unit x axis rotated by `rotation` degrees.
    pub fn x_axis(rotation: f64) -> Xy {
        let (cos, sin) = Angle::cos_sin(rotation);
        Xy::new(cos, sin)
    }

    /// Unit y axis rotated by `rotation` degrees.
    pub fn y_axis(rotation: f64) -> Xy {
        let (cos, sin) = Angle::cos_sin(rotation);
        Xy::new(-sin, cos)
    }

    /// Center of a `width` x `height` box anchored at the origin.
    pub fn center_of(width: f64, height: f64) -> Xy {
        Xy::new(width / 2.0, height / 2.0)
    }
}

impl From<(f64, f64)> for Xy {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Xy {
    type Output = Xy;

    fn add(self, rhs: Xy) -> Xy {
        self.plus(rhs)
    }
}

impl Sub for Xy {
    type Output = Xy;

    fn sub(self, rhs: Xy) -> Xy {
        self.minus(rhs)
    }
}

impl Mul<f64> for Xy {
    type Output = Xy;

    fn mul(self, rhs: f64) -> Xy {
        self.scale(rhs)
    }
}

impl Neg for Xy {
    type Output = Xy;

    fn neg(self) -> Xy {
        Xy::new(-self.x, -self.y)
    }
}

impl AddAssign for Xy {
    fn add_assign(&mut self, rhs: Xy) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Xy {
    fn sub_assign(&mut self, rhs: Xy) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f64> for Xy {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}
