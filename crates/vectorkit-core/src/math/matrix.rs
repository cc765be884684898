//! 2x3 affine matrix.
//!
//! A [`Matrix`] maps `(x, y)` to `(a·x + c·y + tx, b·x + d·y + ty)`. In
//! column-vector notation it is
//!
//! ```text
//! | a  c  tx |
//! | b  d  ty |
//! | 0  0  1  |
//! ```
//!
//! Composition comes in two directions:
//!
//! - [`Matrix::append`] computes `self · other`: `other` runs first, inside
//!   `self`'s local space.
//! - [`Matrix::prepend`] computes `other · self`: `other` runs last, in
//!   `self`'s parent space.
//!
//! [`Matrix::divide`] is `self · other⁻¹`, the relative transform `D` with
//! `D · other == self`. The transform tool computes one scene-space delta per
//! frame with it and re-expresses that delta in every node's local frame.

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::angle::Angle;
use super::xy::Xy;
use crate::error::{GeometryError, GeometryResult};

/// Determinants smaller than this (in magnitude) are treated as singular.
pub const MATRIX_EPSILON: f64 = 1e-12;

/// Affine map of the plane. Serialized as its six coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// Builds a matrix from its six coefficients, in `(a, b, c, d, tx, ty)` order.
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// The mapping that leaves every point in place.
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Pure translation by `(x, y)`.
    pub const fn translation(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Scale about the origin. Negative factors mirror the axis.
    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin.
    pub fn rotation(degrees: f64) -> Self {
        let (cos, sin) = Angle::cos_sin(degrees);
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Inverse of [`Matrix::to_tuple`].
    pub fn from_tuple((a, b, c, d, tx, ty): (f64, f64, f64, f64, f64, f64)) -> Self {
        Self::new(a, b, c, d, tx, ty)
    }

    /// The coefficients as `(a, b, c, d, tx, ty)`.
    pub fn to_tuple(&self) -> (f64, f64, f64, f64, f64, f64) {
        (self.a, self.b, self.c, self.d, self.tx, self.ty)
    }

    /// `a·d - b·c`: the signed area scale of the linear part.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// True when the matrix mirrors the plane (odd reflection).
    pub fn is_flipped(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Whether [`Matrix::invert`] would succeed.
    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() >= MATRIX_EPSILON
    }

    /// The linear part alone, translation dropped.
    pub fn vector_only(&self) -> Self {
        Self::new(self.a, self.b, self.c, self.d, 0.0, 0.0)
    }

    /// Where the local origin lands.
    pub fn translation_part(&self) -> Xy {
        Xy::new(self.tx, self.ty)
    }

    /// `self · other`: `other` is applied first, in this matrix's local space.
    pub fn append(&self, other: &Matrix) -> Self {
        let Self { a, b, c, d, tx, ty } = *self;
        Self {
            a: other.a * a + other.b * c,
            b: other.a * b + other.b * d,
            c: other.c * a + other.d * c,
            d: other.c * b + other.d * d,
            tx: other.tx * a + other.ty * c + tx,
            ty: other.tx * b + other.ty * d + ty,
        }
    }

    /// `other · self`: `other` is applied last, in this matrix's parent space.
    pub fn prepend(&self, other: &Matrix) -> Self {
        other.append(self)
    }

    /// `self · other⁻¹`, so that `self.divide(b)?.append(b) == self`.
    pub fn divide(&self, other: &Matrix) -> GeometryResult<Self> {
        Ok(self.append(&other.invert()?))
    }

    /// The inverse mapping.
    ///
    /// Fails with [`GeometryError::DegenerateTransform`] when the determinant is
    /// below [`MATRIX_EPSILON`] in magnitude or is not finite.
    pub fn invert(&self) -> GeometryResult<Self> {
        let Self { a, b, c, d, tx, ty } = *self;
        let determinant = self.determinant();
        if !determinant.is_finite() || determinant.abs() < MATRIX_EPSILON {
            return Err(GeometryError::DegenerateTransform { determinant });
        }
        Ok(Self {
            a: d / determinant,
            b: -b / determinant,
            c: -c / determinant,
            d: a / determinant,
            tx: (c * ty - d * tx) / determinant,
            ty: (b * tx - a * ty) / determinant,
        })
    }

    /// [`Matrix::translate`] by a vector.
    pub fn shift(&self, delta: Xy) -> Self {
        self.translate(delta.x, delta.y)
    }

    /// Translation in parent space.
    pub fn translate(&self, x: f64, y: f64) -> Self {
        Self {
            tx: self.tx + x,
            ty: self.ty + y,
            ..*self
        }
    }

    /// Scale about the parent origin (`scaling(sx, sy) · self`).
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        self.prepend(&Self::scaling(sx, sy))
    }

    /// Rotates the whole mapping by `degrees` about `origin`, a parent-space
    /// point that stays fixed.
    pub fn rotate(&self, degrees: f64, origin: Xy) -> Self {
        let (cos, sin) = Angle::cos_sin(degrees);
        let Self { a, b, c, d, tx, ty } = *self;
        let dx = tx - origin.x;
        let dy = ty - origin.y;
        Self {
            a: a * cos - b * sin,
            b: a * sin + b * cos,
            c: c * cos - d * sin,
            d: c * sin + d * cos,
            tx: dx * cos - dy * sin + origin.x,
            ty: dx * sin + dy * cos + origin.y,
        }
    }

    /// Maps a local point into parent space.
    pub fn apply_xy(&self, point: Xy) -> Xy {
        Xy::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    /// Maps a parent-space point back through the inverse.
    pub fn invert_xy(&self, point: Xy) -> GeometryResult<Xy> {
        Ok(self.invert()?.apply_xy(point))
    }

    /// Maps a displacement: the translation does not take part.
    pub fn apply_shift(&self, shift: Xy) -> Xy {
        self.apply_xy(shift).minus(self.apply_xy(Xy::zero()))
    }

    /// Maps a parent-space displacement into local space.
    pub fn invert_shift(&self, shift: Xy) -> GeometryResult<Xy> {
        Ok(self.invert()?.apply_shift(shift))
    }

    /// Axis-aligned bounds of the four transformed corners of `aabb`.
    ///
    /// This is the usual lossy transformed box, not an oriented one.
    pub fn apply_aabb(&self, aabb: &Aabb) -> Aabb {
        let corners = aabb.corners().map(|corner| self.apply_xy(corner));
        Aabb::from_corners(corners)
    }

    /// Bounds of `aabb` pulled back through the inverse.
    pub fn invert_aabb(&self, aabb: &Aabb) -> GeometryResult<Aabb> {
        Ok(self.invert()?.apply_aabb(aabb))
    }

    /// Coefficient-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Matrix, epsilon: f64) -> bool {
        (self.a - other.a).abs() <= epsilon
            && (self.b - other.b).abs() <= epsilon
            && (self.c - other.c).abs() <= epsilon
            && (self.d - other.d).abs() <= epsilon
            && (self.tx - other.tx).abs() <= epsilon
            && (self.ty - other.ty).abs() <= epsilon
    }

    /// False when any coefficient is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.tx.is_finite()
            && self.ty.is_finite()
    }
}
