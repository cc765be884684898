//! Matrix rect: an oriented rectangle.
//!
//! An [`MRect`] is a `width × height` box whose local space (origin at the
//! top-left corner, x along the width, y along the height) is placed in its
//! parent by `matrix`.
//!
//! The central invariant of the geometry model lives here: **the matrix
//! carries rotation, translation and reflection at unit scale, the
//! width/height carry the extent.** [`MRect::transform`] is what restores
//! that split after an arbitrary matrix has been applied.

use serde::{Deserialize, Serialize};
use std::cell::OnceCell;

use super::aabb::{Aabb, Rect};
use super::angle::Angle;
use super::matrix::Matrix;
use super::xy::Xy;

/// Extents below this are treated as zero when recovering scale factors.
pub const SIZE_EPSILON: f64 = 1e-9;

/// Serializable `{width, height, matrix}` triple of an [`MRect`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MRectData {
    pub width: f64,
    pub height: f64,
    pub matrix: Matrix,
}

#[derive(Debug, Clone)]
struct Derived {
    xy: Xy,
    rotation: f64,
    center: Xy,
    vertices: [Xy; 4],
    aabb: Aabb,
}

/// A `width` x `height` rect placed in its parent by a matrix.
///
/// Position, rotation, center, vertices and bounds are computed on first use
/// and cached until the next mutation.
#[derive(Debug, Clone)]
pub struct MRect {
    width: f64,
    height: f64,
    matrix: Matrix,
    derived: OnceCell<Derived>,
}

impl PartialEq for MRect {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.matrix == other.matrix
    }
}

impl MRect {
    /// A rect of `width` x `height` placed by `matrix`.
    pub fn new(width: f64, height: f64, matrix: Matrix) -> Self {
        Self {
            width,
            height,
            matrix,
            derived: OnceCell::new(),
        }
    }

    /// A rect at the parent origin, unrotated.
    pub fn identity(width: f64, height: f64) -> Self {
        Self::new(width, height, Matrix::identity())
    }

    /// Size from `rect`, placement from `matrix`.
    pub fn from_rect(rect: &Rect, matrix: Matrix) -> Self {
        Self::new(rect.width, rect.height, matrix)
    }

    /// Unrotated rect covering `aabb`.
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self::new(
            aabb.width(),
            aabb.height(),
            Matrix::translation(aabb.min_x, aabb.min_y),
        )
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Placement of the rect in its parent space.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn set_width(&mut self, width: f64) {
        if self.width != width {
            self.width = width;
            self.expire();
        }
    }

    pub fn set_height(&mut self, height: f64) {
        if self.height != height {
            self.height = height;
            self.expire();
        }
    }

    /// Replaces the placement, clearing the derived values.
    pub fn set_matrix(&mut self, matrix: Matrix) {
        self.matrix = matrix;
        self.expire();
    }

    /// Parent-space position of the local origin.
    pub fn xy(&self) -> Xy {
        self.derived().xy
    }

    pub fn x(&self) -> f64 {
        self.xy().x
    }

    pub fn y(&self) -> f64 {
        self.xy().y
    }

    /// Moves the rect so its local origin lands on `x`.
    pub fn set_x(&mut self, x: f64) {
        let delta = x - self.x();
        self.set_matrix(self.matrix.translate(delta, 0.0));
    }

    /// Moves the rect so its local origin lands on `y`.
    pub fn set_y(&mut self, y: f64) {
        let delta = y - self.y();
        self.set_matrix(self.matrix.translate(0.0, delta));
    }

    /// Angle swept from the parent x axis to the local x axis, in `(-180, 180]`.
    pub fn rotation(&self) -> f64 {
        self.derived().rotation
    }

    /// Spins the rect in place (about its center) to the given rotation.
    pub fn set_rotation(&mut self, rotation: f64) {
        let delta = rotation - self.rotation();
        self.rotate(delta);
    }

    pub fn center(&self) -> Xy {
        self.derived().center
    }

    /// Parent-space corners in `[TL, TR, BR, BL]` order.
    pub fn vertices(&self) -> [Xy; 4] {
        self.derived().vertices
    }

    /// Parent-space bounds of the four vertices.
    pub fn aabb(&self) -> Aabb {
        self.derived().aabb
    }

    /// Moves the rect by `delta` in parent space.
    pub fn shift(&mut self, delta: Xy) -> &mut Self {
        self.set_matrix(self.matrix.shift(delta));
        self
    }

    /// Rotates by `delta` degrees about the current center.
    pub fn rotate(&mut self, delta: f64) -> &mut Self {
        let center = self.center();
        self.set_matrix(self.matrix.rotate(delta, center));
        self
    }

    /// Applies `matrix` and re-derives width, height and a unit-scale matrix.
    ///
    /// With `local` the matrix is expressed in this rect's own local space
    /// (`self.matrix · matrix`), otherwise in its parent space
    /// (`matrix · self.matrix`).
    ///
    /// The new extent is measured from the transformed corners, since scale
    /// and rotation are mixed in `a, b, c, d`. The measured scale is then
    /// divided back out of the composed matrix. Edge lengths are positive, so
    /// a reflection stays in the matrix and flipped shapes survive.
    ///
    /// Zero-extent axes keep a scale factor of 1, and an axis collapsed to
    /// zero keeps its previous direction, so neither ever produces NaN.
    pub fn transform(&mut self, matrix: &Matrix, local: bool) -> &mut Self {
        let composed = if local {
            self.matrix.append(matrix)
        } else {
            self.matrix.prepend(matrix)
        };
        let old_width = self.width;
        let old_height = self.height;

        let p0 = composed.apply_xy(Xy::zero());
        let p1 = composed.apply_xy(Xy::new(old_width, 0.0));
        let p2 = composed.apply_xy(Xy::new(old_width, old_height));
        let new_width = Xy::distance(p0, p1);
        let new_height = Xy::distance(p1, p2);

        let scale_x = recover_scale(old_width, new_width);
        let scale_y = recover_scale(old_height, new_height);
        let mut recovered = composed.append(&Matrix::scaling(1.0 / scale_x, 1.0 / scale_y));

        if old_width >= SIZE_EPSILON && new_width < SIZE_EPSILON {
            recovered.a = self.matrix.a;
            recovered.b = self.matrix.b;
        }
        if old_height >= SIZE_EPSILON && new_height < SIZE_EPSILON {
            recovered.c = self.matrix.c;
            recovered.d = self.matrix.d;
        }

        self.width = new_width;
        self.height = new_height;
        self.set_matrix(recovered);
        self
    }

    /// Serializable snapshot without the cache.
    pub fn plain(&self) -> MRectData {
        MRectData {
            width: self.width,
            height: self.height,
            matrix: self.matrix,
        }
    }

    /// Size and matrix compared within `epsilon`.
    pub fn approx_eq(&self, other: &MRect, epsilon: f64) -> bool {
        (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
            && self.matrix.approx_eq(&other.matrix, epsilon)
    }

    fn derived(&self) -> &Derived {
        self.derived.get_or_init(|| {
            let m = &self.matrix;
            let vertices = [
                m.apply_xy(Xy::zero()),
                m.apply_xy(Xy::new(self.width, 0.0)),
                m.apply_xy(Xy::new(self.width, self.height)),
                m.apply_xy(Xy::new(0.0, self.height)),
            ];
            let local_x_axis = m.vector_only().apply_xy(Xy::new(1.0, 0.0));
            Derived {
                xy: vertices[0],
                rotation: Angle::sweep_from_x_axis(local_x_axis),
                center: m.apply_xy(Xy::center_of(self.width, self.height)),
                vertices,
                aabb: Aabb::from_corners(vertices),
            }
        })
    }

    fn expire(&mut self) {
        self.derived = OnceCell::new();
    }
}

fn recover_scale(old: f64, new: f64) -> f64 {
    if old < SIZE_EPSILON || new < SIZE_EPSILON {
        1.0
    } else {
        new / old
    }
}

impl From<MRectData> for MRect {
    fn from(data: MRectData) -> Self {
        Self::new(data.width, data.height, data.matrix)
    }
}

impl From<&MRect> for MRectData {
    fn from(rect: &MRect) -> Self {
        rect.plain()
    }
}
