//! Axis-aligned bounding boxes and plain rects.

use serde::{Deserialize, Serialize};

use super::xy::Xy;

/// Position + size rectangle, the form the UI reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Rect at `(x, y)` of the given size. Sizes are stored as given.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Xy {
        Xy::new(self.x, self.y)
    }
}

/// Smallest unrotated box around a shape. `min_* <= max_*` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    /// Builds a box from two opposite corners in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Box covering `rect`. Negative sizes are normalized.
    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.x, rect.y, rect.x + rect.width, rect.y + rect.height)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.width(), self.height())
    }

    /// Box around four points, typically transformed corners.
    pub fn from_corners(corners: [Xy; 4]) -> Self {
        let mut aabb = Self::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
        for corner in &corners[1..] {
            aabb.min_x = aabb.min_x.min(corner.x);
            aabb.min_y = aabb.min_y.min(corner.y);
            aabb.max_x = aabb.max_x.max(corner.x);
            aabb.max_y = aabb.max_y.max(corner.y);
        }
        aabb
    }

    /// Bounds of a point cloud, `None` when it is empty.
    pub fn from_points<I: IntoIterator<Item = Xy>>(points: I) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::new(p.x, p.y, p.x, p.y),
                Some(aabb) => Self {
                    min_x: aabb.min_x.min(p.x),
                    min_y: aabb.min_y.min(p.y),
                    max_x: aabb.max_x.max(p.x),
                    max_y: aabb.max_y.max(p.y),
                },
            })
        })
    }

    /// Union of all boxes, `None` when there are none.
    pub fn merge<I: IntoIterator<Item = Aabb>>(boxes: I) -> Option<Self> {
        boxes
            .into_iter()
            .fold(None, |acc: Option<Aabb>, next| {
                Some(match acc {
                    None => next,
                    Some(aabb) => aabb.union(&next),
                })
            })
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The same box moved by `delta`.
    pub fn shift(&self, delta: Xy) -> Self {
        Self {
            min_x: self.min_x + delta.x,
            min_y: self.min_y + delta.y,
            max_x: self.max_x + delta.x,
            max_y: self.max_y + delta.y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Top-left corner.
    pub fn min(&self) -> Xy {
        Xy::new(self.min_x, self.min_y)
    }

    pub fn center(&self) -> Xy {
        Xy::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Corners in `[TL, TR, BR, BL]` order.
    pub fn corners(&self) -> [Xy; 4] {
        [
            Xy::new(self.min_x, self.min_y),
            Xy::new(self.max_x, self.min_y),
            Xy::new(self.max_x, self.max_y),
            Xy::new(self.min_x, self.max_y),
        ]
    }

    /// Inclusive of the boundary.
    pub fn contains(&self, point: Xy) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// True when the boxes overlap or touch.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}
