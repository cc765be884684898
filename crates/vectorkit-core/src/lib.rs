//! # VectorKit Core
//!
//! Core types and geometry for VectorKit.
//! Provides the affine algebra (points, angles, matrices, bounding boxes and
//! oriented rects), node identifiers and the shared error types.

pub mod error;
pub mod math;
pub mod types;

pub use error::{Error, GeometryError, GeometryResult, Result};

pub use math::{Aabb, Angle, MRect, MRectData, Matrix, Rect, Xy, MATRIX_EPSILON, SIZE_EPSILON};

pub use types::{NodeId, Size};
