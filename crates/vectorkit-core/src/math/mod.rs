//! Affine geometry primitives.
//!
//! Leaf first: [`Xy`] and [`Angle`] feed [`Matrix`], which places [`Aabb`]s
//! and [`MRect`]s. Everything is `f64` and degree based.

pub mod aabb;
pub mod angle;
pub mod matrix;
pub mod mrect;
pub mod xy;

pub use aabb::{Aabb, Rect};
pub use angle::Angle;
pub use matrix::{Matrix, MATRIX_EPSILON};
pub use mrect::{MRect, MRectData, SIZE_EPSILON};
pub use xy::Xy;
