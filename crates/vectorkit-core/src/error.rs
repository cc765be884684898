//! Error handling for VectorKit
//!
//! Provides the error types shared by every layer of the editor:
//! - Geometry errors (singular matrices, broken parent chains)
//! - I/O errors surfaced by hosts that persist documents
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::types::NodeId;
use thiserror::Error;

/// Geometry error type
///
/// Raised by the affine algebra and the scene-graph walk. Degenerate *rects*
/// (zero width or height) are not errors; see `MRect::transform`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The matrix has no inverse (determinant is zero or close to it)
    #[error("Degenerate transform: determinant {determinant} is not invertible")]
    DegenerateTransform {
        /// The determinant `a·d - b·c` of the offending matrix.
        determinant: f64,
    },

    /// A parent chain visits the same node twice
    #[error("Cyclic ancestry detected at node {node}")]
    CyclicAncestry {
        /// The node that was reached a second time.
        node: NodeId,
    },

    /// A node referenced by id is missing from the store
    #[error("Unknown node {node}")]
    UnknownNode {
        /// The id that could not be resolved.
        node: NodeId,
    },
}

/// Main error type for VectorKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a degenerate transform error
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Error::Geometry(GeometryError::DegenerateTransform { .. })
        )
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for the math layer, which only ever fails with a geometry error
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
