//! Error types for canvas operations.

use crate::registry::ShapeId;
use thiserror::Error;

/// Errors raised by the shape model and the history engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    /// A shape without complete geometry was offered for commit.
    #[error("Shape is not valid for commit")]
    InvalidShape,
    /// A shape kind was asked for a capability it does not implement.
    #[error("{0} does not implement contains(x, y)")]
    UnknownCapability(&'static str),
    /// An event referenced a shape ID beyond the registry bounds.
    #[error("Shape ID {id} is out of range (registry holds {len} shapes)")]
    OutOfRangeId { id: ShapeId, len: usize },
    /// Lookup of a shape ID that does not exist.
    #[error("Shape not found: {0}")]
    NotFound(ShapeId),
    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CanvasError {
    fn from(err: serde_json::Error) -> Self {
        CanvasError::Serialization(err.to_string())
    }
}

/// Result type for canvas operations.
pub type Result<T> = std::result::Result<T, CanvasError>;
