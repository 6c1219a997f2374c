//! # Errors
//!
//! Nothing in the editing core is fatal. These types describe *why* an input was
//! rejected; the gesture entry points log them at `debug` level and carry on.

use thiserror::Error;

/// Reasons a drag-and-drop template payload cannot be used.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The drag carried no template data (foreign drag source).
    #[error("drag payload is empty")]
    Empty,

    /// The payload is not a valid `{type, category, label}` record.
    #[error("malformed drag payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload parsed but names no node type.
    #[error("drag payload has an empty node type")]
    EmptyType,
}

/// Errors surfaced by the fallible helpers of the canvas.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The canvas rectangle has not been measured yet (not mounted).
    #[error("canvas bounds are not available")]
    CanvasNotMeasured,

    /// A drop landed outside the canvas rectangle.
    #[error("drop point lies outside the canvas")]
    DropOutsideCanvas,

    /// A drag payload was rejected.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A configuration document parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
