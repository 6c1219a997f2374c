//! # Input Protocol
//!
//! The events a host routes into the Canvas. Coordinates are in Screen Space (pixels).
//! Pointer events are expected in the order the input device produced them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single pointer event from the one supported pointer device.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Primary button pressed.
    Down { pos: Vec2 },
    /// Pointer moved, anywhere in the document.
    Move { pos: Vec2 },
    /// Primary button released, anywhere in the document.
    Up { pos: Vec2 },
}

/// A native drag-and-drop landing on the canvas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    /// Drop point in Screen Space.
    pub pos: Vec2,
    /// The transfer data registered under the template key, if the drag carried any.
    pub payload: Option<String>,
}

impl DropEvent {
    pub fn new(pos: Vec2, payload: impl Into<String>) -> Self {
        Self {
            pos,
            payload: Some(payload.into()),
        }
    }
}
