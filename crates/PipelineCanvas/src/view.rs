//! # Viewport System
//!
//! This module handles the coordinate transforms of the canvas.
//! Three spaces are involved:
//! - **Screen space**: pointer coordinates as the host delivers them.
//! - **Canvas-local space**: where node positions live; independent of panning.
//! - The canvas rectangle on screen, which the host measures and may not know yet.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::CanvasError;
use crate::math::Rect;

/// The pan translation applied uniformly to every node and wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// A positive value moves the content right/down.
    pub offset: Vec2,
}

/// The View combines the viewport with the canvas rectangle measured by the host.
/// It serves as the single source of truth for coordinate conversions.
#[derive(Clone, Debug, Default)]
pub struct View {
    /// The pan state.
    pub viewport: Viewport,
    /// The canvas rectangle in screen space, `None` until the canvas is mounted.
    pub canvas_rect: Option<Rect>,
}

impl View {
    /// Creates a new View system.
    pub fn new(viewport: Viewport, canvas_rect: Option<Rect>) -> Self {
        Self {
            viewport,
            canvas_rect,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.viewport.offset
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.viewport.offset = offset;
    }

    /// Converts a point from **Screen Space** to **Canvas-local Space**.
    ///
    /// Formula: `Local = Screen - CanvasOrigin - Offset`
    pub fn try_screen_to_canvas(&self, screen_pos: Vec2) -> Result<Vec2, CanvasError> {
        let rect = self.canvas_rect.ok_or(CanvasError::CanvasNotMeasured)?;
        Ok(screen_pos - rect.min - self.viewport.offset)
    }

    /// Like [`View::try_screen_to_canvas`], for callers that treat "not mounted" as a no-op.
    pub fn screen_to_canvas(&self, screen_pos: Vec2) -> Option<Vec2> {
        self.try_screen_to_canvas(screen_pos).ok()
    }

    /// Converts a point from **Canvas-local Space** to **Screen Space**.
    ///
    /// Formula: `Screen = CanvasOrigin + Offset + Local`. An unmeasured canvas is treated as
    /// sitting at the screen origin.
    pub fn canvas_to_screen(&self, canvas_pos: Vec2) -> Vec2 {
        self.origin() + self.viewport.offset + canvas_pos
    }

    fn origin(&self) -> Vec2 {
        self.canvas_rect.map(|r| r.min).unwrap_or(Vec2::ZERO)
    }

    /// Whether a screen point falls inside the measured canvas rectangle.
    pub fn contains_screen(&self, screen_pos: Vec2) -> bool {
        self.canvas_rect.is_some_and(|r| r.contains(screen_pos))
    }
}
