//! # Rendering System
//!
//! Instead of drawing directly, the Canvas outputs a display list of `DrawCommand`s.
//! The host application (DOM, egui, WGPU, ...) is responsible for interpreting these
//! commands and drawing pixels.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// A single drawing primitive.
///
/// Coordinates are in **Screen Space** (Pixels).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// A filled rounded rectangle with an optional stroke.
    Rect {
        /// Top-left position in screen pixels.
        pos: Vec2,
        /// Size in screen pixels.
        size: Vec2,
        /// Fill color (RGBA, 0.0 - 1.0).
        color: Vec4,
        /// Radius of the corners in pixels.
        corner_radius: f32,
        /// Width of the border stroke in pixels.
        stroke_width: f32,
        /// Color of the border stroke.
        stroke_color: Option<Vec4>,
    },
    /// A straight line segment.
    Line {
        /// First endpoint in screen pixels.
        start: Vec2,
        /// Second endpoint in screen pixels.
        end: Vec2,
        /// Stroke color (RGBA, 0.0 - 1.0).
        color: Vec4,
        /// Stroke width in pixels.
        width: f32,
    },
    /// Text to be rendered.
    Text {
        /// Top-left position in screen pixels.
        pos: Vec2,
        /// The styling and layout of text is handled by the consumer.
        text: String,
        /// Glyph color.
        color: Vec4,
        /// Font size in pixels (approximate).
        size: f32,
    },
    /// A cubic Bezier curve, for connection wires and their hit bands.
    Bezier {
        /// The source output port, in screen pixels.
        start: Vec2,
        /// Control point pulled rightwards out of `start`.
        cp1: Vec2,
        /// Control point pulled leftwards out of `end`.
        cp2: Vec2,
        /// The target input port, or the pointer while a wire is pending.
        end: Vec2,
        /// Stroke color; the hit band uses a translucent one.
        color: Vec4,
        /// Stroke width in pixels; the hit band is much wider than the visible wire.
        width: f32,
        /// Drawn with a dash pattern (the live preview of a pending wire).
        dashed: bool,
    },
}

/// A list of draw commands representing the current frame.
pub type RenderList = Vec<DrawCommand>;
