//! # Configuration
//!
//! This module defines the configuration struct for the Canvas.
//!
//! All nodes share one fixed size, so the dimensions that drive hit-testing and port
//! placement live here rather than on each node.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::CanvasError;
use crate::model::NodeCategory;

/// Smallest accepted grid spacing, in canvas units.
pub const MIN_GRID_SPACING: f32 = 1.0;

/// Configuration parameters for the Canvas.
///
/// Every field has a default, so a host can override any subset from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width and height shared by every node. Default: 208 x 100.
    pub node_size: Vec2,
    /// Vertical distance from a node's top edge to both of its ports. Default: 64.
    pub port_offset_y: f32,
    /// Distance in pixels within which a pointer counts as "on" a port. Default: 10.
    pub port_hit_radius: f32,
    /// Width of the invisible band around a wire that accepts clicks. Default: 10.
    pub wire_hit_width: f32,
    /// Edge length of the square delete affordance in a node's header. Default: 20.
    pub delete_button_size: f32,
    /// Inset of the delete affordance from the node's top-right corner. Default: 8.
    pub delete_button_inset: f32,
    /// Number of line segments used when hit-testing a wire curve. Default: 32.
    pub wire_hit_segments: usize,
    /// Visual styling configuration.
    pub style: CanvasStyle,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            node_size: Vec2::new(208.0, 100.0),
            port_offset_y: 64.0,
            port_hit_radius: 10.0,
            wire_hit_width: 10.0,
            delete_button_size: 20.0,
            delete_button_inset: 8.0,
            wire_hit_segments: 32,
            style: CanvasStyle::default(),
        }
    }
}

impl CanvasConfig {
    /// Parses a (possibly partial) JSON configuration, filling the rest with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CanvasError> {
        let config: Self = serde_json::from_str(json)?;
        if config.node_size.x <= 0.0 || config.node_size.y <= 0.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "node_size must be positive, got {:?}",
                config.node_size
            )));
        }
        if config.wire_hit_segments == 0 {
            return Err(CanvasError::InvalidConfig(
                "wire_hit_segments must be at least 1".to_string(),
            ));
        }
        let spacing = config.style.grid_spacing;
        if !spacing.is_finite() || spacing < MIN_GRID_SPACING {
            return Err(CanvasError::InvalidConfig(format!(
                "grid_spacing must be at least {MIN_GRID_SPACING}, got {spacing}"
            )));
        }
        Ok(config)
    }

    /// Half the node size; subtracted from a drop point to center the new node under it.
    pub fn half_node_size(&self) -> Vec2 {
        self.node_size * 0.5
    }
}

/// Visual styling configuration for the Canvas.
///
/// Colors are RGBA in the 0.0 - 1.0 range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasStyle {
    /// Background color of the canvas.
    pub background_color: Vec4,
    /// Color of the grid lines.
    pub grid_color: Vec4,
    /// Spacing of the background grid in canvas units.
    pub grid_spacing: f32,
    /// Fill color of a node body.
    pub node_color: Vec4,
    /// Border color of an unselected node.
    pub node_border_color: Vec4,
    /// Border color of the selected node.
    pub selected_border_color: Vec4,
    /// Color of a node's label.
    pub text_color: Vec4,
    /// Color of the dimmed category caption.
    pub caption_color: Vec4,
    /// Color of the ports.
    pub port_color: Vec4,
    /// Color of the visible wire stroke and the pending preview.
    pub wire_color: Vec4,
    /// Width of the visible wire stroke in pixels.
    pub wire_width: f32,
    /// Color of the translucent wire hit band.
    pub wire_band_color: Vec4,
    /// Fill color of the node delete affordance.
    pub delete_button_color: Vec4,
    /// Accent for the `INPUT` category.
    pub input_color: Vec4,
    /// Accent for the `TRANSFORM` category.
    pub transform_color: Vec4,
    /// Accent for the `LOGIC` category.
    pub logic_color: Vec4,
    /// Accent for the `OUTPUT` category.
    pub output_color: Vec4,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            background_color: rgb(0x1a, 0x1a, 0x1a),
            grid_color: rgb(0x25, 0x25, 0x25),
            grid_spacing: 24.0,
            node_color: rgb(0x1e, 0x1e, 0x1e),
            node_border_color: rgb(0x1f, 0x29, 0x37),
            selected_border_color: rgb(0x63, 0x66, 0xf1),
            text_color: rgb(0xe0, 0xe0, 0xe0),
            caption_color: rgb(0xa0, 0xa0, 0xa0),
            port_color: rgb(0x37, 0x41, 0x51),
            wire_color: rgb(0x63, 0x66, 0xf1),
            wire_width: 2.0,
            wire_band_color: Vec4::new(99.0 / 255.0, 102.0 / 255.0, 241.0 / 255.0, 0.2),
            delete_button_color: Vec4::new(0.94, 0.27, 0.27, 0.2),
            input_color: rgb(0x2e, 0xcc, 0x71),
            transform_color: rgb(0x34, 0x98, 0xdb),
            logic_color: rgb(0xf3, 0x9c, 0x12),
            output_color: rgb(0x9b, 0x59, 0xb6),
        }
    }
}

impl CanvasStyle {
    /// The accent color used for a node category's dot and icon.
    pub fn category_color(&self, category: NodeCategory) -> Vec4 {
        match category {
            NodeCategory::Input => self.input_color,
            NodeCategory::Transform => self.transform_color,
            NodeCategory::Logic => self.logic_color,
            NodeCategory::Output => self.output_color,
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Vec4 {
    Vec4::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
}
