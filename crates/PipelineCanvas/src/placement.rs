//! # Placement
//!
//! Turns a palette template dropped on the canvas into a new node.

use glam::Vec2;

use crate::config::CanvasConfig;
use crate::error::{CanvasError, PayloadError};
use crate::input::DropEvent;
use crate::model::{GraphState, NodeId};
use crate::palette::NodeTemplate;
use crate::view::View;

/// Canvas-local top-left corner for a node dropped at `screen_pos`.
///
/// The node is centered under the pointer and snapped to whole pixels (rounding half up).
pub fn drop_position(
    view: &View,
    config: &CanvasConfig,
    screen_pos: Vec2,
) -> Result<Vec2, CanvasError> {
    let local = view.try_screen_to_canvas(screen_pos)?;
    let corner = local - config.half_node_size();
    Ok((corner + Vec2::splat(0.5)).floor())
}

/// Places the dragged template, or explains why the drop was rejected.
///
/// Nothing is mutated unless the whole drop is valid.
pub fn place(
    view: &View,
    config: &CanvasConfig,
    drop: &DropEvent,
    graph: &mut GraphState,
) -> Result<NodeId, CanvasError> {
    let payload = drop.payload.as_deref().ok_or(PayloadError::Empty)?;
    let template = NodeTemplate::from_payload(payload)?;
    if !view.contains_screen(drop.pos) {
        return Err(match view.canvas_rect {
            None => CanvasError::CanvasNotMeasured,
            Some(_) => CanvasError::DropOutsideCanvas,
        });
    }
    let position = drop_position(view, config, drop.pos)?;
    Ok(graph.add_node(&template, position))
}
