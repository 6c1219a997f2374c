//! # Painter
//!
//! Walks the graph back to front and emits the draw commands for one frame.

use glam::{Vec2, Vec4};

use crate::config::{CanvasConfig, CanvasStyle, MIN_GRID_SPACING};
use crate::interaction::{self, InteractionMode};
use crate::math::{PortKind, Wire};
use crate::model::{GraphState, Node};
use crate::render::{DrawCommand, RenderList};
use crate::view::View;

const PORT_SIZE: f32 = 16.0;
/// Upper bound on grid lines per axis.
const MAX_GRID_LINES: usize = 4096;

/// High-level renderer for the pipeline canvas.
///
/// The `Painter` converts the graph state into concrete drawing commands (`RenderList`).
/// It handles:
/// - Background and grid
/// - Wires with their click bands (beneath nodes)
/// - The live preview of a pending wire
/// - Node cards, selection highlight, ports and delete affordances
pub struct Painter;

impl Painter {
    /// Generates a list of draw commands to render the entire canvas.
    pub fn draw_graph(
        view: &View,
        config: &CanvasConfig,
        graph: &GraphState,
        interaction_mode: &InteractionMode,
    ) -> RenderList {
        let mut draw_list = Vec::new();
        let style = &config.style;

        Self::draw_background(view, style, &mut draw_list);

        // Wires sit behind nodes.
        for connection in graph.connections() {
            let wire = interaction::connection_wire(
                graph,
                config,
                connection.source,
                connection.target,
            );
            Self::draw_wire(view, wire, style.wire_band_color, config.wire_hit_width, false, &mut draw_list);
            Self::draw_wire(view, wire, style.wire_color, style.wire_width, false, &mut draw_list);
        }

        if let InteractionMode::Linking(pending) = interaction_mode {
            let start = graph.port_position(pending.source, PortKind::Output, config);
            let wire = Wire::between(start, pending.pointer);
            Self::draw_wire(view, wire, style.wire_color, style.wire_width, true, &mut draw_list);
        }

        let selected = graph.selected();
        for node in graph.nodes().filter(|n| Some(n.id) != selected) {
            Self::draw_node(view, config, node, false, &mut draw_list);
        }
        if let Some(node) = selected.and_then(|id| graph.node(id)) {
            Self::draw_node(view, config, node, true, &mut draw_list);
        }

        draw_list
    }

    fn draw_wire(
        view: &View,
        wire: Wire,
        color: Vec4,
        width: f32,
        dashed: bool,
        draw_list: &mut RenderList,
    ) {
        let screen = wire.translate(view.canvas_to_screen(Vec2::ZERO));
        draw_list.push(DrawCommand::Bezier {
            start: screen.start,
            cp1: screen.cp1,
            cp2: screen.cp2,
            end: screen.end,
            color,
            width,
            dashed,
        });
    }

    fn draw_node(
        view: &View,
        config: &CanvasConfig,
        node: &Node,
        selected: bool,
        draw_list: &mut RenderList,
    ) {
        let style = &config.style;
        let pos = view.canvas_to_screen(node.position);
        let accent = style.category_color(node.category);

        let (stroke_color, stroke_width) = if selected {
            (style.selected_border_color, 2.0)
        } else {
            (style.node_border_color, 1.0)
        };

        draw_list.push(DrawCommand::Rect {
            pos,
            size: config.node_size,
            color: style.node_color,
            corner_radius: 16.0,
            stroke_width,
            stroke_color: Some(stroke_color),
        });

        // Header: category dot and caption.
        draw_list.push(DrawCommand::Rect {
            pos: pos + Vec2::new(12.0, 14.0),
            size: Vec2::splat(8.0),
            color: accent,
            corner_radius: 4.0,
            stroke_width: 0.0,
            stroke_color: None,
        });
        draw_list.push(DrawCommand::Text {
            pos: pos + Vec2::new(26.0, 12.0),
            text: node.category.as_str().to_string(),
            color: style.caption_color,
            size: 9.0,
        });

        let delete = interaction::delete_button_rect(node.position, config);
        draw_list.push(DrawCommand::Rect {
            pos: view.canvas_to_screen(delete.min),
            size: delete.size(),
            color: style.delete_button_color,
            corner_radius: 6.0,
            stroke_width: 0.0,
            stroke_color: None,
        });

        draw_list.push(DrawCommand::Text {
            pos: pos + Vec2::new(16.0, 44.0),
            text: node.label.clone(),
            color: style.text_color,
            size: 11.0,
        });

        for kind in [PortKind::Input, PortKind::Output] {
            let anchor = crate::math::port_anchor(
                node.position,
                config.node_size,
                config.port_offset_y,
                kind,
            );
            let port_size = Vec2::splat(PORT_SIZE);
            draw_list.push(DrawCommand::Rect {
                pos: view.canvas_to_screen(anchor) - port_size * 0.5,
                size: port_size,
                color: style.port_color,
                corner_radius: PORT_SIZE * 0.5,
                stroke_width: 2.0,
                stroke_color: Some(style.node_color),
            });
        }
    }

    /// Fills the canvas and draws a grid that scrolls with the viewport offset.
    fn draw_background(view: &View, style: &CanvasStyle, draw_list: &mut RenderList) {
        let Some(rect) = view.canvas_rect else {
            return;
        };
        draw_list.push(DrawCommand::Rect {
            pos: rect.min,
            size: rect.size(),
            color: style.background_color,
            corner_radius: 0.0,
            stroke_width: 0.0,
            stroke_color: None,
        });

        let spacing = style.grid_spacing;
        if !spacing.is_finite() || spacing < MIN_GRID_SPACING {
            return;
        }
        let phase = view.offset().rem_euclid(Vec2::splat(spacing));
        let size = rect.size();

        for i in 0..grid_line_count(size.x - phase.x, spacing) {
            let x = rect.min.x + phase.x + i as f32 * spacing;
            draw_list.push(DrawCommand::Line {
                start: Vec2::new(x, rect.min.y),
                end: Vec2::new(x, rect.max.y),
                color: style.grid_color,
                width: 1.0,
            });
        }

        for i in 0..grid_line_count(size.y - phase.y, spacing) {
            let y = rect.min.y + phase.y + i as f32 * spacing;
            draw_list.push(DrawCommand::Line {
                start: Vec2::new(rect.min.x, y),
                end: Vec2::new(rect.max.x, y),
                color: style.grid_color,
                width: 1.0,
            });
        }
    }
}

/// Lines at `0, spacing, 2 * spacing, ..` that fit in `extent`, capped at `MAX_GRID_LINES`.
fn grid_line_count(extent: f32, spacing: f32) -> usize {
    if extent < 0.0 {
        return 0;
    }
    ((extent / spacing).floor() as usize)
        .saturating_add(1)
        .min(MAX_GRID_LINES)
}
