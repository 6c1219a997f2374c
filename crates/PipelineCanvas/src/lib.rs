//! # PipelineCanvas
//!
//! `pipeline_canvas` is the headless editing engine behind the visual pipeline builder.
//! It owns the node/wire graph, the coordinate system and the pointer gestures that place,
//! drag and connect nodes, while delegating drawing to the host application.
//!
//! ## Core Architecture
//! - **Model (`src/model.rs`)**: The Graph Store. Nodes and connections in `SlotMap` arenas.
//! - **Palette (`src/palette.rs`)**: Template catalog and the drag-and-drop payload codec.
//! - **View (`src/view.rs`)**: Viewport offset and Screen <-> Canvas-local conversion.
//! - **Interaction (`src/interaction.rs`)**: The gesture state machine.
//! - **Placement (`src/placement.rs`)**: Drop-from-palette handling.
//! - **Render (`src/render.rs`)**: Outputs a list of `DrawCommand`s for the host to render.
//!
//! Bad input never raises: rejected drops, self-loops, duplicate wires and stale ids all
//! degrade to no-ops with a `debug` log line.

pub mod config;
pub mod error;
pub mod input;
pub mod interaction;
pub mod math;
pub mod model;
pub mod painter;
pub mod palette;
pub mod placement;
pub mod render;
pub mod snapshot;
pub mod view;

use input::{DropEvent, PointerEvent};
use math::Rect;
use model::GraphState;
use render::RenderList;
use snapshot::CanvasSnapshot;
use view::{View, Viewport};

// Re-exports for convenience
pub use config::CanvasConfig;
pub use error::{CanvasError, PayloadError};
pub use interaction::{InteractionMode, LogicEvent, PendingConnection};
pub use palette::{NodeTemplate, Palette};

/// The main entry point for the library.
///
/// The `Canvas` holds the transient state of the editor (viewport, gesture in progress)
/// and its configuration. The graph itself is passed in on every call, so the host keeps
/// ownership of it.
pub struct Canvas {
    /// Configuration settings.
    pub config: CanvasConfig,
    /// The Viewport system handling coordinate transforms.
    pub view: View,
    /// Current interaction mode.
    pub interaction_mode: InteractionMode,
}

impl Canvas {
    /// Creates a new Canvas instance with the given configuration.
    ///
    /// The canvas starts unmeasured; call [`Canvas::set_canvas_rect`] once it is laid out.
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            view: View::new(Viewport::default(), None),
            interaction_mode: InteractionMode::Idle,
        }
    }

    /// Updates the on-screen rectangle of the canvas (e.g., on layout or resize).
    pub fn set_canvas_rect(&mut self, rect: Option<Rect>) {
        self.view.canvas_rect = rect;
    }

    /// Routes one pointer event through the gesture state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent, graph: &mut GraphState) -> Vec<LogicEvent> {
        let mut events = Vec::new();
        interaction::handle_pointer(
            &mut self.interaction_mode,
            &mut self.view,
            &self.config,
            event,
            graph,
            &mut events,
        );
        events
    }

    /// Handles a palette template dropped on the canvas.
    ///
    /// A placed node is reported as [`LogicEvent::NodeCreated`]. A rejected drop yields no
    /// events and the reason is logged.
    pub fn handle_drop(&mut self, drop: &DropEvent, graph: &mut GraphState) -> Vec<LogicEvent> {
        match placement::place(&self.view, &self.config, drop, graph) {
            Ok(id) => vec![LogicEvent::NodeCreated { id }, LogicEvent::RepaintNeeded],
            Err(err) => {
                tracing::debug!(error = %err, pos = ?drop.pos, "drop ignored");
                Vec::new()
            }
        }
    }

    /// The wire currently being drawn, if any.
    pub fn pending_connection(&self) -> Option<PendingConnection> {
        match &self.interaction_mode {
            InteractionMode::Linking(pending) => Some(*pending),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.interaction_mode == InteractionMode::Idle
    }

    /// Produces the draw commands for the current frame.
    pub fn render(&self, graph: &GraphState) -> RenderList {
        painter::Painter::draw_graph(&self.view, &self.config, graph, &self.interaction_mode)
    }

    /// A serializable read-only copy of the state a renderer needs.
    pub fn snapshot(&self, graph: &GraphState) -> CanvasSnapshot {
        CanvasSnapshot::capture(graph, &self.view, self.pending_connection())
    }
}
