//! # Interaction State Machine
//!
//! Turns raw pointer events into node drags, wire drawing, deletion clicks and panning.
//! The host routes every pointer event here; hit-testing is done against the graph so the
//! host never has to tell a port from a node body.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;
use crate::input::PointerEvent;
use crate::math::{PortKind, Rect, Wire};
use crate::model::{ConnectionId, GraphState, NodeId};
use crate::view::View;

/// Events emitted by the Canvas logic to the host application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LogicEvent {
    /// A node was placed from the palette.
    NodeCreated { id: NodeId },
    /// A dragged node received a new canvas-local position.
    NodeMoved { id: NodeId, position: Vec2 },
    /// A node was deleted, along with `cascaded` connections.
    NodeDeleted { id: NodeId, cascaded: usize },
    /// A wire gesture committed a new connection.
    ConnectionCreated {
        id: ConnectionId,
        source: NodeId,
        target: NodeId,
    },
    /// A connection was clicked away.
    ConnectionDeleted { id: ConnectionId },
    /// The selection slot changed.
    SelectionChanged(Option<NodeId>),
    /// The viewport offset changed.
    ViewportPanned { offset: Vec2 },
    /// The visual state has changed, requiring a repaint.
    RepaintNeeded,
}

impl LogicEvent {
    /// The node reported by the first `NodeCreated` in `events`, if any.
    pub fn created_node(events: &[LogicEvent]) -> Option<NodeId> {
        events.iter().find_map(|event| match event {
            LogicEvent::NodeCreated { id } => Some(*id),
            _ => None,
        })
    }
}

/// In-flight state of a wire being drawn. Never stored in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingConnection {
    /// Node whose output port the wire starts from.
    pub source: NodeId,
    /// Current pointer position (Canvas-local).
    pub pointer: Vec2,
}

/// Something that is deleted by a complete click (press and release on the same target).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    /// The delete affordance in a node's header.
    DeleteNode(NodeId),
    /// The hit band of a connection.
    Connection(ConnectionId),
}

/// The current state of user interaction.
///
/// There is exactly one of these per canvas, so at most one gesture of any kind is active.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionMode {
    /// No active interaction.
    #[default]
    Idle,
    /// User is panning the canvas by dragging empty space.
    Panning {
        /// Pointer position at start of drag (Screen Space).
        start_screen: Vec2,
        /// Viewport offset at start of drag.
        initial_offset: Vec2,
    },
    /// User is moving a node.
    DraggingNode {
        node: NodeId,
        /// Pointer position at start of drag (Screen Space).
        start_screen: Vec2,
        /// Node position at start of drag (Canvas-local).
        initial_position: Vec2,
    },
    /// User is drawing a wire from an output port.
    Linking(PendingConnection),
    /// User pressed a click target and has not released yet.
    Pressing(ClickTarget),
}

/// What lies under a canvas-local point, in hit-test priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    OutputPort(NodeId),
    InputPort(NodeId),
    DeleteButton(NodeId),
    NodeBody(NodeId),
    Connection(ConnectionId),
    Empty,
}

/// Nodes ordered topmost first: the selected node, then reverse insertion order.
fn front_to_back(graph: &GraphState) -> Vec<NodeId> {
    let mut order: Vec<NodeId> = graph.nodes().map(|n| n.id).collect();
    order.reverse();
    if let Some(selected) = graph.selected()
        && let Some(idx) = order.iter().position(|&id| id == selected)
    {
        order.remove(idx);
        order.insert(0, selected);
    }
    order
}

/// Screen-independent rectangle of a node's delete affordance.
pub fn delete_button_rect(position: Vec2, config: &CanvasConfig) -> Rect {
    let size = config.delete_button_size;
    let corner = Vec2::new(
        position.x + config.node_size.x - config.delete_button_inset - size,
        position.y + config.delete_button_inset,
    );
    Rect::new(corner, Vec2::splat(size))
}

/// The wire of a committed connection, in canvas-local space.
pub fn connection_wire(
    graph: &GraphState,
    config: &CanvasConfig,
    source: NodeId,
    target: NodeId,
) -> Wire {
    Wire::between(
        graph.port_position(source, PortKind::Output, config),
        graph.port_position(target, PortKind::Input, config),
    )
}

fn port_hit(
    graph: &GraphState,
    config: &CanvasConfig,
    id: NodeId,
    point: Vec2,
    kind: PortKind,
) -> bool {
    graph.port_position(id, kind, config).distance(point) <= config.port_hit_radius
}

/// The topmost node whose port of `kind` lies within the hit radius of `point`, if any.
pub fn port_at(
    graph: &GraphState,
    config: &CanvasConfig,
    point: Vec2,
    kind: PortKind,
) -> Option<NodeId> {
    front_to_back(graph)
        .into_iter()
        .find(|&id| port_hit(graph, config, id, point, kind))
}

/// Hit-tests a canvas-local point.
///
/// Nodes are visited topmost first and each node owns its ports, so a node covering an
/// older node's port takes the press. Within a node, ports win over the body so a wire can
/// start on its edge. Nodes win over wires since wires are drawn beneath them.
pub fn hit_test(graph: &GraphState, config: &CanvasConfig, point: Vec2) -> Hit {
    for id in front_to_back(graph) {
        let Some(node) = graph.node(id) else {
            continue;
        };
        if port_hit(graph, config, id, point, PortKind::Output) {
            return Hit::OutputPort(id);
        }
        if port_hit(graph, config, id, point, PortKind::Input) {
            return Hit::InputPort(id);
        }
        if delete_button_rect(node.position, config).contains(point) {
            return Hit::DeleteButton(id);
        }
        if Rect::new(node.position, config.node_size).contains(point) {
            return Hit::NodeBody(id);
        }
    }

    // Last drawn is topmost.
    let mut hit = Hit::Empty;
    for connection in graph.connections() {
        let wire = connection_wire(graph, config, connection.source, connection.target);
        if wire.hit(point, config.wire_hit_width, config.wire_hit_segments) {
            hit = Hit::Connection(connection.id);
        }
    }
    hit
}

/// Handles one pointer event and updates the graph/view state.
///
/// This function acts as the central state machine for the Canvas. Entering a gesture
/// stands in for attaching document-wide move/up listeners and returning to `Idle` for
/// detaching them, so move and up events are honoured wherever the pointer is.
///
/// # Arguments
/// * `mode` - The current interaction mode (will be mutated on state transitions).
/// * `view` - The viewport state, mutated during panning.
/// * `config` - Fixed dimensions and tolerances.
/// * `event` - The pointer event, in Screen Space.
/// * `graph` - The graph store, mutated by drags, wires and deletion clicks.
/// * `events` - A buffer to push `LogicEvent`s into.
pub fn handle_pointer(
    mode: &mut InteractionMode,
    view: &mut View,
    config: &CanvasConfig,
    event: PointerEvent,
    graph: &mut GraphState,
    events: &mut Vec<LogicEvent>,
) {
    let next_mode = match (&mut *mode, event) {
        (InteractionMode::Idle, PointerEvent::Down { pos }) => {
            handle_idle(view, config, pos, graph, events)
        }
        (InteractionMode::Idle, _) => None,
        (_, PointerEvent::Down { .. }) => {
            tracing::trace!("pointer-down ignored: gesture already active");
            None
        }
        (
            InteractionMode::Panning {
                start_screen,
                initial_offset,
            },
            event,
        ) => handle_panning(view, event, *start_screen, *initial_offset, events),
        (
            InteractionMode::DraggingNode {
                node,
                start_screen,
                initial_position,
            },
            event,
        ) => handle_dragging_node(graph, event, *node, *start_screen, *initial_position, events),
        (InteractionMode::Linking(pending), event) => {
            handle_linking(view, config, event, graph, pending, events)
        }
        (InteractionMode::Pressing(target), event) => {
            handle_pressing(view, config, event, graph, *target, events)
        }
    };

    if let Some(new_mode) = next_mode {
        *mode = new_mode;
    }
}

/// Handles a pointer-down in the `Idle` state.
///
/// This checks for inputs to transition into:
/// - `Linking` (pressing an output port)
/// - `Pressing` (pressing a delete affordance or a wire)
/// - `DraggingNode` (pressing a node body)
/// - `Panning` (pressing empty space)
fn handle_idle(
    view: &View,
    config: &CanvasConfig,
    screen_pos: Vec2,
    graph: &mut GraphState,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    let Some(local) = view.screen_to_canvas(screen_pos) else {
        tracing::debug!("pointer-down ignored: canvas not measured");
        return None;
    };

    match hit_test(graph, config, local) {
        Hit::OutputPort(source) => {
            events.push(LogicEvent::RepaintNeeded);
            Some(InteractionMode::Linking(PendingConnection {
                source,
                pointer: local,
            }))
        }
        // Input ports only receive wires.
        Hit::InputPort(_) => None,
        Hit::DeleteButton(id) => Some(InteractionMode::Pressing(ClickTarget::DeleteNode(id))),
        Hit::Connection(id) => Some(InteractionMode::Pressing(ClickTarget::Connection(id))),
        Hit::NodeBody(id) => {
            let initial_position = graph.node(id)?.position;
            if graph.selected() != Some(id) {
                graph.select(Some(id));
                events.push(LogicEvent::SelectionChanged(Some(id)));
                events.push(LogicEvent::RepaintNeeded);
            }
            Some(InteractionMode::DraggingNode {
                node: id,
                start_screen: screen_pos,
                initial_position,
            })
        }
        Hit::Empty => Some(InteractionMode::Panning {
            start_screen: screen_pos,
            initial_offset: view.offset(),
        }),
    }
}

/// Handles the `Panning` state.
///
/// Updates the view's offset based on pointer delta. Returns to `Idle` on release.
fn handle_panning(
    view: &mut View,
    event: PointerEvent,
    start_screen: Vec2,
    initial_offset: Vec2,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    match event {
        PointerEvent::Move { pos } => {
            let offset = initial_offset + (pos - start_screen);
            view.set_offset(offset);
            events.push(LogicEvent::ViewportPanned { offset });
            events.push(LogicEvent::RepaintNeeded);
            None
        }
        PointerEvent::Up { .. } => Some(InteractionMode::Idle),
        PointerEvent::Down { .. } => None,
    }
}

/// Handles the `DraggingNode` state.
///
/// The node's position is always `initial_position + (pointer - start_screen)`; it never
/// builds on the previous move, so dropped or coalesced moves cannot cause drift.
/// Release keeps whatever was streamed last.
fn handle_dragging_node(
    graph: &mut GraphState,
    event: PointerEvent,
    node: NodeId,
    start_screen: Vec2,
    initial_position: Vec2,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    match event {
        PointerEvent::Move { pos } => {
            let position = initial_position + (pos - start_screen);
            if graph.move_node(node, position) {
                events.push(LogicEvent::NodeMoved { id: node, position });
                events.push(LogicEvent::RepaintNeeded);
            }
            None
        }
        PointerEvent::Up { .. } => Some(InteractionMode::Idle),
        PointerEvent::Down { .. } => None,
    }
}

/// Handles the `Linking` state.
///
/// Moves update the preview endpoint. Release over another node's input port commits the
/// connection (the store absorbs duplicates); release anywhere else discards the wire.
fn handle_linking(
    view: &View,
    config: &CanvasConfig,
    event: PointerEvent,
    graph: &mut GraphState,
    pending: &mut PendingConnection,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    match event {
        PointerEvent::Move { pos } => {
            if let Some(local) = view.screen_to_canvas(pos) {
                pending.pointer = local;
                events.push(LogicEvent::RepaintNeeded);
            }
            None
        }
        PointerEvent::Up { pos } => {
            let source = pending.source;
            let target = view
                .screen_to_canvas(pos)
                .and_then(|local| port_at(graph, config, local, PortKind::Input));

            match target {
                Some(target) if target != source => {
                    if let Some(id) = graph.add_connection(source, target) {
                        events.push(LogicEvent::ConnectionCreated { id, source, target });
                    }
                }
                Some(_) => tracing::debug!(node = ?source, "wire released on its own input"),
                None => tracing::trace!(node = ?source, "wire released over nothing"),
            }
            events.push(LogicEvent::RepaintNeeded);
            Some(InteractionMode::Idle)
        }
        PointerEvent::Down { .. } => None,
    }
}

/// Handles the `Pressing` state.
///
/// The click completes only if the release lands on the same target.
fn handle_pressing(
    view: &View,
    config: &CanvasConfig,
    event: PointerEvent,
    graph: &mut GraphState,
    target: ClickTarget,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    let PointerEvent::Up { pos } = event else {
        return None;
    };

    let released_on = view
        .screen_to_canvas(pos)
        .map(|local| hit_test(graph, config, local));

    match (target, released_on) {
        (ClickTarget::DeleteNode(id), Some(Hit::DeleteButton(hit))) if hit == id => {
            let was_selected = graph.is_selected(id);
            let cascaded = graph.connections_for_node(id).count();
            if graph.delete_node(id).is_some() {
                events.push(LogicEvent::NodeDeleted { id, cascaded });
                if was_selected {
                    events.push(LogicEvent::SelectionChanged(None));
                }
                events.push(LogicEvent::RepaintNeeded);
            }
        }
        (ClickTarget::Connection(id), Some(Hit::Connection(hit))) if hit == id => {
            if graph.delete_connection(id).is_some() {
                events.push(LogicEvent::ConnectionDeleted { id });
                events.push(LogicEvent::RepaintNeeded);
            }
        }
        _ => tracing::trace!(?target, "click released elsewhere"),
    }
    Some(InteractionMode::Idle)
}
