//! Read-only view of everything a renderer needs for one frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::interaction::PendingConnection;
use crate::model::{Connection, GraphState, Node, NodeId};
use crate::view::View;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    /// Nodes in insertion order.
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub pending_connection: Option<PendingConnection>,
    pub selected: Option<NodeId>,
    pub viewport_offset: Vec2,
}

impl CanvasSnapshot {
    pub fn capture(
        graph: &GraphState,
        view: &View,
        pending_connection: Option<PendingConnection>,
    ) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            connections: graph.connections().cloned().collect(),
            pending_connection,
            selected: graph.selected(),
            viewport_offset: view.offset(),
        }
    }
}
