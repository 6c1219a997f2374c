//! # Core Data Models
//!
//! This module defines the node/connection model and the Graph Store.
//! It uses `SlotMap` for stable, versioned ids: a key is never reused, so an id that
//! outlives its node simply stops resolving instead of aliasing a newer node.
//!
//! Every mutation of the graph goes through [`GraphState`]. Invalid requests (self-loops,
//! duplicate edges, unknown ids) are absorbed as no-ops and logged at `debug` level.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use slotmap::new_key_type;
use std::collections::HashMap;

use crate::config::CanvasConfig;
use crate::math::{self, PortKind};
use crate::palette::NodeTemplate;

pub use uuid::Uuid;

new_key_type! {
    /// Unique identifier for a Node.
    pub struct NodeId;
    /// Unique identifier for a Connection.
    pub struct ConnectionId;
}

/// Visual grouping of a node. A plain tag, not a subtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeCategory {
    Input,
    Transform,
    Logic,
    Output,
}

impl NodeCategory {
    /// All categories in palette order.
    pub const ALL: [NodeCategory; 4] = [
        NodeCategory::Input,
        NodeCategory::Transform,
        NodeCategory::Logic,
        NodeCategory::Output,
    ];

    /// The wire name (`"INPUT"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Input => "INPUT",
            NodeCategory::Transform => "TRANSFORM",
            NodeCategory::Logic => "LOGIC",
            NodeCategory::Output => "OUTPUT",
        }
    }
}

impl std::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A Node in the graph.
///
/// Only `position` changes after creation; `node_type`, `category` and `label` are copied
/// from the template the node was placed from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Self-reference ID.
    pub id: NodeId,
    /// Stable UUID for keying rendered elements.
    pub uuid: Uuid,
    /// Template key, e.g. `"file_upload"`.
    pub node_type: String,
    pub category: NodeCategory,
    pub label: String,
    /// Canvas-local position of the top-left corner (viewport offset excluded).
    pub position: Vec2,
}

/// A directed edge from `source`'s output port to `target`'s input port.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Self-reference ID.
    pub id: ConnectionId,
    pub source: NodeId,
    pub target: NodeId,
}

impl Connection {
    /// Check if this connection references a specific node.
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// The Graph Store.
///
/// Owns the node and connection arenas plus the single selection slot. It is responsible
/// for data storage and invariants, not for rendering or interaction logic.
#[derive(Clone, Debug, Default)]
pub struct GraphState {
    nodes: SlotMap<NodeId, Node>,
    connections: SlotMap<ConnectionId, Connection>,
    /// Insertion order of nodes. Carries no semantic meaning beyond stable iteration.
    draw_order: Vec<NodeId>,
    /// Creation order of connections. Later wires are drawn, and hit, on top.
    connection_order: Vec<ConnectionId>,
    /// Ordered (source, target) pairs, for O(1) duplicate rejection.
    edge_index: HashMap<(NodeId, NodeId), ConnectionId>,
    /// Index for O(1) UUID to NodeId lookup.
    uuid_index: HashMap<Uuid, NodeId>,
    selected: Option<NodeId>,
}

impl GraphState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a node built from `template` at `position` and returns its fresh id.
    ///
    /// The position is stored verbatim; centering and rounding are the caller's job.
    pub fn add_node(&mut self, template: &NodeTemplate, position: Vec2) -> NodeId {
        let uuid = Uuid::new_v4();
        let id = self.nodes.insert_with_key(|key| Node {
            id: key,
            uuid,
            node_type: template.node_type.clone(),
            category: template.category,
            label: template.label.clone(),
            position,
        });
        self.uuid_index.insert(uuid, id);
        self.draw_order.push(id);
        tracing::debug!(node = ?id, node_type = %template.node_type, ?position, "node added");
        id
    }

    /// Replaces a node's position. Returns `false` if the node does not exist.
    ///
    /// Called on every pointer-move of a drag, so this is a single keyed lookup.
    pub fn move_node(&mut self, id: NodeId, position: Vec2) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = position;
                tracing::trace!(node = ?id, ?position, "node moved");
                true
            }
            None => {
                tracing::debug!(node = ?id, "move ignored: node no longer exists");
                false
            }
        }
    }

    /// Removes a node together with every connection that references it.
    ///
    /// Clears the selection if it pointed at the node. Unknown ids are a no-op.
    pub fn delete_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(id)?;
        self.uuid_index.remove(&node.uuid);
        self.draw_order.retain(|&n| n != id);

        let doomed: Vec<ConnectionId> = self.connections_for_node(id).map(|c| c.id).collect();
        for cid in &doomed {
            self.delete_connection(*cid);
        }

        if self.selected == Some(id) {
            self.selected = None;
        }
        tracing::debug!(node = ?id, cascaded = doomed.len(), "node deleted");
        Some(node)
    }

    /// Connects `source`'s output to `target`'s input.
    ///
    /// Returns `None` without touching the graph for self-loops, duplicate ordered pairs and
    /// endpoints that no longer exist.
    pub fn add_connection(&mut self, source: NodeId, target: NodeId) -> Option<ConnectionId> {
        if source == target {
            tracing::debug!(node = ?source, "connection rejected: self-loop");
            return None;
        }
        if !self.contains_node(source) || !self.contains_node(target) {
            tracing::debug!(?source, ?target, "connection rejected: missing endpoint");
            return None;
        }
        if self.edge_index.contains_key(&(source, target)) {
            tracing::debug!(?source, ?target, "connection rejected: duplicate");
            return None;
        }

        let id = self.connections.insert_with_key(|key| Connection {
            id: key,
            source,
            target,
        });
        self.edge_index.insert((source, target), id);
        self.connection_order.push(id);
        tracing::debug!(connection = ?id, ?source, ?target, "connection added");
        Some(id)
    }

    /// Removes a connection. Unknown ids are a no-op.
    pub fn delete_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let connection = self.connections.remove(id)?;
        self.edge_index.remove(&(connection.source, connection.target));
        self.connection_order.retain(|&c| c != id);
        tracing::debug!(connection = ?id, "connection deleted");
        Some(connection)
    }

    /// Sets or clears the single selection slot.
    ///
    /// Selecting an id that does not exist clears the selection instead.
    pub fn select(&mut self, id: Option<NodeId>) {
        self.selected = id.filter(|id| self.contains_node(*id));
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected == Some(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_by_uuid(&self, uuid: Uuid) -> Option<&Node> {
        self.uuid_index.get(&uuid).and_then(|id| self.nodes.get(*id))
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.draw_order.iter().filter_map(|id| self.nodes.get(*id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// Connections in creation order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connection_order.iter().filter_map(|id| self.connections.get(*id))
    }

    /// Connections that start or end at `node_id`, in creation order.
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections().filter(move |c| c.involves_node(node_id))
    }

    pub fn has_connection(&self, source: NodeId, target: NodeId) -> bool {
        self.edge_index.contains_key(&(source, target))
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Removes every node and connection.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.draw_order.clear();
        self.connection_order.clear();
        self.edge_index.clear();
        self.uuid_index.clear();
        self.selected = None;
    }

    /// Canvas-local anchor of one of a node's ports.
    ///
    /// A node that has vanished (e.g. deleted mid-gesture) yields the origin rather than
    /// failing, so a renderer holding a stale id keeps working for that frame.
    pub fn port_position(&self, id: NodeId, kind: PortKind, config: &CanvasConfig) -> Vec2 {
        self.nodes
            .get(id)
            .map(|node| {
                math::port_anchor(node.position, config.node_size, config.port_offset_y, kind)
            })
            .unwrap_or(Vec2::ZERO)
    }
}
