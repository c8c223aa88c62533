//! Core data types for the blueprint canvas.
//!
//! This module defines the node variants, the node entity itself and the scene
//! that owns every node placed on the canvas.

use crate::constants::{NODE_HEIGHT, NODE_WIDTH};
use crate::grid::{snap_to_grid, GridPoint};
use eframe::egui;
use uuid::Uuid;

/// Unique identifier for canvas nodes.
pub type NodeId = Uuid;

/// Unique identifier for selection groups.
pub type GroupId = Uuid;

/// The operation a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Prints its input
    Print,
    /// Branches on a condition
    Branch,
}

impl NodeKind {
    /// Every variant, in context-menu order.
    pub const ALL: [NodeKind; 2] = [NodeKind::Print, NodeKind::Branch];

    /// Display name drawn in the node header.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Print => "Print",
            NodeKind::Branch => "Branch",
        }
    }

    /// Header gradient colors, first at the top and second at the bottom.
    pub fn gradient(self) -> (egui::Color32, egui::Color32) {
        match self {
            NodeKind::Print => (
                egui::Color32::from_rgb(255, 0, 0),
                egui::Color32::from_rgb(60, 60, 60),
            ),
            NodeKind::Branch => (
                egui::Color32::from_rgb(40, 40, 40),
                egui::Color32::from_rgb(80, 80, 80),
            ),
        }
    }

    /// Executes the operation this node stands for.
    ///
    /// No execution semantics are defined yet, so this only records the call.
    pub fn execute(self) {
        log::debug!("execute requested for {} node; no operation defined", self.name());
    }
}

/// A positioned, selectable node on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,
    /// Which operation the node represents
    pub kind: NodeKind,
    /// Top-left corner in scene coordinates, always grid-aligned
    pub position: GridPoint,
    /// Whether the node is currently selected
    pub selected: bool,
    /// The selection group holding this node, if any
    pub group: Option<GroupId>,
}

impl Node {
    /// Creates a node of the given kind at the grid-snapped position `(x, y)`.
    pub fn new(kind: NodeKind, x: i32, y: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position: snap_to_grid(GridPoint::new(x, y)),
            selected: false,
            group: None,
        }
    }

    /// Display name of the node.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The node's rectangle in scene coordinates.
    pub fn bounding_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            self.position.to_pos2(),
            egui::vec2(NODE_WIDTH, NODE_HEIGHT),
        )
    }
}

/// Owner of every node on the canvas.
///
/// Nodes are kept in paint order: later nodes are drawn above earlier ones and
/// win hit tests.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the scene holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node on top of all others and returns its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        log::debug!("adding {} node {} at {:?}", node.name(), id, node.position);
        self.nodes.push(node);
        id
    }

    /// Removes a node from the scene, returning it if it was present.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(index);
        log::debug!("removed {} node {}", node.name(), id);
        Some(node)
    }

    /// Returns `true` if a node with this id is in the scene.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Looks up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Looks up a node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Iterates nodes in paint order (bottom first).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterates nodes mutably in paint order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Returns the topmost node containing the scene position, if any.
    pub fn node_at(&self, pos: egui::Pos2) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.bounding_rect().contains(pos))
            .map(|n| n.id)
    }

    /// Ids of every node whose rectangle intersects `rect`.
    pub fn nodes_intersecting(&self, rect: egui::Rect) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.bounding_rect().intersects(rect))
            .map(|n| n.id)
            .collect()
    }

    /// Ids of every selected node, in paint order.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id)
            .collect()
    }
}
