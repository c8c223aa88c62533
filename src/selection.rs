//! The selection group.
//!
//! A single [`SelectionGroup`] lives for the whole lifetime of a canvas. It holds
//! weak references (ids) to the nodes currently multi-selected so that moving
//! and deleting apply to all of them at once. The nodes themselves stay owned by
//! the [`Scene`].

use crate::grid::GridPoint;
use crate::types::{GroupId, NodeId, Scene};
use eframe::egui;
use uuid::Uuid;

/// Aggregates the currently multi-selected nodes.
///
/// For every member the node's `group` is this group's id and its `selected`
/// flag is set. Ids of nodes that have since left the scene are skipped.
#[derive(Debug, Clone)]
pub struct SelectionGroup {
    id: GroupId,
    members: Vec<NodeId>,
}

impl Default for SelectionGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionGroup {
    /// Creates an empty group with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            members: Vec::new(),
        }
    }

    /// The group's id, as stored in member nodes.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Member ids in insertion order.
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if the node is a member.
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    /// Adds a node to the group and marks it selected.
    ///
    /// Adding a node twice or a node that is not in the scene is a no-op.
    pub fn add_member(&mut self, scene: &mut Scene, id: NodeId) {
        let Some(node) = scene.node_mut(id) else {
            return;
        };
        node.group = Some(self.id);
        node.selected = true;
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    /// Removes a node from the group and clears its selected flag.
    pub fn remove_member(&mut self, scene: &mut Scene, id: NodeId) {
        self.members.retain(|m| *m != id);
        if let Some(node) = scene.node_mut(id) {
            node.group = None;
            node.selected = false;
        }
    }

    /// Adds the node if absent, removes it otherwise.
    ///
    /// Returns whether the node is a member afterwards.
    pub fn toggle(&mut self, scene: &mut Scene, id: NodeId) -> bool {
        if self.contains(id) {
            self.remove_member(scene, id);
            false
        } else {
            self.add_member(scene, id);
            self.contains(id)
        }
    }

    /// Releases every member and clears its selected flag.
    ///
    /// Members stay in the scene. Clearing an empty group does nothing.
    pub fn clear(&mut self, scene: &mut Scene) {
        for id in self.members.drain(..) {
            if let Some(node) = scene.node_mut(id) {
                node.group = None;
                node.selected = false;
            }
        }
    }

    /// Removes every member from the scene.
    ///
    /// Returns how many nodes were removed.
    pub fn delete(&mut self, scene: &mut Scene) -> usize {
        let mut removed = 0;
        for id in self.members.drain(..) {
            if let Some(node) = scene.node_mut(id) {
                node.group = None;
            }
            if scene.remove_node(id).is_some() {
                removed += 1;
            }
        }
        log::debug!("selection group deleted {removed} nodes");
        removed
    }

    /// Moves every member by `delta`.
    pub fn translate(&self, scene: &mut Scene, delta: GridPoint) {
        for id in &self.members {
            if let Some(node) = scene.node_mut(*id) {
                node.position = node.position + delta;
            }
        }
    }

    /// Union of the members' rectangles, or `None` when the group is empty.
    pub fn bounding_rect(&self, scene: &Scene) -> Option<egui::Rect> {
        self.members
            .iter()
            .filter_map(|id| scene.node(*id))
            .map(|n| n.bounding_rect())
            .reduce(|a, b| a.union(b))
    }
}
