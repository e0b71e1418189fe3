//! Id-indexed flat view over a built hierarchy.

use std::collections::HashMap;

use tracing::instrument;

use crate::domain::entities::{HierarchyNode, PersonId};

/// Pre-order walk over an owned hierarchy, yielding each node with its parent id.
pub struct PreOrder<'a> {
    stack: Vec<(&'a HierarchyNode, Option<PersonId>)>,
}

impl<'a> PreOrder<'a> {
    pub fn new(root: &'a HierarchyNode) -> Self {
        Self {
            stack: vec![(root, None)],
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (&'a HierarchyNode, Option<PersonId>);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, parent) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((child, Some(node.id)));
        }
        Some((node, parent))
    }
}

/// Every node of the tree exactly once, in pre-order, synthetic root included.
pub fn flatten(root: &HierarchyNode) -> Vec<&HierarchyNode> {
    PreOrder::new(root).map(|(node, _)| node).collect()
}

/// Flattened nodes plus O(1) lookups by id and by tree parent.
#[derive(Debug)]
pub struct FlatIndex<'a> {
    root: &'a HierarchyNode,
    nodes: Vec<&'a HierarchyNode>,
    positions: HashMap<PersonId, usize>,
    parents: HashMap<PersonId, PersonId>,
}

impl<'a> FlatIndex<'a> {
    #[instrument(level = "debug", skip(root), fields(root = root.id))]
    pub fn new(root: &'a HierarchyNode) -> Self {
        let mut nodes = Vec::new();
        let mut positions = HashMap::new();
        let mut parents = HashMap::new();

        for (node, parent) in PreOrder::new(root) {
            positions.insert(node.id, nodes.len());
            nodes.push(node);
            if let Some(parent_id) = parent {
                parents.insert(node.id, parent_id);
            }
        }

        Self {
            root,
            nodes,
            positions,
            parents,
        }
    }

    pub fn root(&self) -> &'a HierarchyNode {
        self.root
    }

    /// Nodes in flatten order.
    pub fn nodes(&self) -> &[&'a HierarchyNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn get(&self, id: PersonId) -> Option<&'a HierarchyNode> {
        self.positions.get(&id).and_then(|&pos| self.nodes.get(pos).copied())
    }

    pub fn parent_id(&self, id: PersonId) -> Option<PersonId> {
        self.parents.get(&id).copied()
    }

    /// The node this person is linked under. Differs from `manager_id` only
    /// for records whose manager reference was dropped while building.
    pub fn manager_of(&self, id: PersonId) -> Option<&'a HierarchyNode> {
        self.parent_id(id).and_then(|parent| self.get(parent))
    }

    /// Ancestor ids from the nearest parent up to and including the root.
    pub fn ancestors(&self, id: PersonId) -> Vec<PersonId> {
        let mut chain = Vec::new();
        let mut cursor = self.parent_id(id);
        while let Some(parent) = cursor {
            chain.push(parent);
            cursor = self.parent_id(parent);
        }
        chain
    }

    /// True when `id` is `ancestor` itself or lies in its subtree.
    pub fn is_within(&self, id: PersonId, ancestor: PersonId) -> bool {
        if !self.contains(id) {
            return false;
        }
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }
}
