use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{HierarchyNode, NodeKind, Payload, PersonId};

/// Node payload while the hierarchy is being assembled.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub id: PersonId,
    pub kind: NodeKind,
    pub name: String,
    pub position: String,
    /// Department declared by the record itself (employers only)
    pub declared_department: Option<String>,
    /// Filled in by department resolution after linking
    pub department: String,
    pub manager_id: Option<PersonId>,
    pub payload: Payload,
}

/// Node in the arena, linked by index.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of the parent node, None for roots
    pub parent: Option<Index>,
    pub children: Vec<Index>,
}

/// Arena-backed staging area for building the hierarchy.
///
/// Nodes are inserted unlinked first so that forward references between
/// records resolve regardless of input order. Linking happens by index, and
/// the finished structure is converted into an owned [`HierarchyNode`] tree.
#[derive(Debug, Default)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    /// Insertion order, used for deterministic root and child ordering
    order: Vec<Index>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "trace", skip(self, data), fields(id = data.id))]
    pub fn insert_node(&mut self, data: NodeData) -> Index {
        let node_idx = self.arena.insert(TreeNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        self.order.push(node_idx);
        node_idx
    }

    /// Appends `child` to `parent`'s children. A child already attached
    /// elsewhere is left untouched.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, child: Index, parent: Index) -> bool {
        if child == parent || !self.arena.contains(parent) {
            return false;
        }
        match self.arena.get_mut(child) {
            Some(node) if node.parent.is_none() => node.parent = Some(parent),
            _ => return false,
        }
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(child);
        }
        true
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    /// Unparented nodes in insertion order.
    pub fn roots(&self) -> Vec<Index> {
        self.order
            .iter()
            .copied()
            .filter(|&idx| self.arena.get(idx).is_some_and(|n| n.parent.is_none()))
            .collect()
    }

    pub fn iter_from(&self, start: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, start)
    }

    pub fn iter_postorder_from(&self, start: Index) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, start)
    }

    /// Materializes the subtree under `root` into owned nodes.
    ///
    /// Walks post-order so every child is finished before its parent, which
    /// keeps the conversion iterative for arbitrarily deep chains.
    #[instrument(level = "debug", skip(self))]
    pub fn into_tree(mut self, root: Index) -> Option<HierarchyNode> {
        let postorder: Vec<Index> = self.iter_postorder_from(root).map(|(idx, _)| idx).collect();
        let mut built: HashMap<Index, HierarchyNode> = HashMap::with_capacity(postorder.len());

        for idx in postorder {
            let node = self.arena.remove(idx)?;
            let children = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            let data = node.data;
            built.insert(
                idx,
                HierarchyNode {
                    id: data.id,
                    kind: data.kind,
                    name: data.name,
                    position: data.position,
                    department: data.department,
                    manager_id: data.manager_id,
                    payload: data.payload,
                    children,
                },
            );
        }

        built.remove(&root)
    }
}

/// Pre-order iterator: parents are yielded before their children.
pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena, start: Index) -> Self {
        Self {
            arena,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena, start: Index) -> Self {
        Self {
            arena,
            stack: vec![(start, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(id: PersonId) -> NodeData {
        NodeData {
            id,
            kind: NodeKind::Employee,
            name: format!("p{id}"),
            position: String::new(),
            declared_department: None,
            department: String::new(),
            manager_id: None,
            payload: Payload::default(),
        }
    }

    //      1
    //     / \
    //    2   3
    //    |
    //    4
    fn sample() -> (TreeArena, Vec<Index>) {
        let mut arena = TreeArena::new();
        let idx: Vec<Index> = (1..=4).map(|id| arena.insert_node(data(id))).collect();
        arena.attach(idx[1], idx[0]);
        arena.attach(idx[2], idx[0]);
        arena.attach(idx[3], idx[1]);
        (arena, idx)
    }

    #[test]
    fn given_linked_nodes_when_iterating_then_preorder_and_postorder_are_left_to_right() {
        let (arena, idx) = sample();
        let pre: Vec<PersonId> = arena.iter_from(idx[0]).map(|(_, n)| n.data.id).collect();
        let post: Vec<PersonId> = arena
            .iter_postorder_from(idx[0])
            .map(|(_, n)| n.data.id)
            .collect();
        assert_eq!(pre, vec![1, 2, 4, 3]);
        assert_eq!(post, vec![4, 2, 3, 1]);
    }

    #[test]
    fn given_attached_child_when_attaching_again_then_keeps_first_parent() {
        let (mut arena, idx) = sample();
        assert!(!arena.attach(idx[3], idx[2]));
        assert!(!arena.attach(idx[0], idx[0]));
        assert_eq!(arena.roots(), vec![idx[0]]);
    }

    #[test]
    fn given_arena_when_converting_then_owned_tree_keeps_child_order() {
        let (arena, idx) = sample();
        let tree = arena.into_tree(idx[0]).unwrap();
        assert_eq!(tree.id, 1);
        let child_ids: Vec<PersonId> = tree.children.iter().map(|c| c.id).collect();
        assert_eq!(child_ids, vec![2, 3]);
        assert_eq!(tree.children[0].children[0].id, 4);
        assert_eq!(tree.depth(), 3);
    }
}
