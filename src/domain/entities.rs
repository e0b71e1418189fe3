//! Domain entities: person records, hierarchy nodes and department summaries

use serde::{Deserialize, Serialize};

/// Identifier shared by employees and employers. Real ids are positive.
pub type PersonId = u64;

/// Id carried by the synthetic root. Never a valid record id.
pub const SYNTHETIC_ROOT_ID: PersonId = 0;

/// Department assigned to nodes that inherit nothing.
pub const UNASSIGNED: &str = "Unassigned";

/// Display-only fields the hierarchy core passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payload {
    pub email: Option<String>,
    pub salary: Option<f64>,
    pub hire_date: Option<String>,
    pub status: Option<String>,
}

/// Flat person record as delivered by the data-fetching layer.
///
/// Employees and employers share this shape; only employers' `department`
/// is authoritative for the subtree they root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub manager_id: Option<PersonId>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, alias = "title")]
    pub position: String,
    #[serde(flatten)]
    pub payload: Payload,
}

impl PersonRecord {
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            manager_id: None,
            department: None,
            position: String::new(),
            payload: Payload::default(),
        }
    }

    pub fn with_manager(mut self, manager_id: PersonId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Declared department, ignoring blank values.
    pub fn declared_department(&self) -> Option<&str> {
        self.department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Which input collection a node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Employee,
    Employer,
    /// Entry point wrapping several natural roots; not part of the input.
    Synthetic,
}

/// Working unit of the hierarchy. Each node exclusively owns its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub id: PersonId,
    pub kind: NodeKind,
    pub name: String,
    pub position: String,
    /// Resolved department (own declaration or inherited from the manager)
    pub department: String,
    pub manager_id: Option<PersonId>,
    #[serde(flatten)]
    pub payload: Payload,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn is_synthetic(&self) -> bool {
        self.kind == NodeKind::Synthetic
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in &node.children {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }

    /// Ids of nodes without children, left to right.
    pub fn leaf_ids(&self) -> Vec<PersonId> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.children.is_empty() {
                leaves.push(node.id);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        leaves
    }

    /// Depth-first search for the node carrying `id`.
    pub fn find(&self, id: PersonId) -> Option<&HierarchyNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id == id {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }
}

/// One department as discovered in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub name: String,
    pub head_id: PersonId,
    pub head_name: String,
    pub employee_count: usize,
}
