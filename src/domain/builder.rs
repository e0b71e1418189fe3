//! Tree builder turning flat employee/employer collections into one rooted hierarchy.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::entities::{
    HierarchyNode, NodeKind, Payload, PersonId, PersonRecord, SYNTHETIC_ROOT_ID, UNASSIGNED,
};

/// Labels used for nodes the input does not describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Department for nodes with nothing to inherit
    pub unassigned_label: String,
    /// Display name of the synthetic root
    pub root_label: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            unassigned_label: UNASSIGNED.to_string(),
            root_label: String::new(),
        }
    }
}

/// Constructs the organization hierarchy from person records.
///
/// The build is a pure function of its inputs: malformed manager references
/// and cycles are normalized into extra roots, never reported as errors.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    options: BuildOptions,
}

impl TreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    #[instrument(
        level = "debug",
        skip_all,
        fields(employees = employees.len(), employers = employers.len())
    )]
    pub fn build(&self, employees: &[PersonRecord], employers: &[PersonRecord]) -> HierarchyNode {
        let records = merge_records(employees, employers);
        let order: Vec<PersonId> = records.iter().map(|(r, _)| r.id).collect();
        let known: HashSet<PersonId> = order.iter().copied().collect();

        let mut parents: HashMap<PersonId, Option<PersonId>> = records
            .iter()
            .map(|(record, _)| (record.id, resolve_manager(record, &known)))
            .collect();
        break_cycles(&order, &mut parents);

        let mut arena = TreeArena::new();
        let mut indices: HashMap<PersonId, Index> = HashMap::with_capacity(records.len());
        for (record, kind) in &records {
            let idx = arena.insert_node(node_data(record, *kind));
            indices.insert(record.id, idx);
        }
        for id in &order {
            if let (Some(&child), Some(Some(manager))) = (indices.get(id), parents.get(id)) {
                if let Some(&parent) = indices.get(manager) {
                    arena.attach(child, parent);
                }
            }
        }

        let roots = arena.roots();
        let root = match roots.as_slice() {
            [single] => *single,
            _ => {
                debug!(roots = roots.len(), "wrapping natural roots under synthetic root");
                let synthetic = arena.insert_node(self.synthetic_data());
                for &idx in &roots {
                    arena.attach(idx, synthetic);
                }
                synthetic
            }
        };

        self.resolve_departments(&mut arena, root);

        // The root index was just inserted or returned by roots(), so the
        // conversion always finds it.
        arena
            .into_tree(root)
            .unwrap_or_else(|| self.empty_root())
    }

    /// Assigns each node its own declared department or the one resolved for
    /// its parent. Pre-order guarantees parents are resolved first.
    fn resolve_departments(&self, arena: &mut TreeArena, root: Index) {
        let preorder: Vec<Index> = arena.iter_from(root).map(|(idx, _)| idx).collect();
        for idx in preorder {
            let inherited = arena
                .get_node(idx)
                .and_then(|node| node.parent)
                .and_then(|parent| arena.get_node(parent))
                .filter(|parent| parent.data.kind != NodeKind::Synthetic)
                .map(|parent| parent.data.department.clone());

            if let Some(node) = arena.get_node_mut(idx) {
                node.data.department = match (&node.data.kind, &node.data.declared_department) {
                    (NodeKind::Synthetic, _) => String::new(),
                    (_, Some(declared)) => declared.clone(),
                    (_, None) => inherited.unwrap_or_else(|| self.options.unassigned_label.clone()),
                };
            }
        }
    }

    fn synthetic_data(&self) -> NodeData {
        NodeData {
            id: SYNTHETIC_ROOT_ID,
            kind: NodeKind::Synthetic,
            name: self.options.root_label.clone(),
            position: String::new(),
            declared_department: None,
            department: String::new(),
            manager_id: None,
            payload: Payload::default(),
        }
    }

    fn empty_root(&self) -> HierarchyNode {
        let data = self.synthetic_data();
        HierarchyNode {
            id: data.id,
            kind: data.kind,
            name: data.name,
            position: data.position,
            department: data.department,
            manager_id: None,
            payload: data.payload,
            children: Vec::new(),
        }
    }
}

/// Builds the hierarchy with default options.
pub fn build(employees: &[PersonRecord], employers: &[PersonRecord]) -> HierarchyNode {
    TreeBuilder::default().build(employees, employers)
}

/// Merges both collections in input order (employees first). The first
/// record wins on duplicate ids; id 0 is reserved for the synthetic root.
fn merge_records<'a>(
    employees: &'a [PersonRecord],
    employers: &'a [PersonRecord],
) -> Vec<(&'a PersonRecord, NodeKind)> {
    let mut seen = HashSet::new();
    employees
        .iter()
        .map(|r| (r, NodeKind::Employee))
        .chain(employers.iter().map(|r| (r, NodeKind::Employer)))
        .filter(|(record, kind)| {
            if record.id == SYNTHETIC_ROOT_ID {
                warn!(name = %record.name, ?kind, "skipping record with reserved id 0");
                return false;
            }
            if !seen.insert(record.id) {
                warn!(id = record.id, ?kind, "skipping duplicate record id");
                return false;
            }
            true
        })
        .collect()
}

/// Manager id to link under, or None when the record must become a root.
fn resolve_manager(record: &PersonRecord, known: &HashSet<PersonId>) -> Option<PersonId> {
    let manager = record.manager_id?;
    if manager == record.id {
        warn!(id = record.id, "self-referencing manager, treating as root");
        None
    } else if !known.contains(&manager) {
        warn!(id = record.id, manager, "unknown manager, treating as root");
        None
    } else {
        Some(manager)
    }
}

/// Cuts every manager-chain cycle by rooting the first node at which a walk
/// revisits itself. Nodes already proven to reach a root are not walked again.
fn break_cycles(order: &[PersonId], parents: &mut HashMap<PersonId, Option<PersonId>>) {
    let mut settled: HashSet<PersonId> = HashSet::with_capacity(order.len());

    for &start in order {
        let mut trail: Vec<PersonId> = Vec::new();
        let mut on_trail: HashSet<PersonId> = HashSet::new();
        let mut cursor = Some(start);

        while let Some(id) = cursor {
            if settled.contains(&id) {
                break;
            }
            if !on_trail.insert(id) {
                warn!(id, "manager chain cycle detected, treating as root");
                parents.insert(id, None);
                break;
            }
            trail.push(id);
            cursor = parents.get(&id).copied().flatten();
        }

        settled.extend(trail);
    }
}

fn node_data(record: &PersonRecord, kind: NodeKind) -> NodeData {
    let declared_department = match kind {
        NodeKind::Employer => record.declared_department().map(str::to_string),
        _ => None,
    };
    NodeData {
        id: record.id,
        kind,
        name: record.name.clone(),
        position: record.position.clone(),
        declared_department,
        department: String::new(),
        manager_id: record.manager_id,
        payload: record.payload.clone(),
    }
}
