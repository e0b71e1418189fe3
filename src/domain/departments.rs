//! Department summaries derived from a built hierarchy.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::entities::{
    DepartmentSummary, HierarchyNode, NodeKind, PersonId, PersonRecord,
};
use crate::domain::flatten::PreOrder;

/// Walks the tree and reports one summary per discovered department.
///
/// A department is discovered at the first employer (in pre-order) declaring
/// it; that employer stays its head. Membership is per node: an employer
/// counts towards its own declared department, everyone else towards their
/// resolved department, regardless of whose subtree they sit in. Only nodes
/// built from an employer record can declare a department.
#[instrument(level = "debug", skip_all, fields(root = root.id, employers = employers.len()))]
pub fn extract(root: &HierarchyNode, employers: &[PersonRecord]) -> Vec<DepartmentSummary> {
    let mut declared: HashMap<PersonId, &str> = HashMap::with_capacity(employers.len());
    for employer in employers {
        if let Some(department) = employer.declared_department() {
            declared.entry(employer.id).or_insert(department);
        }
    }

    let starts: Vec<&HierarchyNode> = if root.is_synthetic() {
        root.children.iter().collect()
    } else {
        vec![root]
    };

    let mut summaries: Vec<DepartmentSummary> = Vec::new();
    let mut discovered: HashMap<&str, usize> = HashMap::new();
    let mut members: HashMap<&str, HashSet<PersonId>> = HashMap::new();

    for start in starts {
        for (node, _) in PreOrder::new(start) {
            // an employer record merged away as a duplicate declares nothing
            let own = match node.kind {
                NodeKind::Employer => declared.get(&node.id).copied(),
                _ => None,
            };
            if let Some(department) = own {
                if !discovered.contains_key(department) {
                    debug!(department, head = node.id, "discovered department");
                    discovered.insert(department, summaries.len());
                    summaries.push(DepartmentSummary {
                        name: department.to_string(),
                        head_id: node.id,
                        head_name: node.name.clone(),
                        employee_count: 0,
                    });
                }
            }
            let attributed = own.unwrap_or(node.department.as_str());
            members.entry(attributed).or_default().insert(node.id);
        }
    }

    for summary in &mut summaries {
        summary.employee_count = members
            .get(summary.name.as_str())
            .map_or(0, HashSet::len);
    }
    summaries
}

/// Ids of all department heads, for anchoring drill-down views.
pub fn head_ids(departments: &[DepartmentSummary]) -> HashSet<PersonId> {
    departments.iter().map(|d| d.head_id).collect()
}
