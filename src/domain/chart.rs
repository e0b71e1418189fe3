//! One built snapshot of the organization: tree plus department summaries.

use tracing::{info, instrument};

use crate::domain::builder::{BuildOptions, TreeBuilder};
use crate::domain::departments::extract;
use crate::domain::entities::{DepartmentSummary, HierarchyNode, PersonId, PersonRecord};
use crate::domain::flatten::FlatIndex;

/// Derived views over one immutable pair of person collections.
///
/// A newer snapshot replaces the whole chart; nothing is updated in place.
#[derive(Debug, Clone)]
pub struct OrgChart {
    root: HierarchyNode,
    departments: Vec<DepartmentSummary>,
}

impl OrgChart {
    #[instrument(level = "debug", skip_all)]
    pub fn build(
        employees: &[PersonRecord],
        employers: &[PersonRecord],
        options: &BuildOptions,
    ) -> Self {
        let root = TreeBuilder::new(options.clone()).build(employees, employers);
        let departments = extract(&root, employers);
        info!(
            records = employees.len() + employers.len(),
            departments = departments.len(),
            "built org chart"
        );
        Self { root, departments }
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.root
    }

    pub fn departments(&self) -> &[DepartmentSummary] {
        &self.departments
    }

    /// Flat index borrowing this chart's tree.
    pub fn index(&self) -> FlatIndex<'_> {
        FlatIndex::new(&self.root)
    }

    /// Nodes in the tree, synthetic root included.
    pub fn node_count(&self) -> usize {
        self.index().len()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_ids(&self) -> Vec<PersonId> {
        self.root.leaf_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_two_roots_when_building_chart_then_counts_include_synthetic_root() {
        let employers = vec![
            PersonRecord::new(1, "a").with_department("Sales"),
            PersonRecord::new(2, "b").with_department("Ops"),
        ];
        let employees = vec![PersonRecord::new(3, "c").with_manager(1)];
        let chart = OrgChart::build(&employees, &employers, &BuildOptions::default());

        assert_eq!(chart.node_count(), 4);
        assert_eq!(chart.depth(), 3);
        assert_eq!(chart.leaf_ids(), vec![3, 2]);
        assert_eq!(chart.departments().len(), 2);
    }
}
