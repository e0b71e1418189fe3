//! Two-level navigation over the hierarchy: department grid and drill-down tree.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::domain::departments::head_ids;
use crate::domain::entities::{DepartmentSummary, HierarchyNode, PersonId};
use crate::domain::flatten::FlatIndex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewMode {
    /// Aggregate grid of department summaries
    #[default]
    MacroGrid,
    /// Drill-down subtree rooted at `current_root`
    MicroTree,
}

/// What the rendering layer needs to draw the current view.
///
/// Nodes are referenced by id only, so the state survives tree rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub view_mode: ViewMode,
    pub current_root: Option<PersonId>,
    pub search_highlight: Option<PersonId>,
    /// Ancestors that must be expanded to reveal the highlighted node
    pub expanded_path: BTreeSet<PersonId>,
}

impl NavigationState {
    pub fn current_root_node<'a>(&self, index: &FlatIndex<'a>) -> Option<&'a HierarchyNode> {
        self.current_root.and_then(|id| index.get(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Fall back to matching `position` when no name matches
    pub match_position: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            match_position: true,
        }
    }
}

/// State machine driving the department grid / drill-down navigation.
#[derive(Debug, Default)]
pub struct NavigationController {
    state: NavigationState,
    options: SearchOptions,
}

impl NavigationController {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            state: NavigationState::default(),
            options,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Drills into the subtree rooted at `head_id`.
    ///
    /// An unknown id returns false. A still valid view is kept as is, while a
    /// view whose own root has vanished falls back to the department grid.
    /// A highlight outside the new subtree is dropped with its expanded path;
    /// without a highlight, only path entries inside the subtree survive.
    #[instrument(level = "debug", skip(self, index))]
    pub fn open_department(&mut self, head_id: PersonId, index: &FlatIndex<'_>) -> bool {
        if !index.contains(head_id) {
            warn!(head_id, "cannot open department, id not in hierarchy");
            self.revalidate(index);
            return false;
        }

        self.state.view_mode = ViewMode::MicroTree;
        self.state.current_root = Some(head_id);
        match self.state.search_highlight {
            Some(highlight) if index.is_within(highlight, head_id) => {}
            Some(_) => self.clear_search(),
            None => self
                .state
                .expanded_path
                .retain(|&id| index.is_within(id, head_id)),
        }
        debug!(head_id, "opened department");
        true
    }

    #[instrument(level = "debug", skip(self))]
    pub fn reset_view(&mut self) {
        self.state = NavigationState::default();
    }

    /// Highlights the first node whose name (then position) contains `query`,
    /// case-insensitively, in flatten order.
    ///
    /// On a match the ancestors below the root become the expanded path, and
    /// the view drills into the top-most department head above the match
    /// unless the current subtree already contains it. Without a match only
    /// the highlight is cleared.
    #[instrument(level = "debug", skip(self, index, departments))]
    pub fn handle_search(
        &mut self,
        query: &str,
        index: &FlatIndex<'_>,
        departments: &[DepartmentSummary],
    ) -> Option<PersonId> {
        let needle = query.trim().to_lowercase();
        let found = if needle.is_empty() {
            None
        } else {
            self.find_match(&needle, index)
        };

        let Some(matched) = found else {
            debug!(query, "no match");
            self.state.search_highlight = None;
            return None;
        };

        let root_id = index.root().id;
        let ancestors = index.ancestors(matched);

        self.state.search_highlight = Some(matched);
        self.state.expanded_path = ancestors
            .iter()
            .copied()
            .filter(|&id| id != root_id)
            .collect();

        let reachable = self.state.view_mode == ViewMode::MicroTree
            && self
                .state
                .current_root
                .is_some_and(|current| index.is_within(matched, current));
        if !reachable {
            let anchor = anchor_for(matched, &ancestors, index, &head_ids(departments));
            debug!(matched, anchor, "drilling into search result");
            self.state.view_mode = ViewMode::MicroTree;
            self.state.current_root = Some(anchor);
        }
        Some(matched)
    }

    /// Drops references to nodes that vanished in a rebuild.
    #[instrument(level = "debug", skip_all)]
    pub fn revalidate(&mut self, index: &FlatIndex<'_>) {
        if let Some(current) = self.state.current_root {
            if !index.contains(current) {
                warn!(current, "current root no longer exists, returning to department grid");
                self.state.view_mode = ViewMode::MacroGrid;
                self.state.current_root = None;
            }
        }
        if let Some(highlight) = self.state.search_highlight {
            if !index.contains(highlight) {
                warn!(highlight, "highlighted node no longer exists");
                self.clear_search();
            }
        }
        self.state.expanded_path.retain(|&id| index.contains(id));
    }

    fn clear_search(&mut self) {
        self.state.search_highlight = None;
        self.state.expanded_path.clear();
    }

    fn find_match<'a>(&self, needle: &str, index: &FlatIndex<'a>) -> Option<PersonId> {
        let candidates = || index.nodes().iter().filter(|node| !node.is_synthetic());
        candidates()
            .find(|node| node.name.to_lowercase().contains(needle))
            .or_else(|| {
                self.options
                    .match_position
                    .then(|| {
                        candidates().find(|node| node.position.to_lowercase().contains(needle))
                    })
                    .flatten()
            })
            .map(|node| node.id)
    }
}

/// Top-most department head among the match and its ancestors, falling back
/// to the overall root.
fn anchor_for(
    matched: PersonId,
    ancestors: &[PersonId],
    index: &FlatIndex<'_>,
    heads: &HashSet<PersonId>,
) -> PersonId {
    std::iter::once(&matched)
        .chain(ancestors)
        .copied()
        .filter(|id| heads.contains(id))
        .last()
        .unwrap_or_else(|| index.root().id)
}

/// Nodes the user expanded by hand. Lives in the rendering layer; the
/// controller never stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionToggles {
    expanded: HashSet<PersonId>,
}

impl ExpansionToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the node and returns whether it is now manually expanded.
    pub fn toggle(&mut self, id: PersonId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn is_toggled(&self, id: PersonId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    /// Expanded when toggled by hand or required by the active search path.
    pub fn is_expanded(&self, id: PersonId, state: &NavigationState) -> bool {
        self.is_toggled(id) || state.expanded_path.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::build;
    use crate::domain::departments::extract;
    use crate::domain::entities::PersonRecord;

    #[test]
    fn given_toggles_when_flipping_then_union_with_search_path() {
        let mut toggles = ExpansionToggles::new();
        let state = NavigationState {
            expanded_path: BTreeSet::from([5]),
            ..NavigationState::default()
        };
        assert!(toggles.toggle(3));
        assert!(toggles.is_expanded(3, &state));
        assert!(toggles.is_expanded(5, &state));
        assert!(!toggles.toggle(3));
        assert!(!toggles.is_expanded(3, &state));
    }

    #[test]
    fn given_name_and_position_matches_when_searching_then_name_wins() {
        let employees = vec![
            PersonRecord::new(2, "Bob").with_manager(1).with_position("Engineer"),
            PersonRecord::new(3, "Engelbert").with_manager(1),
        ];
        let employers = vec![PersonRecord::new(1, "Ann").with_department("Exec")];
        let root = build(&employees, &employers);
        let index = FlatIndex::new(&root);
        let departments = extract(&root, &employers);

        let mut nav = NavigationController::default();
        assert_eq!(nav.handle_search("ENGE", &index, &departments), Some(3));
        assert_eq!(nav.handle_search("neer", &index, &departments), Some(2));

        let mut names_only = NavigationController::new(SearchOptions {
            match_position: false,
        });
        assert_eq!(names_only.handle_search("neer", &index, &departments), None);
    }
}
