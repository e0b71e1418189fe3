//! Organizational hierarchy engine.
//!
//! Turns flat employee and employer records into one rooted tree, derives
//! department summaries from it and drives a two-level navigation state
//! (department grid and drill-down tree) with search-driven expansion.
//!
//! ```
//! use orgtree::domain::{build, extract, FlatIndex, NavigationController, PersonRecord, ViewMode};
//!
//! let employers = vec![PersonRecord::new(1, "Ann").with_department("Exec")];
//! let employees = vec![PersonRecord::new(2, "Bob").with_manager(1)];
//!
//! let root = build(&employees, &employers);
//! let departments = extract(&root, &employers);
//! let index = FlatIndex::new(&root);
//!
//! let mut nav = NavigationController::default();
//! assert_eq!(nav.handle_search("bob", &index, &departments), Some(2));
//! assert_eq!(nav.state().view_mode, ViewMode::MicroTree);
//! assert_eq!(nav.state().current_root, Some(1));
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod exitcode;
pub mod snapshot;
pub mod util;

pub use domain::{
    build, extract, flatten, DepartmentSummary, FlatIndex, HierarchyNode, NavigationController,
    NavigationState, OrgChart, PersonId, PersonRecord, ViewMode,
};
pub use errors::{OrgError, OrgResult};
