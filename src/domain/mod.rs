//! Domain layer: hierarchy entities and the algorithms over them
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod chart;
pub mod departments;
pub mod entities;
pub mod flatten;
pub mod navigation;

pub use arena::{NodeData, TreeArena, TreeNode};
pub use builder::{build, BuildOptions, TreeBuilder};
pub use chart::OrgChart;
pub use departments::{extract, head_ids};
pub use entities::*;
pub use flatten::{flatten, FlatIndex, PreOrder};
pub use navigation::{
    ExpansionToggles, NavigationController, NavigationState, SearchOptions, ViewMode,
};
