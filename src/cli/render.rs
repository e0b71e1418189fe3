/*
Terminal rendering of the hierarchy with termtree.

The core only hands out the tree, the navigation state and the manual
toggles; deciding which nodes are drawn expanded happens here.
 */
use colored::Colorize;
use itertools::Itertools;
use termtree::Tree;

use crate::domain::{DepartmentSummary, ExpansionToggles, HierarchyNode, NavigationState};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for HierarchyNode {
    /// Fully expanded rendering.
    fn to_tree_string(&self) -> Tree<String> {
        build_tree(self, |_| true, label)
    }
}

/// `name · position · department (#id)`; the synthetic root shows its name only.
pub fn label(node: &HierarchyNode) -> String {
    if node.is_synthetic() {
        return node.name.clone();
    }
    let text = [&node.name, &node.position, &node.department]
        .into_iter()
        .filter(|part| !part.is_empty())
        .join(" · ");
    format!("{} (#{})", text, node.id)
}

/// Drill-down rendering: `view_root` is always open, other nodes only when
/// toggled by hand or on the search path. Collapsed nodes show their hidden
/// child count.
pub fn render_view(
    view_root: &HierarchyNode,
    state: &NavigationState,
    toggles: &ExpansionToggles,
) -> Tree<String> {
    let is_open = |node: &HierarchyNode| {
        node.id == view_root.id || toggles.is_expanded(node.id, state)
    };
    build_tree(view_root, &is_open, |node| {
        let mut text = label(node);
        if state.search_highlight == Some(node.id) {
            text = format!("{} {}", "▶".yellow(), text.yellow().bold());
        }
        if !is_open(node) && !node.children.is_empty() {
            text = format!("{} [+{}]", text, node.children.len());
        }
        text
    })
}

/// Post-order build with an explicit stack: each finished subtree is pushed
/// onto `done`, and a parent collects its children's trees from the top.
fn build_tree(
    root: &HierarchyNode,
    is_open: impl Fn(&HierarchyNode) -> bool,
    text: impl Fn(&HierarchyNode) -> String,
) -> Tree<String> {
    let mut stack = vec![(root, false)];
    let mut done: Vec<Tree<String>> = Vec::new();

    while let Some((node, visited)) = stack.pop() {
        let expand = !node.children.is_empty() && is_open(node);
        if visited {
            let leaves = done.split_off(done.len().saturating_sub(node.children.len()));
            done.push(Tree::new(text(node)).with_leaves(leaves));
        } else if expand {
            stack.push((node, true));
            for child in node.children.iter().rev() {
                stack.push((child, false));
            }
        } else {
            done.push(Tree::new(text(node)));
        }
    }

    done.pop().unwrap_or_else(|| Tree::new(String::new()))
}

/// One line per department: name, head and member count.
pub fn department_lines(departments: &[DepartmentSummary]) -> Vec<String> {
    let width = departments
        .iter()
        .map(|d| d.name.chars().count())
        .max()
        .unwrap_or(0);
    departments
        .iter()
        .map(|d| {
            format!(
                "{:<width$}  head: {} (#{})  members: {}",
                d.name,
                d.head_name,
                d.head_id,
                d.employee_count,
                width = width
            )
        })
        .collect()
}
