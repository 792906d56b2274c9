use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use stockflow_core::CategoryId;

/// Marker prepended once per depth level to a node's display label.
const DEPTH_MARKER: &str = "- ";

/// Category snapshot row: an opaque id with a parent pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub parent_id: Option<CategoryId>,
    pub name: String,
}

/// One node of the linearized tree projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub id: CategoryId,
    pub name: String,
    pub depth: usize,
    /// Name prefixed with the depth marker repeated `depth` times.
    pub label: String,
}

impl HierarchyNode {
    fn at_depth(category: &Category, depth: usize) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            depth,
            label: format!("{}{}", DEPTH_MARKER.repeat(depth), category.name),
        }
    }
}

/// Linearize a flat parent-pointer list into display order.
///
/// Categories are grouped by parent, siblings sorted by name (ties broken by
/// id), and emitted in pre-order from the roots. Ids in `excluded` are
/// skipped entirely, used when editing a category to keep it out of its own
/// parent-selection list. Exclusion is by explicit id only, not by computed
/// descendant set; selecting a descendant of the edited category as its new
/// parent is caught at write time by
/// [`assert_no_cycle`](crate::assert_no_cycle), not here.
///
/// Any category the traversal never reaches (its parent chain loops, or
/// points to an excluded or missing id) is appended at the end, unindented,
/// in input order: no input record is ever silently dropped from a listing.
pub fn build_hierarchy(
    categories: &[Category],
    excluded: &HashSet<CategoryId>,
) -> Vec<HierarchyNode> {
    let mut children: HashMap<Option<CategoryId>, Vec<&Category>> = HashMap::new();
    for category in categories {
        if excluded.contains(&category.id) {
            continue;
        }
        children.entry(category.parent_id).or_default().push(category);
    }
    for group in children.values_mut() {
        group.sort_by(|a, b| (a.name.as_str(), a.id).cmp(&(b.name.as_str(), b.id)));
    }

    let mut out = Vec::with_capacity(categories.len());
    let mut visited: HashSet<CategoryId> = HashSet::new();

    // Pre-order traversal from the root group, explicit stack.
    let mut stack: Vec<(&Category, usize)> = Vec::new();
    if let Some(roots) = children.get(&None) {
        for root in roots.iter().rev() {
            stack.push((root, 0));
        }
    }
    while let Some((category, depth)) = stack.pop() {
        if !visited.insert(category.id) {
            continue;
        }
        out.push(HierarchyNode::at_depth(category, depth));
        if let Some(kids) = children.get(&Some(category.id)) {
            for kid in kids.iter().rev() {
                stack.push((kid, depth + 1));
            }
        }
    }

    // Orphans: unreached but not excluded, flat at the end in input order.
    for category in categories {
        if excluded.contains(&category.id) || visited.contains(&category.id) {
            continue;
        }
        out.push(HierarchyNode::at_depth(category, 0));
    }

    out
}
