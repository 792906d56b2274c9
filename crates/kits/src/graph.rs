use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockflow_core::KitId;

/// Adding a component would make the kit transitively depend on itself.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("kit {kit_id} cannot include component {component_id}: the edit would create a cycle")]
pub struct KitCycleError {
    pub kit_id: KitId,
    pub component_id: KitId,
}

/// Kit -> direct-component adjacency over a bill-of-materials snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitGraph {
    adjacency: HashMap<KitId, Vec<KitId>>,
}

impl KitGraph {
    /// Build the graph from node ids and `(kit, component)` edges.
    ///
    /// Edge endpoints missing from `node_ids` are added implicitly, so a
    /// partial snapshot still yields a queryable graph.
    pub fn build(node_ids: &[KitId], edges: &[(KitId, KitId)]) -> Self {
        let mut adjacency: HashMap<KitId, Vec<KitId>> =
            node_ids.iter().map(|id| (*id, Vec::new())).collect();
        for (kit, component) in edges {
            adjacency.entry(*kit).or_default().push(*component);
            adjacency.entry(*component).or_default();
        }
        Self { adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Direct components of a kit (empty for unknown ids).
    pub fn components_of(&self, kit_id: KitId) -> &[KitId] {
        self.adjacency
            .get(&kit_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `to` is reachable from `from` over one or more edges.
    ///
    /// Iterative depth-first search with an explicit stack and a visited
    /// set: arbitrarily deep or cyclic graphs never overflow and terminate
    /// in O(nodes + edges). `has_path(x, x)` is true exactly when a cycle
    /// through `x` exists, including a direct self-edge.
    pub fn has_path(&self, from: KitId, to: KitId) -> bool {
        let mut stack = vec![from];
        let mut visited: HashSet<KitId> = HashSet::new();

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            if let Some(components) = self.adjacency.get(&node) {
                for &component in components {
                    if component == to {
                        return true;
                    }
                    if !visited.contains(&component) {
                        stack.push(component);
                    }
                }
            }
        }

        false
    }

    /// Guard a bill-of-materials edit that adds `component_id` to `kit_id`.
    ///
    /// Rejected when the kit is reachable from the component (the edit would
    /// close a cycle through it), or trivially when kit and component are
    /// the same product. Callers run this before any write.
    pub fn check_component_addition(
        &self,
        kit_id: KitId,
        component_id: KitId,
    ) -> Result<(), KitCycleError> {
        if kit_id == component_id || self.has_path(component_id, kit_id) {
            return Err(KitCycleError {
                kit_id,
                component_id,
            });
        }
        Ok(())
    }
}
