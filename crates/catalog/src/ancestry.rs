use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockflow_core::CategoryId;

use crate::hierarchy::Category;

/// A proposed re-parenting would make the category its own ancestor.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("category {id} cannot take {attempted_parent} as parent: the edit would create a cycle")]
pub struct CycleError {
    pub id: CategoryId,
    pub attempted_parent: CategoryId,
}

/// Reject a re-parenting edit that would introduce a cycle.
///
/// Rejects immediately when a category is proposed as its own parent;
/// otherwise walks the proposed parent's ancestor chain one hop at a time
/// looking for `category_id`. The walk is capped at the category count: a
/// chain longer than that must revisit a node, i.e. the stored data already
/// contains a cycle, so the cap path reports the same error instead of
/// looping forever.
///
/// Must be called before every structural write; the hierarchy listing's
/// exclusion set does not prevent a descendant from being offered as a
/// parent.
pub fn assert_no_cycle(
    category_id: CategoryId,
    proposed_parent_id: CategoryId,
    categories: &[Category],
) -> Result<(), CycleError> {
    let cycle = || CycleError {
        id: category_id,
        attempted_parent: proposed_parent_id,
    };

    if proposed_parent_id == category_id {
        return Err(cycle());
    }

    let parents: HashMap<CategoryId, Option<CategoryId>> = categories
        .iter()
        .map(|c| (c.id, c.parent_id))
        .collect();

    let mut current = Some(proposed_parent_id);
    let mut hops = 0usize;
    while let Some(id) = current {
        if id == category_id {
            return Err(cycle());
        }
        hops += 1;
        if hops > categories.len() {
            return Err(cycle());
        }
        current = parents.get(&id).copied().flatten();
    }

    Ok(())
}
