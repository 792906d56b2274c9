//! Kit (bill-of-materials) dependency graph.
//!
//! A kit product lists component products; components may themselves be
//! kits. This crate builds the kit -> component dependency graph from a
//! snapshot and answers the reachability queries that keep the relation
//! acyclic, as deterministic domain logic (no IO, no HTTP, no storage).

pub mod graph;

pub use graph::{KitCycleError, KitGraph};
