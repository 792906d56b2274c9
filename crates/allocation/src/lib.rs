//! Stock allocation engine.
//!
//! This crate decides which physical stock buckets satisfy a quantity demand
//! and in what order, as deterministic domain logic (no IO, no HTTP, no
//! storage). Callers load a bucket snapshot, run [`allocate`], and persist
//! the returned plan under their own transactional boundary.

pub mod bucket;
pub mod engine;

pub use bucket::StockBucket;
pub use engine::{
    allocate, AllocationEntry, AllocationError, AllocationPlan, AllocationStrategy,
};
