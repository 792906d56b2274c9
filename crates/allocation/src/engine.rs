use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockflow_core::StockBucketId;

use crate::bucket::StockBucket;

/// How candidate buckets are ordered for consumption.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationStrategy {
    /// Warehouse picking: first a FEFO pass over buckets with an expiry date
    /// strictly later than `cutoff` (earliest expiry first), then a FIFO pass
    /// over buckets with no expiry date (oldest receipt first). Buckets
    /// expired at `cutoff` are invisible to both passes.
    ExpiryThenReceipt { cutoff: DateTime<Utc> },
    /// Shipment-line composition: smallest available bucket first, to minimize
    /// leftover fragments. No expiry filtering; the caller's pre-filter alone
    /// restricts the candidates.
    SmallestAvailableFirst,
}

/// One `(bucket, quantity taken)` step of an allocation plan.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub bucket_id: StockBucketId,
    pub quantity: i64,
}

/// An ordered consumption plan over a bucket snapshot.
///
/// Either the entries sum to the full requested demand, or [`allocate`]
/// failed; a partial plan is never returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    entries: Vec<AllocationEntry>,
}

impl AllocationPlan {
    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<AllocationEntry> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_allocated(&self) -> i64 {
        self.entries.iter().map(|e| e.quantity).sum()
    }
}

/// Allocation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationError {
    /// Not enough available stock to satisfy the demand. Nothing was applied.
    #[error("insufficient stock: requested {requested}, allocatable {allocated} (short {shortfall})")]
    InsufficientStock {
        requested: i64,
        allocated: i64,
        shortfall: i64,
    },
}

/// Produce an ordered allocation plan for `demand` units over `buckets`.
///
/// The caller pre-filters `buckets` to the product (and, for picking, the
/// warehouse) in question. For equal sort keys the order is made reproducible
/// by breaking ties on bucket id ascending, so identical snapshots yield
/// identical plans regardless of input ordering.
///
/// A demand of zero or less has nothing to do and yields an empty plan.
pub fn allocate(
    demand: i64,
    buckets: &[StockBucket],
    strategy: AllocationStrategy,
) -> Result<AllocationPlan, AllocationError> {
    if demand <= 0 {
        return Ok(AllocationPlan::default());
    }

    let mut entries = Vec::new();
    let mut remaining = demand;

    match strategy {
        AllocationStrategy::ExpiryThenReceipt { cutoff } => {
            // Pass 1: dated stock that is still good at the cutoff, FEFO.
            let mut dated: Vec<&StockBucket> = buckets
                .iter()
                .filter(|b| b.available() > 0)
                .filter(|b| matches!(b.expires_at, Some(e) if e > cutoff))
                .collect();
            dated.sort_by_key(|b| (b.expires_at, b.id));
            consume(&mut entries, &mut remaining, &dated);

            // Pass 2: undated stock, FIFO by receipt.
            if remaining > 0 {
                let mut undated: Vec<&StockBucket> = buckets
                    .iter()
                    .filter(|b| b.available() > 0 && b.expires_at.is_none())
                    .collect();
                undated.sort_by_key(|b| (b.received_at, b.id));
                consume(&mut entries, &mut remaining, &undated);
            }
        }
        AllocationStrategy::SmallestAvailableFirst => {
            let mut candidates: Vec<&StockBucket> =
                buckets.iter().filter(|b| b.available() > 0).collect();
            candidates.sort_by_key(|b| (b.available(), b.id));
            consume(&mut entries, &mut remaining, &candidates);
        }
    }

    if remaining > 0 {
        let allocated = demand - remaining;
        tracing::debug!(requested = demand, allocated, "allocation fell short");
        return Err(AllocationError::InsufficientStock {
            requested: demand,
            allocated,
            shortfall: remaining,
        });
    }

    tracing::debug!(requested = demand, steps = entries.len(), "allocation plan built");
    Ok(AllocationPlan { entries })
}

/// Take `min(available, remaining)` from each bucket in order until the
/// demand is exhausted or the pass runs out of buckets.
fn consume(entries: &mut Vec<AllocationEntry>, remaining: &mut i64, buckets: &[&StockBucket]) {
    for bucket in buckets {
        if *remaining == 0 {
            break;
        }
        let take = bucket.available().min(*remaining);
        entries.push(AllocationEntry {
            bucket_id: bucket.id,
            quantity: take,
        });
        *remaining -= take;
    }
}
