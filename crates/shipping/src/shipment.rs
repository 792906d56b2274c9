use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockflow_allocation::{allocate, AllocationEntry, AllocationStrategy, StockBucket};
use stockflow_core::{ProductId, StockBucketId};

/// Order-line progress snapshot: how much was ordered and how much has
/// already shipped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingLine {
    pub product_id: ProductId,
    pub quantity: i64,
    pub shipped_quantity: i64,
}

impl OutstandingLine {
    /// Quantity still to ship.
    #[inline]
    pub fn remaining(&self) -> i64 {
        self.quantity - self.shipped_quantity
    }
}

/// One composed shipment line with its bucket-level allocation steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentLine {
    pub product_id: ProductId,
    pub quantity: i64,
    pub allocations: Vec<AllocationEntry>,
}

/// Shipment composition failure.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentError {
    /// No line had outstanding demand; there is nothing to compose.
    #[error("nothing to ship")]
    NothingToShip,

    /// One line's remaining demand cannot be fully covered; the whole build
    /// is abandoned (no partial shipment is ever returned).
    #[error("line for product {product_id} cannot be fully shipped")]
    LineUnshippable { product_id: ProductId },
}

/// Compose a complete shipment for every order line still owing stock.
///
/// For each line with `remaining > 0`, allocates smallest-bucket-first over
/// that line's product buckets. Quantity taken by an earlier line is held
/// back from later lines of the same product, so one bucket is never
/// promised twice within a build. Fails the entire call on the first line
/// that cannot be covered.
pub fn build_shipment_lines(
    lines: &[OutstandingLine],
    buckets: &[StockBucket],
) -> Result<Vec<ShipmentLine>, ShipmentError> {
    let mut consumed: HashMap<StockBucketId, i64> = HashMap::new();
    let mut shipment = Vec::new();

    for line in lines {
        let remaining = line.remaining();
        if remaining <= 0 {
            continue;
        }

        let candidates: Vec<StockBucket> = buckets
            .iter()
            .filter(|b| b.product_id == line.product_id)
            .map(|b| {
                let mut candidate = b.clone();
                candidate.reserved += consumed.get(&b.id).copied().unwrap_or(0);
                candidate
            })
            .collect();

        let plan = allocate(
            remaining,
            &candidates,
            AllocationStrategy::SmallestAvailableFirst,
        )
        .map_err(|err| {
            tracing::debug!(product_id = %line.product_id, %err, "shipment build abandoned");
            ShipmentError::LineUnshippable {
                product_id: line.product_id,
            }
        })?;

        for entry in plan.entries() {
            *consumed.entry(entry.bucket_id).or_insert(0) += entry.quantity;
        }
        shipment.push(ShipmentLine {
            product_id: line.product_id,
            quantity: remaining,
            allocations: plan.into_entries(),
        });
    }

    if shipment.is_empty() {
        return Err(ShipmentError::NothingToShip);
    }

    tracing::debug!(lines = shipment.len(), "shipment lines built");
    Ok(shipment)
}
