use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockflow_core::{
    DomainError, DomainResult, LocationId, Money, ProductId, StockBucketId, WarehouseId,
};

/// A countable slice of one product at one warehouse (optionally one shelf
/// location), as read from storage at snapshot time.
///
/// Buckets are immutable inputs to the engine; only the owning store mutates
/// them, and only after a plan is accepted. Available quantity is always
/// derived as `quantity - reserved`, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockBucket {
    pub id: StockBucketId,
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub location_id: Option<LocationId>,
    /// Total on-hand quantity in this bucket.
    pub quantity: i64,
    /// Quantity held for other orders. Invariant: `0 <= reserved <= quantity`.
    pub reserved: i64,
    pub batch_no: Option<String>,
    pub serial_no: Option<String>,
    /// Expiry, if this bucket is batch-dated. Buckets expired at the caller's
    /// cutoff are invisible to allocation.
    pub expires_at: Option<DateTime<Utc>>,
    /// When this bucket was received into the warehouse.
    pub received_at: DateTime<Utc>,
    /// Cost per unit in minor currency units.
    pub unit_cost: Money,
}

impl StockBucket {
    /// Quantity not held for other orders.
    #[inline]
    pub fn available(&self) -> i64 {
        self.quantity - self.reserved
    }

    /// Whether this bucket is expired at `cutoff` (expiry at or before it).
    ///
    /// Expired buckets are never selected by allocation; disposing of them is
    /// a separate workflow, so callers that want to surface write-off
    /// candidates check this themselves.
    #[inline]
    pub fn is_expired(&self, cutoff: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(e) if e <= cutoff)
    }

    /// Check the snapshot invariants: non-negative quantity and
    /// `0 <= reserved <= quantity`.
    ///
    /// [`allocate`](crate::allocate) assumes well-formed input; this is for
    /// callers that want to sanity-check a snapshot at the boundary.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity < 0 {
            return Err(DomainError::invariant("quantity cannot be negative"));
        }
        if self.reserved < 0 {
            return Err(DomainError::invariant("reserved cannot be negative"));
        }
        if self.reserved > self.quantity {
            return Err(DomainError::invariant("reserved cannot exceed quantity"));
        }
        Ok(())
    }
}
