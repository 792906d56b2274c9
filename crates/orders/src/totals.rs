use serde::{Deserialize, Serialize};

use stockflow_core::Money;

/// Order-level monetary aggregate.
///
/// Invariant: `total_amount = subtotal + tax_amount + shipping_cost`, each
/// component independently rounded before the sum.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub tax_amount: Money,
    pub shipping_cost: Money,
    pub total_amount: Money,
}

impl OrderTotals {
    pub(crate) fn compose(subtotal: Money, tax_amount: Money, shipping_cost: Money) -> Self {
        Self {
            subtotal,
            tax_amount,
            shipping_cost,
            total_amount: subtotal + tax_amount + shipping_cost,
        }
    }
}
