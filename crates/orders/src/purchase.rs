use serde::{Deserialize, Serialize};

use stockflow_core::{Money, ProductId};

use crate::totals::OrderTotals;

/// Raw purchase-order line as entered on the form (prices pre-rounding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLineInput {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Raw unit price; rounded to minor units before any other use.
    pub unit_price: f64,
    /// Tax rate in percent. Stored on the line, but purchase-order tax is an
    /// order-level amount and is never folded into the line total.
    pub tax_rate: u32,
    pub note: Option<String>,
}

/// Computed purchase-order line. Immutable once the order leaves draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
    pub tax_rate: u32,
    pub total_price: Money,
    pub note: Option<String>,
}

/// Build purchase-order lines: round the unit price first, then the line
/// total is an exact integer multiple of it.
pub fn build_purchase_order_lines(inputs: &[PurchaseLineInput]) -> Vec<PurchaseOrderLine> {
    inputs
        .iter()
        .map(|input| {
            let unit_price = Money::from_raw(input.unit_price);
            PurchaseOrderLine {
                product_id: input.product_id,
                quantity: input.quantity,
                unit_price,
                tax_rate: input.tax_rate,
                total_price: unit_price * input.quantity,
                note: input.note.clone(),
            }
        })
        .collect()
}

/// Aggregate purchase-order totals. Tax and shipping arrive as order-level
/// raw amounts and are each rounded independently before the final sum.
pub fn compute_purchase_order_totals(
    lines: &[PurchaseOrderLine],
    tax_amount: f64,
    shipping_cost: f64,
) -> OrderTotals {
    let subtotal: Money = lines.iter().map(|l| l.total_price).sum();
    OrderTotals::compose(
        subtotal,
        Money::from_raw(tax_amount),
        Money::from_raw(shipping_cost),
    )
}
