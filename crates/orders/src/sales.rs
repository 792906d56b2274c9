use serde::{Deserialize, Serialize};

use stockflow_core::{Money, ProductId};

use crate::totals::OrderTotals;

/// Raw sales-order line as entered on the form (prices pre-rounding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesLineInput {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Raw unit price; the line amounts are derived from this value before
    /// it is rounded for storage.
    pub unit_price: f64,
    /// Tax rate in percent, applied per line.
    pub tax_rate: u32,
    /// Discount in percent. Applied on the creation path only; the
    /// draft-update path stores it without applying it (see
    /// [`rebuild_sales_order_lines`]).
    pub discount_percent: Option<f64>,
    pub note: Option<String>,
}

/// Computed sales-order line. Immutable once the order leaves draft;
/// draft re-edits replace lines wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price rounded for storage. Line amounts are derived from the raw
    /// input, not from this field.
    pub unit_price: Money,
    pub tax_rate: u32,
    pub discount_percent: Option<f64>,
    /// Pre-discount, pre-tax line amount: `round(quantity * unit_price)`.
    pub gross: Money,
    /// Post-discount line amount the tax is computed on.
    pub net: Money,
    pub tax_amount: Money,
    /// `net + tax_amount`.
    pub total_price: Money,
    pub note: Option<String>,
}

fn build_line(input: &SalesLineInput, apply_discount: bool) -> SalesOrderLine {
    let raw_gross = input.quantity as f64 * input.unit_price;
    let gross = Money::from_raw(raw_gross);

    let net = if apply_discount {
        let discount = input.discount_percent.unwrap_or(0.0);
        Money::from_raw(raw_gross * (1.0 - discount / 100.0))
    } else {
        gross
    };

    let tax_amount = Money::from_raw(net.as_raw() * input.tax_rate as f64 / 100.0);

    SalesOrderLine {
        product_id: input.product_id,
        quantity: input.quantity,
        unit_price: Money::from_raw(input.unit_price),
        tax_rate: input.tax_rate,
        discount_percent: input.discount_percent,
        gross,
        net,
        tax_amount,
        total_price: net + tax_amount,
        note: input.note.clone(),
    }
}

/// Build sales-order lines for order creation: the discount is applied to
/// the net before the per-line tax is computed on it.
pub fn build_sales_order_lines(inputs: &[SalesLineInput]) -> Vec<SalesOrderLine> {
    inputs.iter().map(|input| build_line(input, true)).collect()
}

/// Rebuild sales-order lines for a draft update.
///
/// This path intentionally does NOT apply `discount_percent`: the net is the
/// plain `quantity * unit_price`. The divergence from
/// [`build_sales_order_lines`] is long-standing observed behavior that
/// downstream reporting depends on; both paths are pinned by tests. The
/// discount is still stored on the line.
pub fn rebuild_sales_order_lines(inputs: &[SalesLineInput]) -> Vec<SalesOrderLine> {
    inputs.iter().map(|input| build_line(input, false)).collect()
}

/// Aggregate sales-order totals.
///
/// The subtotal is the pre-discount, pre-tax sum; the tax is the sum of the
/// per-line taxes plus an order-level additional amount, each rounded where
/// first computed.
pub fn compute_sales_order_totals(
    lines: &[SalesOrderLine],
    additional_tax_amount: f64,
    shipping_cost: f64,
) -> OrderTotals {
    let subtotal: Money = lines.iter().map(|l| l.gross).sum();
    let line_tax: Money = lines.iter().map(|l| l.tax_amount).sum();
    OrderTotals::compose(
        subtotal,
        line_tax + Money::from_raw(additional_tax_amount),
        Money::from_raw(shipping_cost),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockflow_core::ProductId;
    use uuid::Uuid;

    fn test_product_id() -> ProductId {
        ProductId::from_uuid(Uuid::from_u128(1))
    }

    fn test_line(
        quantity: i64,
        unit_price: f64,
        tax_rate: u32,
        discount_percent: Option<f64>,
    ) -> SalesLineInput {
        SalesLineInput {
            product_id: test_product_id(),
            quantity,
            unit_price,
            tax_rate,
            discount_percent,
            note: None,
        }
    }

    #[test]
    fn creation_applies_discount_before_tax() {
        let lines = build_sales_order_lines(&[test_line(2, 1000.0, 18, Some(10.0))]);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].gross.minor(), 2000);
        assert_eq!(lines[0].net.minor(), 1800);
        assert_eq!(lines[0].tax_amount.minor(), 324);
        assert_eq!(lines[0].total_price.minor(), 2124);
    }

    #[test]
    fn draft_update_ignores_discount_but_keeps_it_stored() {
        let lines = rebuild_sales_order_lines(&[test_line(2, 1000.0, 18, Some(10.0))]);

        assert_eq!(lines[0].net.minor(), 2000);
        assert_eq!(lines[0].tax_amount.minor(), 360);
        assert_eq!(lines[0].total_price.minor(), 2360);
        // The discount survives on the line even though it was not applied.
        assert_eq!(lines[0].discount_percent, Some(10.0));
    }

    #[test]
    fn missing_discount_means_no_reduction_on_either_path() {
        let input = test_line(3, 500.0, 10, None);
        let created = build_sales_order_lines(std::slice::from_ref(&input));
        let rebuilt = rebuild_sales_order_lines(&[input]);

        assert_eq!(created[0].net.minor(), 1500);
        assert_eq!(created[0].total_price.minor(), 1650);
        assert_eq!(created, rebuilt);
    }

    #[test]
    fn net_and_tax_round_at_each_step() {
        // 1 x 999 at 33.4% discount: net = round(665.334) = 665,
        // tax at 7% = round(46.55) = 47.
        let lines = build_sales_order_lines(&[test_line(1, 999.0, 7, Some(33.4))]);

        assert_eq!(lines[0].net.minor(), 665);
        assert_eq!(lines[0].tax_amount.minor(), 47);
        assert_eq!(lines[0].total_price.minor(), 712);
    }

    #[test]
    fn totals_sum_line_taxes_and_round_order_charges() {
        let lines = build_sales_order_lines(&[
            test_line(1, 1000.0, 18, None),
            test_line(1, 1500.0, 12, None),
        ]);
        let totals = compute_sales_order_totals(&lines, 100.0, 250.0);

        assert_eq!(totals.subtotal.minor(), 2500);
        assert_eq!(totals.tax_amount.minor(), 460);
        assert_eq!(totals.shipping_cost.minor(), 250);
        assert_eq!(totals.total_amount.minor(), 3210);
    }

    #[test]
    fn subtotal_is_pre_discount_even_when_discount_applied() {
        let lines = build_sales_order_lines(&[test_line(2, 1000.0, 0, Some(50.0))]);
        let totals = compute_sales_order_totals(&lines, 0.0, 0.0);

        assert_eq!(totals.subtotal.minor(), 2000);
        assert_eq!(lines[0].total_price.minor(), 1000);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        prop_compose! {
            fn arb_line()(
                quantity in 1i64..100,
                unit_price in 0.0f64..10_000.0,
                tax_rate in 0u32..40,
                discount in prop::option::of(0.0f64..100.0),
            ) -> SalesLineInput {
                SalesLineInput {
                    product_id: test_product_id(),
                    quantity,
                    unit_price,
                    tax_rate,
                    discount_percent: discount,
                    note: None,
                }
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: the aggregate invariant holds component-wise on both
            /// line-building paths.
            #[test]
            fn total_is_sum_of_rounded_components(
                inputs in prop::collection::vec(arb_line(), 0..10),
                additional_tax in 0.0f64..1_000.0,
                shipping in 0.0f64..1_000.0,
            ) {
                for lines in [
                    build_sales_order_lines(&inputs),
                    rebuild_sales_order_lines(&inputs),
                ] {
                    let totals = compute_sales_order_totals(&lines, additional_tax, shipping);
                    prop_assert_eq!(
                        totals.total_amount,
                        totals.subtotal + totals.tax_amount + totals.shipping_cost
                    );
                    for line in &lines {
                        prop_assert_eq!(line.total_price, line.net + line.tax_amount);
                    }
                }
            }

            /// Property: without a discount, creation and draft-update agree.
            #[test]
            fn paths_agree_when_no_discount(
                inputs in prop::collection::vec(arb_line(), 0..10),
            ) {
                let stripped: Vec<SalesLineInput> = inputs
                    .into_iter()
                    .map(|mut l| {
                        l.discount_percent = None;
                        l
                    })
                    .collect();
                prop_assert_eq!(
                    build_sales_order_lines(&stripped),
                    rebuild_sales_order_lines(&stripped)
                );
            }
        }
    }
}
