//! Order totals arithmetic for purchase and sales orders.
//!
//! This crate contains the monetary derivation rules for order lines and
//! order-level aggregates, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage). All inputs are assumed pre-validated by the
//! caller; nothing here can fail.
//!
//! Rounding discipline: round to minor units at the point a monetary
//! quantity is first computed (half away from zero, via
//! [`Money::from_raw`](stockflow_core::Money::from_raw)), never deferred to
//! a later aggregate step.

pub mod purchase;
pub mod sales;
pub mod totals;

pub use purchase::{build_purchase_order_lines, compute_purchase_order_totals, PurchaseLineInput, PurchaseOrderLine};
pub use sales::{
    build_sales_order_lines, compute_sales_order_totals, rebuild_sales_order_lines,
    SalesLineInput, SalesOrderLine,
};
pub use totals::OrderTotals;
