//! Shipment-line composition over an order's outstanding lines.
//!
//! Builds one shipment line per order line with quantity still to ship,
//! allocating stock smallest-bucket-first per product. The build is
//! full-or-nothing: any line that cannot be fully covered fails the whole
//! call, so callers never persist a partial shipment from this path.

pub mod shipment;

pub use shipment::{build_shipment_lines, OutstandingLine, ShipmentError, ShipmentLine};
