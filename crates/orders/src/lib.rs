//! Orders domain module.
//!
//! This crate contains business rules for orders, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage): the order entity,
//! its lines, and the status workflow with its explicit transition table.

pub mod order;
pub mod status;

pub use order::{LineItem, Order, OrderId, OrderLine, OrderMeta};
pub use status::OrderStatus;
