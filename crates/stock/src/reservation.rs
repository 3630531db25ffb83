use serde::{Deserialize, Serialize};

use reliefhub_catalog::ProductId;
use reliefhub_core::ValueObject;
use reliefhub_orders::OrderId;

/// One ledger row: stock decremented on behalf of one order for one product.
///
/// Rows are the only source of truth for undoing a deduction. They are
/// created only when an order's reservations commit, and deleted only by a
/// reversing status transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
}

impl Reservation {
    pub fn new(order_id: OrderId, product_id: ProductId, quantity: i64) -> Self {
        Self {
            order_id,
            product_id,
            quantity,
        }
    }
}

impl ValueObject for Reservation {}
