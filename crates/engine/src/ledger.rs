//! Reservation Ledger: the only writer of stock counters.
//!
//! Every decrement is paired with a reservation row; the rows are the only
//! source of truth for undoing a deduction.

use tracing::{info, warn};

use reliefhub_core::DomainResult;
use reliefhub_orders::OrderId;
use reliefhub_stock::{Requirement, Reservation};

use crate::store::{ReservationStore, StockStore};

#[derive(Debug)]
pub struct ReservationLedger<S, R> {
    stock: S,
    reservations: R,
}

impl<S, R> ReservationLedger<S, R>
where
    S: StockStore,
    R: ReservationStore,
{
    pub fn new(stock: S, reservations: R) -> Self {
        Self {
            stock,
            reservations,
        }
    }

    /// Decrement stock for every requirement and record one reservation row
    /// per requirement, as one unit: a conditional decrement that finds the
    /// counter changed aborts the whole commit with nothing applied.
    pub fn commit(&self, order_id: OrderId, requirements: &[Requirement]) -> DomainResult<()> {
        if requirements.is_empty() {
            return Ok(());
        }

        let updated = self.stock.decrement_all(requirements)?;

        let rows: Vec<Reservation> = requirements
            .iter()
            .map(|req| Reservation::new(order_id, req.product_id, req.quantity))
            .collect();
        if let Err(e) = self.reservations.append(rows) {
            // No decrement may stand without its row: undo them all.
            for req in requirements {
                let _ = self.stock.increment(&req.product_id, req.quantity);
            }
            return Err(e.into());
        }

        info!(%order_id, products = requirements.len(), "reservations committed");
        for product in &updated {
            if product.is_low_stock() {
                warn!(
                    product = product.name(),
                    stock = product.stock(),
                    threshold = product.low_stock_threshold(),
                    "product stock at or below threshold"
                );
            }
        }
        Ok(())
    }

    /// Reverse an order's reservations: put every row's quantity back and
    /// delete the rows. Idempotent — with no rows left this is a no-op.
    pub fn restore(&self, order_id: &OrderId) -> DomainResult<()> {
        let rows = self.reservations.take_all(order_id)?;
        if rows.is_empty() {
            return Ok(());
        }

        for (idx, row) in rows.iter().enumerate() {
            if let Err(e) = self.stock.increment(&row.product_id, row.quantity) {
                // Keep the not-yet-restored rows so a retry can finish the job.
                let _ = self.reservations.append(rows[idx..].to_vec());
                return Err(e.into());
            }
        }

        info!(%order_id, rows = rows.len(), "reservations restored");
        Ok(())
    }

    /// The live rows for an order.
    pub fn reservations_for(&self, order_id: &OrderId) -> DomainResult<Vec<Reservation>> {
        Ok(self.reservations.list(order_id)?)
    }
}
