//! Order Orchestrator: the externally visible operations.
//!
//! Composes the validator (read), the ledger (write), and the workflow
//! (status + conditional reversal). Everything here runs to a determinate
//! success/failure conclusion; a failed unit of work compensates so no
//! partial order/reservation state stays observable.

use chrono::Utc;
use tracing::{error, info};

use reliefhub_catalog::CatalogProvider;
use reliefhub_core::{DomainError, DomainResult, EntityId, UserId};
use reliefhub_orders::{Order, OrderId, OrderLine, OrderMeta, OrderStatus};

use crate::ledger::ReservationLedger;
use crate::store::{OrderStore, ReservationStore, StockStore};
use crate::validator::{AggregationPolicy, StockValidator};
use crate::views::OrderView;

#[derive(Debug)]
pub struct OrderService<C, S, R, O> {
    catalog: C,
    validator: StockValidator<C>,
    ledger: ReservationLedger<S, R>,
    orders: O,
}

impl<C, S, R, O> OrderService<C, S, R, O>
where
    C: CatalogProvider + Clone,
    S: StockStore,
    R: ReservationStore,
    O: OrderStore,
{
    pub fn new(
        catalog: C,
        stock: S,
        reservations: R,
        orders: O,
        policy: AggregationPolicy,
    ) -> Self {
        Self {
            validator: StockValidator::new(catalog.clone(), policy),
            catalog,
            ledger: ReservationLedger::new(stock, reservations),
            orders,
        }
    }

    pub fn ledger(&self) -> &ReservationLedger<S, R> {
        &self.ledger
    }

    /// Validate, persist the order in `Submitted`, and commit its
    /// reservations as one unit of work.
    ///
    /// On a validation failure nothing is persisted. On a commit failure the
    /// freshly inserted order is removed again, so no order without
    /// reservations (or vice versa) remains observable.
    pub fn create_order(&self, meta: OrderMeta, lines: Vec<OrderLine>) -> DomainResult<Order> {
        let requirements = self.validator.validate(&lines)?;

        let order = Order::submitted(OrderId::new(EntityId::new()), meta, lines, Utc::now())?;
        let order_id = order.id_typed();
        self.orders.insert(order.clone())?;

        if let Err(commit_err) = self.ledger.commit(order_id, &requirements) {
            if let Err(remove_err) = self.orders.remove(&order_id) {
                error!(%order_id, ?remove_err, "failed to compensate order insert");
            }
            return Err(commit_err);
        }

        info!(
            %order_id,
            user_id = %order.user_id(),
            lines = order.lines().len(),
            "order created"
        );
        Ok(order)
    }

    /// Save a cart as a draft: no stock validation, no reservation.
    pub fn save_draft(&self, meta: OrderMeta, lines: Vec<OrderLine>) -> DomainResult<Order> {
        let order = Order::draft(OrderId::new(EntityId::new()), meta, lines, Utc::now());
        self.orders.insert(order.clone())?;
        info!(order_id = %order.id_typed(), "draft saved");
        Ok(order)
    }

    /// Validate and reserve a saved draft, moving it `Draft -> Submitted`.
    pub fn submit_draft(&self, order_id: &OrderId) -> DomainResult<Order> {
        let mut order = self.load(order_id)?;
        let previous = order.clone();

        order.submit(Utc::now())?;
        let requirements = self.validator.validate(order.lines())?;
        self.orders.update(order.clone())?;

        if let Err(commit_err) = self.ledger.commit(*order_id, &requirements) {
            if let Err(revert_err) = self.orders.update(previous) {
                error!(%order_id, ?revert_err, "failed to revert draft submission");
            }
            return Err(commit_err);
        }

        info!(%order_id, "draft submitted");
        Ok(order)
    }

    /// Change an order's status through the transition table.
    ///
    /// For reversing targets (`Rejected`, `Cancelled`) the reservations are
    /// restored before the new status is persisted, so stock is visibly back
    /// by the time the call returns. Restore idempotence keeps a retry after
    /// a persistence failure from double-crediting stock.
    pub fn change_status(&self, order_id: &OrderId, status: OrderStatus) -> DomainResult<Order> {
        let mut order = self.load(order_id)?;
        let from = order.status();
        order.transition_to(status, Utc::now())?;

        if status.is_reversing() {
            self.ledger.restore(order_id)?;
        }
        self.orders.update(order.clone())?;

        info!(%order_id, %from, to = %status, "order status changed");
        Ok(order)
    }

    /// Read one order with catalog detail inlined.
    pub fn get_order(&self, order_id: &OrderId) -> DomainResult<OrderView> {
        let order = self.load(order_id)?;
        Ok(OrderView::resolve(&order, &self.catalog))
    }

    /// Read all orders, optionally scoped to one user.
    pub fn get_orders(&self, user_id: Option<UserId>) -> DomainResult<Vec<OrderView>> {
        let orders = self.orders.list(user_id)?;
        Ok(orders
            .iter()
            .map(|o| OrderView::resolve(o, &self.catalog))
            .collect())
    }

    fn load(&self, order_id: &OrderId) -> DomainResult<Order> {
        self.orders
            .get(order_id)?
            .ok_or_else(|| DomainError::not_found(format!("order {order_id}")))
    }
}
