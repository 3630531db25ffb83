//! Storage seams for the reservation engine.
//!
//! Traits here are synchronous and object-safe; the in-memory implementations
//! back tests and dev. A database-backed deployment swaps these without
//! touching validator/ledger/service code.

mod in_memory;

pub use in_memory::{InMemoryInventory, InMemoryOrderStore, InMemoryReservationStore};

use std::sync::Arc;

use thiserror::Error;

use reliefhub_catalog::{Product, ProductId};
use reliefhub_core::{DomainError, UserId};
use reliefhub_orders::{Order, OrderId};
use reliefhub_stock::{Requirement, Reservation};

/// Storage-level failure, mapped into `DomainError` at the service boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Conditional decrement found less stock than the requirement — the
    /// counter changed between validation and commit. Nothing was applied.
    #[error("stock changed for {product}: requested {requested}, available {available}")]
    StockChanged {
        product: String,
        requested: i64,
        available: i64,
    },

    /// A requirement referenced a product the inventory does not hold.
    #[error("unknown product {0}")]
    UnknownProduct(String),

    /// Insert with an already-used order id.
    #[error("order {0} already exists")]
    DuplicateOrder(String),

    /// Update/remove of an order that is not stored.
    #[error("order {0} not found")]
    OrderNotFound(String),

    /// Backend failure (for the in-memory stores: a poisoned lock).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::StockChanged { product, .. } => {
                DomainError::concurrent_stock_change(product)
            }
            StoreError::UnknownProduct(id) => DomainError::not_found(format!("product {id}")),
            StoreError::DuplicateOrder(id) => {
                DomainError::conflict(format!("order {id} already exists"))
            }
            StoreError::OrderNotFound(id) => DomainError::not_found(format!("order {id}")),
            StoreError::Backend(msg) => DomainError::storage(msg),
        }
    }
}

/// Write access to the per-product stock counters.
///
/// The single point of contention in the engine: `decrement_all` must make
/// check-and-decrement one atomic step across the whole requirement set.
pub trait StockStore: Send + Sync {
    /// Conditionally decrement every requirement, or nothing at all.
    ///
    /// Returns the post-decrement product snapshots (for low-stock signals).
    fn decrement_all(&self, requirements: &[Requirement]) -> Result<Vec<Product>, StoreError>;

    /// Put stock back for one product (reservation reversal).
    fn increment(&self, product_id: &ProductId, quantity: i64) -> Result<(), StoreError>;
}

/// The reservation ledger rows, keyed per order.
pub trait ReservationStore: Send + Sync {
    fn append(&self, rows: Vec<Reservation>) -> Result<(), StoreError>;

    /// Remove and return all rows for an order. An order with no rows yields
    /// an empty vec — this is what makes `restore` idempotent.
    fn take_all(&self, order_id: &OrderId) -> Result<Vec<Reservation>, StoreError>;

    fn list(&self, order_id: &OrderId) -> Result<Vec<Reservation>, StoreError>;
}

/// Order persistence.
pub trait OrderStore: Send + Sync {
    fn insert(&self, order: Order) -> Result<(), StoreError>;
    fn get(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError>;
    fn update(&self, order: Order) -> Result<(), StoreError>;
    /// Compensation path for a failed creation unit of work.
    fn remove(&self, order_id: &OrderId) -> Result<(), StoreError>;
    fn list(&self, user_id: Option<UserId>) -> Result<Vec<Order>, StoreError>;
}

impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    fn decrement_all(&self, requirements: &[Requirement]) -> Result<Vec<Product>, StoreError> {
        (**self).decrement_all(requirements)
    }

    fn increment(&self, product_id: &ProductId, quantity: i64) -> Result<(), StoreError> {
        (**self).increment(product_id, quantity)
    }
}

impl<S> ReservationStore for Arc<S>
where
    S: ReservationStore + ?Sized,
{
    fn append(&self, rows: Vec<Reservation>) -> Result<(), StoreError> {
        (**self).append(rows)
    }

    fn take_all(&self, order_id: &OrderId) -> Result<Vec<Reservation>, StoreError> {
        (**self).take_all(order_id)
    }

    fn list(&self, order_id: &OrderId) -> Result<Vec<Reservation>, StoreError> {
        (**self).list(order_id)
    }
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn insert(&self, order: Order) -> Result<(), StoreError> {
        (**self).insert(order)
    }

    fn get(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError> {
        (**self).get(order_id)
    }

    fn update(&self, order: Order) -> Result<(), StoreError> {
        (**self).update(order)
    }

    fn remove(&self, order_id: &OrderId) -> Result<(), StoreError> {
        (**self).remove(order_id)
    }

    fn list(&self, user_id: Option<UserId>) -> Result<Vec<Order>, StoreError> {
        (**self).list(user_id)
    }
}
