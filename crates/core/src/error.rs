//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// stock shortages, workflow violations). Infrastructure failures surface as
/// `Storage` and must never leave partial reservation/order state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. zero quantity, empty order).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced product, kit, kit component, or order does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Requested quantity exceeds the currently available stock.
    #[error("insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: i64,
        available: i64,
    },

    /// Stock changed between validation and commit; the whole order was
    /// cleanly aborted and the request is safe to retry.
    #[error("stock for {product} changed concurrently; retry the order")]
    ConcurrentStockChange { product: String },

    /// An order status transition outside the allowed transition table.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A conflict occurred (e.g. duplicate order id).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Underlying storage failed. Not retried automatically.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn insufficient_stock(
        product: impl Into<String>,
        requested: i64,
        available: i64,
    ) -> Self {
        Self::InsufficientStock {
            product: product.into(),
            requested,
            available,
        }
    }

    pub fn concurrent_stock_change(product: impl Into<String>) -> Self {
        Self::ConcurrentStockChange {
            product: product.into(),
        }
    }

    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
