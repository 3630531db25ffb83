use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reliefhub_catalog::{KitId, ProductId};
use reliefhub_core::{DomainError, DomainResult, Entity, EntityId, UserId, ValueObject};

use crate::status::OrderStatus;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl OrderId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// What an order line asks for: one product directly, or one kit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum LineItem {
    Product(ProductId),
    Kit(KitId),
}

/// One requested line: a product or kit plus a quantity (≥ 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(flatten)]
    pub item: LineItem,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(item: LineItem, quantity: i64) -> DomainResult<Self> {
        if quantity < 1 {
            return Err(DomainError::validation("line quantity must be at least 1"));
        }
        Ok(Self { item, quantity })
    }
}

impl ValueObject for OrderLine {}

/// Requester metadata carried on every order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMeta {
    pub user_id: UserId,
    pub address: String,
    pub notes: String,
}

/// An order: owning user, status, and its requested lines.
///
/// Status only ever changes through `transition_to` (table-checked) or
/// `submit` (the draft path). The stock side effects of those changes belong
/// to the orchestrator; the entity itself stays pure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    address: String,
    notes: String,
    status: OrderStatus,
    lines: Vec<OrderLine>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Create an order directly in `Submitted` (the portal's normal path).
    pub fn submitted(
        id: OrderId,
        meta: OrderMeta,
        lines: Vec<OrderLine>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation("order must have at least one line"));
        }
        Ok(Self::build(id, meta, lines, OrderStatus::Submitted, now))
    }

    /// Save a cart as a `Draft`: no stock validation, no reservation, and an
    /// empty cart is fine.
    pub fn draft(
        id: OrderId,
        meta: OrderMeta,
        lines: Vec<OrderLine>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::build(id, meta, lines, OrderStatus::Draft, now)
    }

    fn build(
        id: OrderId,
        meta: OrderMeta,
        lines: Vec<OrderLine>,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: meta.user_id,
            address: meta.address,
            notes: meta.notes,
            status,
            lines,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a status change through the transition table.
    pub fn transition_to(&mut self, to: OrderStatus, now: DateTime<Utc>) -> DomainResult<()> {
        self.status = self.status.transition_to(to)?;
        self.updated_at = now;
        Ok(())
    }

    /// Move a draft to `Submitted`. Only the orchestrator's submit path calls
    /// this, after validating and reserving stock for the lines.
    pub fn submit(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status != OrderStatus::Draft {
            return Err(DomainError::invalid_transition(
                self.status,
                OrderStatus::Submitted,
            ));
        }
        if self.lines.is_empty() {
            return Err(DomainError::validation(
                "cannot submit a draft without lines",
            ));
        }
        self.status = OrderStatus::Submitted;
        self.updated_at = now;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
