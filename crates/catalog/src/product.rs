use serde::{Deserialize, Serialize};

use reliefhub_core::{DomainError, DomainResult, Entity, EntityId};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A stocked product.
///
/// `stock` is the immediately available quantity; it is mutated only through
/// `take_stock`/`put_back_stock`, which the reservation ledger calls under its
/// store lock. Everything else reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    sku: String,
    name: String,
    stock: i64,
    low_stock_threshold: i64,
}

impl Product {
    pub fn new(
        id: ProductId,
        sku: impl Into<String>,
        name: impl Into<String>,
        stock: i64,
        low_stock_threshold: i64,
    ) -> DomainResult<Self> {
        let sku = sku.into();
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        if low_stock_threshold < 0 {
            return Err(DomainError::validation(
                "low stock threshold cannot be negative",
            ));
        }
        Ok(Self {
            id,
            sku,
            name,
            stock,
            low_stock_threshold,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn low_stock_threshold(&self) -> i64 {
        self.low_stock_threshold
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }

    /// Conditionally decrement stock: fails (and changes nothing) if fewer
    /// than `quantity` units are available. Stock can never go negative.
    pub fn take_stock(&mut self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if self.stock < quantity {
            return Err(DomainError::insufficient_stock(
                self.name.clone(),
                quantity,
                self.stock,
            ));
        }
        self.stock -= quantity;
        Ok(())
    }

    /// Return previously taken stock. Exact inverse of `take_stock`.
    pub fn put_back_stock(&mut self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        self.stock += quantity;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
