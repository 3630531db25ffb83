use serde::{Deserialize, Serialize};

use reliefhub_catalog::{Kit, ProductId};
use reliefhub_core::{DomainError, DomainResult, ValueObject};

/// A resolved `(product, quantity)` pair: what an order line actually needs
/// after kit expansion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl Requirement {
    pub fn new(product_id: ProductId, quantity: i64) -> DomainResult<Self> {
        if quantity < 1 {
            return Err(DomainError::validation(
                "requirement quantity must be at least 1",
            ));
        }
        Ok(Self {
            product_id,
            quantity,
        })
    }
}

impl ValueObject for Requirement {}

fn too_large() -> DomainError {
    DomainError::validation("requested quantity is too large")
}

/// Merge requirements for the same product, preserving first-seen order.
///
/// Sums are checked: a total that does not fit in `i64` is a validation
/// error, never a wrapped quantity.
pub fn aggregate(requirements: Vec<Requirement>) -> DomainResult<Vec<Requirement>> {
    let mut merged: Vec<Requirement> = Vec::with_capacity(requirements.len());
    for req in requirements {
        match merged.iter_mut().find(|r| r.product_id == req.product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(req.quantity)
                    .ok_or_else(too_large)?;
            }
            None => merged.push(req),
        }
    }
    Ok(merged)
}

/// Expand a kit line into per-product requirements.
///
/// A component listed more than once within the same kit sums before any
/// comparison against stock.
pub fn kit_requirements(kit: &Kit, quantity: i64) -> DomainResult<Vec<Requirement>> {
    if quantity < 1 {
        return Err(DomainError::validation("line quantity must be at least 1"));
    }
    let per_component = kit
        .components()
        .iter()
        .map(|c| {
            let required = c
                .qty_per_kit
                .checked_mul(quantity)
                .ok_or_else(too_large)?;
            Requirement::new(c.product_id, required)
        })
        .collect::<DomainResult<Vec<_>>>()?;
    aggregate(per_component)
}
