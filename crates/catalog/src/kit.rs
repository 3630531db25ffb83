use serde::{Deserialize, Serialize};

use reliefhub_core::{DomainError, DomainResult, Entity, EntityId, ValueObject};

use crate::product::ProductId;

/// Kit identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KitId(pub EntityId);

impl KitId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for KitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One component of a kit: a product and its fixed per-kit quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitComponent {
    pub product_id: ProductId,
    pub qty_per_kit: i64,
}

impl ValueObject for KitComponent {}

/// A named bundle of products with fixed composition ratios.
///
/// Kits have no stock of their own; availability is derived from components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kit {
    id: KitId,
    name: String,
    components: Vec<KitComponent>,
}

impl Kit {
    pub fn new(
        id: KitId,
        name: impl Into<String>,
        components: Vec<KitComponent>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("kit name cannot be empty"));
        }
        if components.is_empty() {
            return Err(DomainError::validation("kit must have at least one component"));
        }
        for c in &components {
            if c.qty_per_kit < 1 {
                return Err(DomainError::validation(
                    "kit component quantity must be at least 1",
                ));
            }
        }
        Ok(Self {
            id,
            name,
            components,
        })
    }

    pub fn id_typed(&self) -> KitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> &[KitComponent] {
        &self.components
    }
}

impl Entity for Kit {
    type Id = KitId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kit_requires_components() {
        let err = Kit::new(KitId::new(EntityId::new()), "Hygiene kit", vec![]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn kit_rejects_zero_component_quantity() {
        let err = Kit::new(
            KitId::new(EntityId::new()),
            "Hygiene kit",
            vec![KitComponent {
                product_id: ProductId::new(EntityId::new()),
                qty_per_kit: 0,
            }],
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
