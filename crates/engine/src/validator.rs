//! Read-only feasibility check of requested lines against current stock.

use serde::{Deserialize, Serialize};

use reliefhub_catalog::CatalogProvider;
use reliefhub_core::{DomainError, DomainResult};
use reliefhub_orders::{LineItem, OrderLine};
use reliefhub_stock::{aggregate, kit_requirements, Requirement};

/// How requirements are pooled before the stock comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Sum requirements for a product across *all* lines of the order before
    /// checking stock. Stricter: two lines asking for 3 of a product with
    /// stock 5 fail together instead of both passing against the snapshot.
    #[default]
    WholeOrder,
    /// Check each line independently against the pre-order stock snapshot.
    /// Duplicate components *within* one kit still sum first.
    PerLine,
}

/// Stock Validator: mutation-free, all-or-nothing.
///
/// On success returns the flattened requirement list (kits fully expanded,
/// one entry per product) for the ledger to commit.
#[derive(Debug)]
pub struct StockValidator<C> {
    catalog: C,
    policy: AggregationPolicy,
}

impl<C> StockValidator<C>
where
    C: CatalogProvider,
{
    pub fn new(catalog: C, policy: AggregationPolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    pub fn validate(&self, lines: &[OrderLine]) -> DomainResult<Vec<Requirement>> {
        let mut per_line: Vec<Vec<Requirement>> = Vec::with_capacity(lines.len());
        for line in lines {
            per_line.push(self.resolve_line(line)?);
        }

        match self.policy {
            AggregationPolicy::WholeOrder => {
                let merged = aggregate(per_line.into_iter().flatten().collect())?;
                self.check_against_stock(&merged)?;
                Ok(merged)
            }
            AggregationPolicy::PerLine => {
                for reqs in &per_line {
                    self.check_against_stock(reqs)?;
                }
                // Reservation rows still aggregate per product per order.
                aggregate(per_line.into_iter().flatten().collect())
            }
        }
    }

    /// Expand one line to product requirements, without stock checks.
    fn resolve_line(&self, line: &OrderLine) -> DomainResult<Vec<Requirement>> {
        match line.item {
            LineItem::Product(product_id) => {
                if self.catalog.product(&product_id).is_none() {
                    return Err(DomainError::not_found(format!("product {product_id}")));
                }
                Ok(vec![Requirement::new(product_id, line.quantity)?])
            }
            LineItem::Kit(kit_id) => {
                let kit = self
                    .catalog
                    .kit(&kit_id)
                    .ok_or_else(|| DomainError::not_found(format!("kit {kit_id}")))?;
                let reqs = kit_requirements(&kit, line.quantity)?;
                for req in &reqs {
                    if self.catalog.product(&req.product_id).is_none() {
                        return Err(DomainError::not_found(format!(
                            "product {} (component of kit {})",
                            req.product_id,
                            kit.name()
                        )));
                    }
                }
                Ok(reqs)
            }
        }
    }

    fn check_against_stock(&self, requirements: &[Requirement]) -> DomainResult<()> {
        for req in requirements {
            let product = self
                .catalog
                .product(&req.product_id)
                .ok_or_else(|| DomainError::not_found(format!("product {}", req.product_id)))?;
            if product.stock() < req.quantity {
                return Err(DomainError::insufficient_stock(
                    product.name(),
                    req.quantity,
                    product.stock(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use reliefhub_catalog::{Kit, KitComponent, KitId, Product, ProductId};
    use reliefhub_core::EntityId;

    use crate::store::InMemoryInventory;

    fn inventory() -> Arc<InMemoryInventory> {
        Arc::new(InMemoryInventory::new())
    }

    fn seed_product(inv: &InMemoryInventory, name: &str, stock: i64) -> ProductId {
        let id = ProductId::new(EntityId::new());
        inv.insert_product(Product::new(id, name, name, stock, 0).unwrap())
            .unwrap();
        id
    }

    fn product_line(id: ProductId, quantity: i64) -> OrderLine {
        OrderLine::new(LineItem::Product(id), quantity).unwrap()
    }

    #[test]
    fn direct_line_within_stock_passes() {
        let inv = inventory();
        let p = seed_product(&inv, "Rice 25kg", 10);
        let validator = StockValidator::new(inv, AggregationPolicy::default());

        let reqs = validator.validate(&[product_line(p, 4)]).unwrap();
        assert_eq!(reqs, vec![Requirement::new(p, 4).unwrap()]);
    }

    #[test]
    fn short_stock_reports_needed_and_available() {
        let inv = inventory();
        let p = seed_product(&inv, "Rice 25kg", 3);
        let validator = StockValidator::new(inv, AggregationPolicy::default());

        let err = validator.validate(&[product_line(p, 4)]).unwrap_err();
        assert_eq!(
            err,
            DomainError::insufficient_stock("Rice 25kg", 4, 3)
        );
    }

    #[test]
    fn missing_product_is_not_found() {
        let validator = StockValidator::new(inventory(), AggregationPolicy::default());
        let ghost = ProductId::new(EntityId::new());
        let err = validator.validate(&[product_line(ghost, 1)]).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn kit_line_expands_components() {
        let inv = inventory();
        let p1 = seed_product(&inv, "Blanket", 5);
        let p2 = seed_product(&inv, "Soap bar", 5);
        let kit_id = KitId::new(EntityId::new());
        inv.insert_kit(
            Kit::new(
                kit_id,
                "Winter kit",
                vec![
                    KitComponent {
                        product_id: p1,
                        qty_per_kit: 2,
                    },
                    KitComponent {
                        product_id: p2,
                        qty_per_kit: 1,
                    },
                ],
            )
            .unwrap(),
        )
        .unwrap();
        let validator = StockValidator::new(inv, AggregationPolicy::default());

        let reqs = validator
            .validate(&[OrderLine::new(LineItem::Kit(kit_id), 2).unwrap()])
            .unwrap();
        assert_eq!(
            reqs,
            vec![
                Requirement::new(p1, 4).unwrap(),
                Requirement::new(p2, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn kit_with_missing_component_is_not_found() {
        let inv = inventory();
        let ghost = ProductId::new(EntityId::new());
        let kit_id = KitId::new(EntityId::new());
        inv.insert_kit(
            Kit::new(
                kit_id,
                "Broken kit",
                vec![KitComponent {
                    product_id: ghost,
                    qty_per_kit: 1,
                }],
            )
            .unwrap(),
        )
        .unwrap();
        let validator = StockValidator::new(inv, AggregationPolicy::default());

        let err = validator
            .validate(&[OrderLine::new(LineItem::Kit(kit_id), 1).unwrap()])
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn whole_order_policy_pools_lines_before_checking() {
        let inv = inventory();
        let p = seed_product(&inv, "Rice 25kg", 5);

        // Two lines of 3: each fits the snapshot alone, together they do not.
        let lines = [product_line(p, 3), product_line(p, 3)];

        let strict = StockValidator::new(inv.clone(), AggregationPolicy::WholeOrder);
        let err = strict.validate(&lines).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("Rice 25kg", 6, 5));

        let lenient = StockValidator::new(inv, AggregationPolicy::PerLine);
        let reqs = lenient.validate(&lines).unwrap();
        // Requirements still merge for the ledger even under PerLine.
        assert_eq!(reqs, vec![Requirement::new(p, 6).unwrap()]);
    }

    #[test]
    fn validation_failure_checks_all_or_nothing() {
        let inv = inventory();
        let ok = seed_product(&inv, "Soap bar", 10);
        let short = seed_product(&inv, "Blanket", 1);
        let validator = StockValidator::new(inv.clone(), AggregationPolicy::default());

        let err = validator
            .validate(&[product_line(ok, 2), product_line(short, 2)])
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));

        // Read-only: nothing was decremented.
        assert_eq!(inv.product(&ok).unwrap().stock(), 10);
        assert_eq!(inv.product(&short).unwrap().stock(), 1);
    }
}
