//! Read-only order projections with catalog detail inlined.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reliefhub_catalog::{CatalogProvider, KitComponent, KitId, ProductId};
use reliefhub_core::UserId;
use reliefhub_orders::{LineItem, Order, OrderId, OrderStatus};

/// A line item with product/kit detail resolved from the catalog.
///
/// Detail fields are optional: a catalog record deleted after the order was
/// placed still leaves the view renderable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedItem {
    Product {
        id: ProductId,
        sku: Option<String>,
        name: Option<String>,
    },
    Kit {
        id: KitId,
        name: Option<String>,
        components: Vec<KitComponent>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineView {
    #[serde(flatten)]
    pub item: ResolvedItem,
    pub quantity: i64,
}

/// JSON-ready projection of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub address: String,
    pub notes: String,
    pub status: OrderStatus,
    pub lines: Vec<OrderLineView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderView {
    pub fn resolve<C: CatalogProvider>(order: &Order, catalog: &C) -> Self {
        let lines = order
            .lines()
            .iter()
            .map(|line| OrderLineView {
                item: match line.item {
                    LineItem::Product(id) => {
                        let product = catalog.product(&id);
                        ResolvedItem::Product {
                            id,
                            sku: product.as_ref().map(|p| p.sku().to_string()),
                            name: product.as_ref().map(|p| p.name().to_string()),
                        }
                    }
                    LineItem::Kit(id) => {
                        let kit = catalog.kit(&id);
                        ResolvedItem::Kit {
                            id,
                            name: kit.as_ref().map(|k| k.name().to_string()),
                            components: kit
                                .as_ref()
                                .map(|k| k.components().to_vec())
                                .unwrap_or_default(),
                        }
                    }
                },
                quantity: line.quantity,
            })
            .collect();

        Self {
            order_id: order.id_typed(),
            user_id: order.user_id(),
            address: order.address().to_string(),
            notes: order.notes().to_string(),
            status: order.status(),
            lines,
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;
    use reliefhub_catalog::Product;
    use reliefhub_core::EntityId;
    use reliefhub_orders::{OrderLine, OrderMeta};

    use crate::store::InMemoryInventory;

    #[test]
    fn view_serializes_with_tagged_items_and_flattened_lines() {
        let inv = Arc::new(InMemoryInventory::new());
        let product_id = ProductId::new(EntityId::new());
        inv.insert_product(Product::new(product_id, "RICE-25", "Rice 25kg", 10, 2).unwrap())
            .unwrap();

        let order = Order::submitted(
            OrderId::new(EntityId::new()),
            OrderMeta {
                user_id: UserId::new(),
                address: "12 Harbour Rd".into(),
                notes: String::new(),
            },
            vec![OrderLine::new(LineItem::Product(product_id), 3).unwrap()],
            Utc::now(),
        )
        .unwrap();

        let view = OrderView::resolve(&order, &inv);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["status"], "submitted");
        assert_eq!(json["lines"][0]["type"], "product");
        assert_eq!(json["lines"][0]["name"], "Rice 25kg");
        assert_eq!(json["lines"][0]["quantity"], 3);
    }

    #[test]
    fn missing_kit_resolves_to_bare_id() {
        let inv = Arc::new(InMemoryInventory::new());
        let kit_id = KitId::new(EntityId::new());

        let order = Order::submitted(
            OrderId::new(EntityId::new()),
            OrderMeta {
                user_id: UserId::new(),
                address: "12 Harbour Rd".into(),
                notes: String::new(),
            },
            vec![OrderLine::new(LineItem::Kit(kit_id), 1).unwrap()],
            Utc::now(),
        )
        .unwrap();

        let view = OrderView::resolve(&order, &inv);
        assert_eq!(
            view.lines[0].item,
            ResolvedItem::Kit {
                id: kit_id,
                name: None,
                components: vec![],
            }
        );
    }
}
