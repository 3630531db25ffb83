use std::collections::HashMap;
use std::sync::RwLock;

use reliefhub_catalog::{CatalogProvider, Kit, KitId, Product, ProductId};
use reliefhub_core::UserId;
use reliefhub_orders::{Order, OrderId};
use reliefhub_stock::{Requirement, Reservation};

use super::{OrderStore, ReservationStore, StockStore, StoreError};

fn poisoned(what: &str) -> StoreError {
    StoreError::Backend(format!("{what} lock poisoned"))
}

/// In-memory inventory: the catalog records plus their stock counters.
///
/// Intended for tests/dev. Serves reads through `CatalogProvider` and writes
/// through `StockStore`; one `RwLock` over the product map makes the
/// conditional multi-decrement a single atomic step for a whole order.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    products: RwLock<HashMap<ProductId, Product>>,
    kits: RwLock<HashMap<KitId, Kit>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product record (catalog CRUD is an external collaborator).
    pub fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned("products"))?;
        products.insert(product.id_typed(), product);
        Ok(())
    }

    /// Seed a kit record.
    pub fn insert_kit(&self, kit: Kit) -> Result<(), StoreError> {
        let mut kits = self.kits.write().map_err(|_| poisoned("kits"))?;
        kits.insert(kit.id_typed(), kit);
        Ok(())
    }
}

impl CatalogProvider for InMemoryInventory {
    fn product(&self, id: &ProductId) -> Option<Product> {
        let products = self.products.read().ok()?;
        products.get(id).cloned()
    }

    fn kit(&self, id: &KitId) -> Option<Kit> {
        let kits = self.kits.read().ok()?;
        kits.get(id).cloned()
    }
}

impl StockStore for InMemoryInventory {
    fn decrement_all(&self, requirements: &[Requirement]) -> Result<Vec<Product>, StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned("products"))?;

        // Verify every requirement under the write lock before touching any
        // counter: the whole set applies or none of it does.
        for req in requirements {
            let product = products
                .get(&req.product_id)
                .ok_or_else(|| StoreError::UnknownProduct(req.product_id.to_string()))?;
            if product.stock() < req.quantity {
                return Err(StoreError::StockChanged {
                    product: product.name().to_string(),
                    requested: req.quantity,
                    available: product.stock(),
                });
            }
        }

        let mut updated = Vec::with_capacity(requirements.len());
        for req in requirements {
            let product = products
                .get_mut(&req.product_id)
                .ok_or_else(|| StoreError::UnknownProduct(req.product_id.to_string()))?;
            product
                .take_stock(req.quantity)
                .map_err(|e| StoreError::Backend(e.to_string()))?;
            updated.push(product.clone());
        }

        Ok(updated)
    }

    fn increment(&self, product_id: &ProductId, quantity: i64) -> Result<(), StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned("products"))?;
        let product = products
            .get_mut(product_id)
            .ok_or_else(|| StoreError::UnknownProduct(product_id.to_string()))?;
        product
            .put_back_stock(quantity)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

/// In-memory reservation ledger rows, keyed by order.
#[derive(Debug, Default)]
pub struct InMemoryReservationStore {
    rows: RwLock<HashMap<OrderId, Vec<Reservation>>>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReservationStore for InMemoryReservationStore {
    fn append(&self, new_rows: Vec<Reservation>) -> Result<(), StoreError> {
        if new_rows.is_empty() {
            return Ok(());
        }
        let mut rows = self.rows.write().map_err(|_| poisoned("reservations"))?;
        for row in new_rows {
            rows.entry(row.order_id).or_default().push(row);
        }
        Ok(())
    }

    fn take_all(&self, order_id: &OrderId) -> Result<Vec<Reservation>, StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned("reservations"))?;
        Ok(rows.remove(order_id).unwrap_or_default())
    }

    fn list(&self, order_id: &OrderId) -> Result<Vec<Reservation>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned("reservations"))?;
        Ok(rows.get(order_id).cloned().unwrap_or_default())
    }
}

/// In-memory order persistence.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned("orders"))?;
        let id = order.id_typed();
        if orders.contains_key(&id) {
            return Err(StoreError::DuplicateOrder(id.to_string()));
        }
        orders.insert(id, order);
        Ok(())
    }

    fn get(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned("orders"))?;
        Ok(orders.get(order_id).cloned())
    }

    fn update(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned("orders"))?;
        let id = order.id_typed();
        if !orders.contains_key(&id) {
            return Err(StoreError::OrderNotFound(id.to_string()));
        }
        orders.insert(id, order);
        Ok(())
    }

    fn remove(&self, order_id: &OrderId) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned("orders"))?;
        if orders.remove(order_id).is_none() {
            return Err(StoreError::OrderNotFound(order_id.to_string()));
        }
        Ok(())
    }

    fn list(&self, user_id: Option<UserId>) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned("orders"))?;
        let mut listed: Vec<Order> = orders
            .values()
            .filter(|o| user_id.is_none_or(|u| o.user_id() == u))
            .cloned()
            .collect();
        // Stable listing: creation order (uuid v7 ids are time-ordered).
        listed.sort_by_key(|o| o.id_typed().0);
        Ok(listed)
    }
}
