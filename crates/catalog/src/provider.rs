use std::sync::Arc;

use crate::kit::{Kit, KitId};
use crate::product::{Product, ProductId};

/// Read access to the catalog, as consumed by the reservation engine.
///
/// Returns owned snapshots: validation runs against the stock values read
/// here, and the ledger re-checks availability at commit time.
pub trait CatalogProvider: Send + Sync {
    fn product(&self, id: &ProductId) -> Option<Product>;
    fn kit(&self, id: &KitId) -> Option<Kit>;
}

impl<P> CatalogProvider for Arc<P>
where
    P: CatalogProvider + ?Sized,
{
    fn product(&self, id: &ProductId) -> Option<Product> {
        (**self).product(id)
    }

    fn kit(&self, id: &KitId) -> Option<Kit> {
        (**self).kit(id)
    }
}
