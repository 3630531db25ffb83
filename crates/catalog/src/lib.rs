//! Catalog domain module (products and kits).
//!
//! This crate contains the read side the reservation engine consumes: product
//! records (the stock counter lives here and is mutated only by the
//! reservation ledger) and kit composition. Catalog CRUD itself is an
//! external collaborator; the engine only needs `CatalogProvider`.

pub mod kit;
pub mod product;
pub mod provider;

pub use kit::{Kit, KitComponent, KitId};
pub use product::{Product, ProductId};
pub use provider::CatalogProvider;
