//! Engine layer: storage seams and the externally visible order operations.
//!
//! Composition (leaves first): the **stock validator** (read-only feasibility
//! check), the **reservation ledger** (the only writer of stock counters, one
//! reservation row per decrement), and the **order service** driving the
//! status workflow and the create/submit unit of work.

pub mod ledger;
pub mod service;
pub mod store;
pub mod validator;
pub mod views;


pub use ledger::ReservationLedger;
pub use service::OrderService;
pub use store::{
    InMemoryInventory, InMemoryOrderStore, InMemoryReservationStore, OrderStore,
    ReservationStore, StockStore, StoreError,
};
pub use validator::{AggregationPolicy, StockValidator};
pub use views::{OrderLineView, OrderView, ResolvedItem};
