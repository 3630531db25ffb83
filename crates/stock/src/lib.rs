//! Stock domain module.
//!
//! Pure types and arithmetic for the reservation engine: resolved
//! requirements (kit lines fully expanded to products), requirement
//! aggregation, and the reservation ledger row. No IO, no storage.

pub mod requirement;
pub mod reservation;

pub use requirement::{aggregate, kit_requirements, Requirement};
pub use reservation::Reservation;
