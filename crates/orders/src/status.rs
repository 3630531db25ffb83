use serde::{Deserialize, Serialize};

use reliefhub_core::{DomainError, DomainResult};

/// Order status lifecycle.
///
/// Orders created through the portal start at `Submitted`; `Draft` exists for
/// the explicit save-draft path, which reserves no stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
    Packing,
    Ready,
    Delivered,
    Cancelled,
}

/// The allowed `(from, to)` edges for `transition_to`.
///
/// `Draft -> Submitted` is deliberately absent: submitting a draft must
/// reserve stock, so it only happens through the orchestrator's submit path,
/// never through a plain status change.
const ALLOWED_TRANSITIONS: &[(OrderStatus, OrderStatus)] = &[
    (OrderStatus::Draft, OrderStatus::Cancelled),
    (OrderStatus::Submitted, OrderStatus::Approved),
    (OrderStatus::Submitted, OrderStatus::Rejected),
    (OrderStatus::Submitted, OrderStatus::Cancelled),
    (OrderStatus::Approved, OrderStatus::Packing),
    (OrderStatus::Approved, OrderStatus::Cancelled),
    (OrderStatus::Packing, OrderStatus::Ready),
    (OrderStatus::Packing, OrderStatus::Cancelled),
    (OrderStatus::Ready, OrderStatus::Delivered),
    (OrderStatus::Ready, OrderStatus::Cancelled),
];

impl OrderStatus {
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        ALLOWED_TRANSITIONS.contains(&(self, to))
    }

    /// Single enforcement point for the workflow: off-table edges fail with a
    /// typed error instead of being silently persisted.
    pub fn transition_to(self, to: OrderStatus) -> DomainResult<OrderStatus> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(DomainError::invalid_transition(self, to))
        }
    }

    /// No further transition is defined from a terminal status.
    pub fn is_terminal(self) -> bool {
        ALLOWED_TRANSITIONS.iter().all(|(from, _)| *from != self)
    }

    /// Transitions *into* a reversing status must restore the order's
    /// reservations before the status change is visible.
    pub fn is_reversing(self) -> bool {
        matches!(self, OrderStatus::Rejected | OrderStatus::Cancelled)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Submitted => "submitted",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Packing => "packing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}
