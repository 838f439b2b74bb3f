//! Unified order status vocabulary
//!
//! The four-state vocabulary shown on kitchen/bar station views. It is
//! distinct from both ticket-level vocabularies in the store; translation
//! happens in the server's status mapper.

use serde::{Deserialize, Serialize};

/// Unified station-facing order status.
///
/// Progression is strictly forward: `PENDING → PREPARING → READY →
/// DELIVERED`. No cancellation state is modeled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    /// All statuses, in forward order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// The next status in the forward progression, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Terminal statuses drop out of station views.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
        };
        f.write_str(s)
    }
}
