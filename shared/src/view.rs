//! Virtual-order view types
//!
//! The station-facing shape of a grouped order. Derived on every fetch,
//! never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::key::OrderKey;
use crate::status::OrderStatus;

/// One line of a virtual order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VirtualOrderItem {
    /// Backing line_item record id, "table:key" form.
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: OrderStatus,
}

/// A derived grouping of line items presented to staff as one order.
///
/// All items share the parent ticket, and for tab tickets the grouping
/// window. Status is taken from the items (homogeneity assumed, not
/// enforced).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VirtualOrder {
    /// Reversible key; serialized as the wire string form.
    pub id: OrderKey,
    /// Table label for tab orders, counter number for walk-ups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Synthesized from customer info on the parent ticket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: OrderStatus,
    /// Sum of unit_price x quantity over the items.
    pub total: Decimal,
    /// Earliest item's added_at, epoch millis.
    pub created_at: i64,
    /// Latest item's added_at, epoch millis.
    pub updated_at: i64,
    pub items: Vec<VirtualOrderItem>,
}
