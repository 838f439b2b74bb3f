//! Line Item Model
//!
//! One ordered unit of a menu item, owned by its parent ticket. Created
//! when an order is placed, mutated only by status transitions, never
//! deleted (terminal items persist for history).

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Item-level preparation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl ItemStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ItemStatus::Delivered)
    }
}

/// Which ticket table the parent lives in.
///
/// Denormalized onto every row so the two fetch queries and the write-back
/// resolution can filter without a cross-table join.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketSource {
    Tab,
    Counter,
}

/// Line item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub tenant: String,
    /// Parent ticket (tab_ticket or counter_ticket)
    #[serde(with = "serde_helpers::record_id")]
    pub ticket: RecordId,
    pub source: TicketSource,
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    /// Menu item name snapshot at order time
    pub name: String,
    pub quantity: u32,
    /// Unit price snapshot at order time
    pub unit_price: Decimal,
    pub note: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    /// Epoch millis; drives time-bucket grouping
    pub added_at: i64,
}

/// One requested line when placing an order
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
pub struct LineItemInput {
    /// Menu item reference, "table:id" form
    pub menu_item: String,
    #[validate(range(min = 1, max = 99))]
    pub quantity: u32,
    pub note: Option<String>,
}
