//! Tab Ticket Model
//!
//! An open table session accumulating line items over a visit, possibly in
//! several waves. Ticket-level payment states exist for settlement only and
//! are never shown on station views.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Tab ticket status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TabStatus {
    #[default]
    Open,
    PendingPayment,
    Paid,
}

/// Tab ticket entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabTicket {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub tenant: String,
    pub customer_name: Option<String>,
    pub table_name: String,
    /// Epoch millis
    pub opened_at: i64,
    #[serde(default)]
    pub status: TabStatus,
}

/// Open tab payload
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
pub struct TabTicketCreate {
    #[validate(length(min = 1, max = 60))]
    pub table_name: String,
    pub customer_name: Option<String>,
}
