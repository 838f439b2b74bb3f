//! Counter Ticket Model
//!
//! A single walk-up order. Created as PENDING_PAYMENT and invisible to
//! stations until payment is confirmed externally; DELIVERED is the
//! terminal hand-over state.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Counter ticket status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterStatus {
    #[default]
    PendingPayment,
    Paid,
    Preparing,
    Ready,
    Delivered,
}

impl CounterStatus {
    /// Statuses a station can ever see (payment confirmed onwards,
    /// non-terminal).
    pub const STATION_VISIBLE: [CounterStatus; 3] = [
        CounterStatus::Paid,
        CounterStatus::Preparing,
        CounterStatus::Ready,
    ];
}

/// Counter ticket entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterTicket {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub tenant: String,
    pub order_number: i64,
    pub customer_name: Option<String>,
    /// Epoch millis
    pub created_at: i64,
    #[serde(default)]
    pub status: CounterStatus,
    /// Stamped when the ticket enters PREPARING
    pub prep_started_at: Option<i64>,
    /// Stamped when the ticket enters READY
    pub prep_done_at: Option<i64>,
}

/// Create counter ticket payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterTicketCreate {
    pub customer_name: Option<String>,
}
