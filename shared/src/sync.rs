//! Store-change notifications
//!
//! Published after every successful write. Subscribers treat a change as a
//! trigger to re-fetch and re-group; the payload is never used for
//! incremental updates, so lost or lagged notifications only delay a
//! refresh, they cannot corrupt a view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Created,
    Updated,
}

/// A row-level change in one of the order tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreChange {
    /// Table name ("tab_ticket", "counter_ticket", "line_item", ...)
    pub table: String,
    pub action: ChangeAction,
    /// Record id, "table:key" form.
    pub id: String,
}

impl StoreChange {
    pub fn created(table: impl Into<String>, id: impl Into<String>) -> Self {
        StoreChange {
            table: table.into(),
            action: ChangeAction::Created,
            id: id.into(),
        }
    }

    pub fn updated(table: impl Into<String>, id: impl Into<String>) -> Self {
        StoreChange {
            table: table.into(),
            action: ChangeAction::Updated,
            id: id.into(),
        }
    }
}
