//! Menu Item Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub tenant: String,
    pub name: String,
    /// Price in currency units
    pub price: Decimal,
    /// Direct products need no preparation (bottled drinks etc.) and are
    /// skipped by the kitchen station.
    #[serde(default)]
    pub direct: bool,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub direct: bool,
}
