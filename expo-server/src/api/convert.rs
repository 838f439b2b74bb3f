//! Request conversion helpers shared by the placement handlers

use chrono::Utc;
use surrealdb::RecordId;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{ItemStatus, LineItem, LineItemInput, TicketSource};
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResult};

/// Turn requested lines into insertable line items, snapshotting the menu
/// item's name and price at order time.
pub async fn build_line_items(
    state: &ServerState,
    ticket: &RecordId,
    source: TicketSource,
    inputs: Vec<LineItemInput>,
) -> AppResult<Vec<LineItem>> {
    if inputs.is_empty() {
        return Err(AppError::validation("Order must contain at least one item"));
    }

    let menu_repo = MenuItemRepository::new(state.db.clone());
    let added_at = Utc::now().timestamp_millis();
    let mut items = Vec::with_capacity(inputs.len());

    for input in inputs {
        input.validate()?;

        let menu_id: RecordId = input
            .menu_item
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid menu item id: {}", input.menu_item)))?;
        if menu_id.table() != "menu_item" {
            return Err(AppError::validation(format!(
                "Not a menu item id: {}",
                input.menu_item
            )));
        }

        let menu_item = menu_repo
            .find_by_id(&menu_id.to_string())
            .await?
            .filter(|m| m.tenant == state.tenant.as_str() && m.is_active)
            .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", menu_id)))?;

        items.push(LineItem {
            id: None,
            tenant: state.tenant.as_str().to_string(),
            ticket: ticket.clone(),
            source,
            menu_item: menu_id,
            name: menu_item.name,
            quantity: input.quantity,
            unit_price: menu_item.price,
            note: input.note,
            status: ItemStatus::Pending,
            added_at,
        });
    }

    Ok(items)
}
