//! Menu Items API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate};
use crate::db::repository::MenuItemRepository;
use crate::utils::AppResult;
use shared::StoreChange;

/// GET /api/menu-items - List active menu items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo.find_all(&state.tenant).await?;
    Ok(Json(items))
}

/// POST /api/menu-items - Create a menu item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;

    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.create(&state.tenant, payload).await?;

    if let Some(id) = &item.id {
        state.broadcast_change(StoreChange::created("menu_item", id.to_string()));
    }

    Ok(Json(item))
}
