//! Tab Tickets API Handlers
//!
//! Placement writes go to the store first and are then mirrored into the
//! in-memory tab book, so the book tracks the same items the stations will
//! see on the next fetch.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use surrealdb::RecordId;
use validator::Validate;

use crate::api::convert::build_line_items;
use crate::core::ServerState;
use crate::db::models::{LineItem, LineItemInput, TabTicket, TabTicketCreate, TicketSource};
use crate::db::repository::{LineItemRepository, TabTicketRepository};
use crate::tabs::TabBookItem;
use crate::utils::{AppError, AppResult};
use shared::StoreChange;

/// POST /api/tabs - Open a tab
pub async fn open(
    State(state): State<ServerState>,
    Json(payload): Json<TabTicketCreate>,
) -> AppResult<Json<TabTicket>> {
    payload.validate()?;

    let repo = TabTicketRepository::new(state.db.clone());
    let opened_at = chrono::Utc::now().timestamp_millis();
    let ticket = repo.create(&state.tenant, payload, opened_at).await?;

    if let Some(id) = &ticket.id {
        state.tabs.open(&id.to_string(), &ticket);
        state.broadcast_change(StoreChange::created("tab_ticket", id.to_string()));
    }

    Ok(Json(ticket))
}

#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    pub items: Vec<LineItemInput>,
}

/// POST /api/tabs/:id/items - Add a wave of items to an open tab
pub async fn add_items(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AddItemsRequest>,
) -> AppResult<Json<Vec<LineItem>>> {
    let ticket_id: RecordId = id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid tab ticket id: {id}")))?;

    let repo = TabTicketRepository::new(state.db.clone());
    repo.find_by_id(&state.tenant, &ticket_id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Tab ticket {ticket_id} not found")))?;

    let items = build_line_items(&state, &ticket_id, TicketSource::Tab, payload.items).await?;

    let item_repo = LineItemRepository::new(state.db.clone());
    let created = item_repo.add_batch(items).await?;

    // Mirror the wave into the tab book.
    let book_items: Vec<TabBookItem> = created
        .iter()
        .filter_map(|item| {
            item.id.as_ref().map(|id| TabBookItem {
                id: id.to_string(),
                name: item.name.clone(),
                quantity: item.quantity,
                status: item.status,
                added_at: item.added_at,
            })
        })
        .collect();
    state.tabs.add_items(&ticket_id.to_string(), book_items);

    state.broadcast_change(StoreChange::updated("tab_ticket", ticket_id.to_string()));

    Ok(Json(created))
}

/// GET /api/tabs/:id - Read the secondary tab book entry
pub async fn get_book_entry(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<crate::tabs::TabRecord>> {
    let record = state
        .tabs
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("Tab {id} not in the book")))?;
    Ok(Json(record))
}

/// POST /api/tabs/:id/settle - Mark the tab paid and drop it from the book
pub async fn settle(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TabTicket>> {
    let repo = TabTicketRepository::new(state.db.clone());
    let ticket = repo.settle(&state.tenant, &id).await?;

    state.tabs.close(&id);
    state.broadcast_change(StoreChange::updated("tab_ticket", id));

    Ok(Json(ticket))
}
