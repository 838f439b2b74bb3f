//! Counter Tickets API Handlers
//!
//! Walk-up orders are created with their items in PENDING_PAYMENT and stay
//! invisible to stations until the payment confirmation arrives.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::api::convert::build_line_items;
use crate::core::ServerState;
use crate::db::models::{CounterTicket, CounterTicketCreate, LineItem, LineItemInput, TicketSource};
use crate::db::repository::{CounterTicketRepository, LineItemRepository};
use crate::utils::{AppError, AppResult};
use shared::StoreChange;

#[derive(Debug, Deserialize)]
pub struct CreateCounterRequest {
    pub customer_name: Option<String>,
    pub items: Vec<LineItemInput>,
}

#[derive(Debug, Serialize)]
pub struct CreateCounterResponse {
    pub ticket: CounterTicket,
    pub items: Vec<LineItem>,
}

/// POST /api/counter - Create a walk-up order awaiting payment
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateCounterRequest>,
) -> AppResult<Json<CreateCounterResponse>> {
    let repo = CounterTicketRepository::new(state.db.clone());

    let order_number = repo.next_order_number(&state.tenant).await?;
    let created_at = chrono::Utc::now().timestamp_millis();
    let ticket = repo
        .create(
            &state.tenant,
            CounterTicketCreate {
                customer_name: payload.customer_name,
            },
            order_number,
            created_at,
        )
        .await?;

    let ticket_id = ticket
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Created counter ticket has no id"))?;

    let items = build_line_items(&state, &ticket_id, TicketSource::Counter, payload.items).await?;
    let item_repo = LineItemRepository::new(state.db.clone());
    let created = item_repo.add_batch(items).await?;

    state.broadcast_change(StoreChange::created("counter_ticket", ticket_id.to_string()));

    Ok(Json(CreateCounterResponse {
        ticket,
        items: created,
    }))
}

/// POST /api/counter/:id/pay - External payment confirmation
///
/// PENDING_PAYMENT -> PAID; the order becomes station-visible on the next
/// fetch.
pub async fn pay(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CounterTicket>> {
    let ticket_id: RecordId = id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid counter ticket id: {id}")))?;

    let repo = CounterTicketRepository::new(state.db.clone());
    let ticket = repo
        .confirm_payment(&state.tenant, &ticket_id.to_string())
        .await?;

    state.broadcast_change(StoreChange::updated("counter_ticket", ticket_id.to_string()));

    Ok(Json(ticket))
}
