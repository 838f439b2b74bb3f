//! Station Views API Handlers
//!
//! The read side recomputes the station view from the store on every call;
//! there is no optimistic local mutation anywhere. The write side drives
//! the status writer and then refreshes both stations no matter how the
//! write went, so a partial failure never leaves a stale view behind.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::expo::writer;
use crate::utils::{AppError, AppResult};
use shared::{OrderKey, OrderStatus, Station, VirtualOrder};

/// GET /api/stations/:station/orders - Current virtual orders
pub async fn list_orders(
    State(state): State<ServerState>,
    Path(station): Path<String>,
) -> AppResult<Json<Vec<VirtualOrder>>> {
    let station: Station = station.parse().map_err(AppError::Validation)?;
    let orders = state.expo.snapshot(station).await;
    Ok(Json(orders))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub key: OrderKey,
    pub status: OrderStatus,
    /// Exactly the line items the batched update covered
    pub item_ids: Vec<String>,
}

/// POST /api/stations/:station/orders/:key/status - Push a status change
pub async fn update_status(
    State(state): State<ServerState>,
    Path((station, key)): Path<(String, String)>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<UpdateStatusResponse>> {
    let _station: Station = station.parse().map_err(AppError::Validation)?;

    // Malformed keys are rejected here, before any write is attempted.
    let key: OrderKey = key
        .parse()
        .map_err(|e: shared::KeyParseError| AppError::Validation(e.to_string()))?;

    let result = writer::apply_status(
        &state.db,
        &state.tenant,
        &state.tabs,
        &key,
        payload.status,
        state.config.window_ms(),
    )
    .await;

    // Best-effort refresh of both stations, write outcome notwithstanding.
    state.expo.refresh_all().await;

    let change = result?;

    Ok(Json(UpdateStatusResponse {
        key: change.key,
        status: change.target,
        item_ids: change.item_ids.iter().map(|id| id.to_string()).collect(),
    }))
}
