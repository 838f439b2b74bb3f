//! Station Views API module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{station}/orders", get(handler::list_orders))
        .route("/{station}/orders/{key}/status", post(handler::update_status))
}
