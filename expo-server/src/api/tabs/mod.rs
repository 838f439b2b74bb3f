//! Tab Tickets API module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tabs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::open))
        .route("/{id}", get(handler::get_book_entry))
        .route("/{id}/items", post(handler::add_items))
        .route("/{id}/settle", post(handler::settle))
}
