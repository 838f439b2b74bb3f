//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness endpoint
//! - [`menu_items`] - catalog management
//! - [`tabs`] - tab tickets (open, add waves, settle)
//! - [`counter`] - walk-up tickets (create, confirm payment)
//! - [`stations`] - kitchen/bar views and status write-back

pub mod convert;

pub mod counter;
pub mod health;
pub mod menu_items;
pub mod stations;
pub mod tabs;

use axum::Router;

use crate::core::ServerState;

/// Compose all API routers.
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(menu_items::router())
        .merge(tabs::router())
        .merge(counter::router())
        .merge(stations::router())
}

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
