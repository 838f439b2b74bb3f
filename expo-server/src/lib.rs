//! Expo Server - kitchen/bar expedite node for a restaurant system
//!
//! # Architecture
//!
//! - **Pipeline** (`expo`): raw item fetch, virtual-order grouping, status
//!   mapping and batched write-back
//! - **Database** (`db`): embedded SurrealDB store for tickets and items
//! - **Tab book** (`tabs`): secondary in-memory mirror of open tabs
//! - **HTTP API** (`api`): station views, placement and payment endpoints
//!
//! # Module structure
//!
//! ```text
//! expo-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! ├── expo/          # expedite pipeline
//! ├── tabs/          # secondary tab book
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod expo;
pub mod tabs;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::expo::{ExpoService, StationView};
pub use crate::tabs::TabBook;
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: .env file and logging.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").ok();
    init_logger_with_file(log_level.as_deref(), None);

    Ok(())
}
