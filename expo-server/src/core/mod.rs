//! Core Module
//!
//! Configuration, server state and the HTTP server lifecycle.

pub mod config;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
