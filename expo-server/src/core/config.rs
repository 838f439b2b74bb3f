//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | WORK_DIR | /var/lib/expo | Work directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | TENANT_ID | default | Tenant this node serves |
//! | GROUP_WINDOW_SECS | 60 | Virtual-order grouping window |
//! | ENVIRONMENT | development | development \| staging \| production |
//!
//! # Example
//!
//! ```ignore
//! WORK_DIR=/data/expo HTTP_PORT=8080 cargo run
//! ```

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Tenant this node serves; threaded explicitly through every store
    /// read and write rather than re-derived per call
    pub tenant_id: String,
    /// Grouping window width in seconds. Items added to the same tab
    /// within one window form one virtual order.
    pub group_window_secs: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/expo".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            tenant_id: std::env::var("TENANT_ID").unwrap_or_else(|_| "default".into()),
            group_window_secs: std::env::var("GROUP_WINDOW_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(60),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override work dir and port, typically for tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Grouping window in milliseconds.
    pub fn window_ms(&self) -> i64 {
        (self.group_window_secs * 1000) as i64
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
