//! Repository Module
//!
//! CRUD operations for the SurrealDB tables. All ids follow the
//! "table:key" string convention and are handled as `RecordId`:
//!   - parse: `let id: RecordId = "menu_item:abc".parse()?;`
//!   - create: `RecordId::from_table_key("menu_item", "abc")`
//!   - table name: `id.table()`, bare key: `id.key().to_string()`

pub mod counter_ticket;
pub mod line_item;
pub mod menu_item;
pub mod tab_ticket;

// Re-exports
pub use counter_ticket::CounterTicketRepository;
pub use line_item::LineItemRepository;
pub use menu_item::MenuItemRepository;
pub use tab_ticket::TabTicketRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
