//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine). The store is the single source of
//! truth for tickets and line items; station views are derived from it on
//! every fetch and never cached incrementally.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "expo";
const DATABASE: &str = "expo";

/// Open the embedded database at the given path.
pub async fn connect(db_path: &str) -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<RocksDb>(db_path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    tracing::info!(path = %db_path, "Database connection established (SurrealDB RocksDB)");

    Ok(db)
}
