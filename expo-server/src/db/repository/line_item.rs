//! Line Item Repository
//!
//! Writes and write-back reads. The joined station-view queries live in
//! the expedite fetcher; this repository covers placement and the status
//! writer's resolution/update path.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{ItemStatus, LineItem};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "line_item";

#[derive(Clone)]
pub struct LineItemRepository {
    base: BaseRepository,
}

impl LineItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a wave of items in one batch
    pub async fn add_batch(&self, items: Vec<LineItem>) -> RepoResult<Vec<LineItem>> {
        if items.is_empty() {
            return Ok(vec![]);
        }
        let created: Vec<LineItem> = self.base.db().insert(TABLE).content(items).await?;
        Ok(created)
    }

    /// All non-terminal items of a ticket, oldest first.
    ///
    /// This is the write-back resolution read: the caller recomputes time
    /// buckets from `added_at` rather than trusting any stored grouping.
    pub async fn find_active_by_ticket(&self, ticket: &RecordId) -> RepoResult<Vec<LineItem>> {
        let items: Vec<LineItem> = self
            .base
            .db()
            .query(
                "SELECT * FROM line_item \
                 WHERE ticket = $ticket AND status != $terminal \
                 ORDER BY added_at ASC",
            )
            .bind(("ticket", ticket.clone()))
            .bind(("terminal", ItemStatus::Delivered))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Batched status update covering exactly the given item ids
    pub async fn update_status_batch(
        &self,
        ids: Vec<RecordId>,
        status: ItemStatus,
    ) -> RepoResult<()> {
        if ids.is_empty() {
            return Err(RepoError::Validation(
                "Refusing batched status update with no item ids".to_string(),
            ));
        }
        self.base
            .db()
            .query("UPDATE $ids SET status = $status")
            .bind(("ids", ids))
            .bind(("status", status))
            .await?;
        Ok(())
    }
}
