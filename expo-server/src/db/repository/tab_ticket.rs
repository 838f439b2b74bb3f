//! Tab Ticket Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{TabStatus, TabTicket, TabTicketCreate};
use shared::TenantId;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "tab_ticket";

#[derive(Clone)]
pub struct TabTicketRepository {
    base: BaseRepository,
}

impl TabTicketRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find ticket by id, scoped to the tenant
    pub async fn find_by_id(&self, tenant: &TenantId, id: &str) -> RepoResult<Option<TabTicket>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let ticket: Option<TabTicket> = self.base.db().select(thing).await?;
        Ok(ticket.filter(|t| t.tenant == tenant.as_str()))
    }

    /// Open a new tab
    pub async fn create(
        &self,
        tenant: &TenantId,
        data: TabTicketCreate,
        opened_at: i64,
    ) -> RepoResult<TabTicket> {
        let ticket = TabTicket {
            id: None,
            tenant: tenant.as_str().to_string(),
            customer_name: data.customer_name,
            table_name: data.table_name,
            opened_at,
            status: TabStatus::Open,
        };

        let created: Option<TabTicket> = self.base.db().create(TABLE).content(ticket).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create tab ticket".to_string()))
    }

    /// Mark a tab as paid
    pub async fn settle(&self, tenant: &TenantId, id: &str) -> RepoResult<TabTicket> {
        let ticket = self
            .find_by_id(tenant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Tab ticket {} not found", id)))?;

        let thing = ticket
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Tab ticket has no id".to_string()))?;

        self.base
            .db()
            .query("UPDATE $thing SET status = $status")
            .bind(("thing", thing))
            .bind(("status", TabStatus::Paid))
            .await?;

        self.find_by_id(tenant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Tab ticket {} not found", id)))
    }
}
