//! Counter Ticket Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{CounterStatus, CounterTicket, CounterTicketCreate};
use serde::Deserialize;
use shared::TenantId;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "counter_ticket";

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct CounterTicketRepository {
    base: BaseRepository,
}

impl CounterTicketRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find ticket by id, scoped to the tenant
    pub async fn find_by_id(
        &self,
        tenant: &TenantId,
        id: &str,
    ) -> RepoResult<Option<CounterTicket>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let ticket: Option<CounterTicket> = self.base.db().select(thing).await?;
        Ok(ticket.filter(|t| t.tenant == tenant.as_str()))
    }

    /// Next walk-up order number for the tenant
    pub async fn next_order_number(&self, tenant: &TenantId) -> RepoResult<i64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM counter_ticket WHERE tenant = $tenant GROUP ALL")
            .bind(("tenant", tenant.as_str().to_string()))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0) + 1)
    }

    /// Create a walk-up ticket awaiting payment
    pub async fn create(
        &self,
        tenant: &TenantId,
        data: CounterTicketCreate,
        order_number: i64,
        created_at: i64,
    ) -> RepoResult<CounterTicket> {
        let ticket = CounterTicket {
            id: None,
            tenant: tenant.as_str().to_string(),
            order_number,
            customer_name: data.customer_name,
            created_at,
            status: CounterStatus::PendingPayment,
            prep_started_at: None,
            prep_done_at: None,
        };

        let created: Option<CounterTicket> = self.base.db().create(TABLE).content(ticket).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create counter ticket".to_string()))
    }

    /// External payment confirmation: PENDING_PAYMENT -> PAID.
    ///
    /// This is the transition that makes the order station-visible.
    pub async fn confirm_payment(&self, tenant: &TenantId, id: &str) -> RepoResult<CounterTicket> {
        let ticket = self
            .find_by_id(tenant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Counter ticket {} not found", id)))?;

        if ticket.status != CounterStatus::PendingPayment {
            return Err(RepoError::Validation(format!(
                "Counter ticket {} is not awaiting payment",
                id
            )));
        }

        self.set_status(&ticket, CounterStatus::Paid, None, None).await?;

        self.find_by_id(tenant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Counter ticket {} not found", id)))
    }

    /// Write the ticket-level status, optionally stamping the preparation
    /// timestamps.
    pub async fn set_status(
        &self,
        ticket: &CounterTicket,
        status: CounterStatus,
        prep_started_at: Option<i64>,
        prep_done_at: Option<i64>,
    ) -> RepoResult<()> {
        let thing = ticket
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Counter ticket has no id".to_string()))?;

        // Preserve previously stamped timestamps; only fill ones newly set.
        let started = prep_started_at.or(ticket.prep_started_at);
        let done = prep_done_at.or(ticket.prep_done_at);

        self.base
            .db()
            .query(
                "UPDATE $thing SET status = $status, prep_started_at = $started, prep_done_at = $done",
            )
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("started", started))
            .bind(("done", done))
            .await?;
        Ok(())
    }
}
