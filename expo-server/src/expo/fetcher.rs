//! Raw item fetcher
//!
//! Two independent read-only queries per station: tab line items filtered
//! by item status, and counter line items filtered by parent ticket
//! status. Rows come back joined with their parent ticket and menu item,
//! ordered ascending by `added_at` so grouping is deterministic.
//!
//! The kitchen station excludes direct (no-preparation) products and
//! hides `READY` work; the bar sees both.

use rust_decimal::Decimal;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::models::{
    CounterStatus, CounterTicket, ItemStatus, MenuItem, TabTicket, serde_helpers,
};
use crate::db::repository::RepoResult;
use shared::{Station, TenantId};

/// A tab line item joined with its parent ticket and menu item.
#[derive(Debug, Clone, Deserialize)]
pub struct TabItemRow {
    #[serde(with = "serde_helpers::record_id")]
    pub id: RecordId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub note: Option<String>,
    pub status: ItemStatus,
    pub added_at: i64,
    pub ticket: TabTicket,
    pub menu_item: MenuItem,
}

/// A counter line item joined with its parent ticket and menu item.
#[derive(Debug, Clone, Deserialize)]
pub struct CounterItemRow {
    #[serde(with = "serde_helpers::record_id")]
    pub id: RecordId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub note: Option<String>,
    pub status: ItemStatus,
    pub added_at: i64,
    pub ticket: CounterTicket,
    pub menu_item: MenuItem,
}

/// Item statuses a station wants to see on tab tickets.
fn tab_statuses(station: Station) -> Vec<ItemStatus> {
    let mut statuses = vec![ItemStatus::Pending, ItemStatus::Preparing];
    if station.shows_ready() {
        statuses.push(ItemStatus::Ready);
    }
    statuses
}

/// Parent ticket statuses a station wants to see on counter tickets.
fn counter_statuses(station: Station) -> Vec<CounterStatus> {
    let mut statuses = vec![CounterStatus::Paid, CounterStatus::Preparing];
    if station.shows_ready() {
        statuses.push(CounterStatus::Ready);
    }
    statuses
}

/// Tab line items currently in flight for the station.
pub async fn fetch_tab_rows(
    db: &Surreal<Db>,
    tenant: &TenantId,
    station: Station,
) -> RepoResult<Vec<TabItemRow>> {
    let rows: Vec<TabItemRow> = db
        .query(
            "SELECT * FROM line_item \
             WHERE tenant = $tenant \
               AND source = 'TAB' \
               AND status IN $statuses \
               AND ($include_direct OR menu_item.direct = false) \
             ORDER BY added_at ASC \
             FETCH ticket, menu_item",
        )
        .bind(("tenant", tenant.as_str().to_string()))
        .bind(("statuses", tab_statuses(station)))
        .bind(("include_direct", station.includes_direct_products()))
        .await?
        .take(0)?;
    Ok(rows)
}

/// Counter line items whose parent ticket is paid and not yet handed over.
pub async fn fetch_counter_rows(
    db: &Surreal<Db>,
    tenant: &TenantId,
    station: Station,
) -> RepoResult<Vec<CounterItemRow>> {
    let rows: Vec<CounterItemRow> = db
        .query(
            "SELECT * FROM line_item \
             WHERE tenant = $tenant \
               AND source = 'COUNTER' \
               AND ticket.status IN $statuses \
               AND ($include_direct OR menu_item.direct = false) \
             ORDER BY added_at ASC \
             FETCH ticket, menu_item",
        )
        .bind(("tenant", tenant.as_str().to_string()))
        .bind(("statuses", counter_statuses(station)))
        .bind(("include_direct", station.includes_direct_products()))
        .await?
        .take(0)?;
    Ok(rows)
}

/// Fetch both row streams concurrently, degrading each to empty on
/// failure. Station views show "no orders" rather than an error state;
/// this read runs on every poll and realtime trigger.
pub async fn fetch_station(
    db: &Surreal<Db>,
    tenant: &TenantId,
    station: Station,
) -> (Vec<TabItemRow>, Vec<CounterItemRow>) {
    let (tab, counter) = tokio::join!(
        fetch_tab_rows(db, tenant, station),
        fetch_counter_rows(db, tenant, station),
    );

    let tab = tab.unwrap_or_else(|e| {
        tracing::error!(station = %station, error = %e, "Tab item fetch failed, showing empty");
        vec![]
    });
    let counter = counter.unwrap_or_else(|e| {
        tracing::error!(station = %station, error = %e, "Counter item fetch failed, showing empty");
        vec![]
    });

    (tab, counter)
}
