//! Status writer
//!
//! Pushes a station-side status change back to the store. The virtual
//! order key is decoded at the HTTP boundary; here it is validated,
//! resolved to the concrete line-item rows it stands for, translated into
//! the right subsystem vocabulary and written in one batched update.
//!
//! Resolution recomputes time buckets from stored `added_at` timestamps.
//! There is no persisted grouping id; the recomputation is the source of
//! truth, which is what keeps write scoping exact when one ticket carries
//! several ordering waves.

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::status::{counter_from_unified, item_from_unified};
use crate::db::models::LineItem;
use crate::db::repository::{CounterTicketRepository, LineItemRepository, TabTicketRepository};
use crate::tabs::TabBook;
use crate::utils::{AppError, AppResult};
use shared::{OrderKey, OrderStatus, TenantId, TimeBucket};

const TAB_TABLE: &str = "tab_ticket";
const COUNTER_TABLE: &str = "counter_ticket";

/// Outcome of a write-back: exactly which rows were touched.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub key: OrderKey,
    pub target: OrderStatus,
    pub item_ids: Vec<RecordId>,
}

/// Check that the ticket id recovered from a key is a well-formed record
/// id of the expected table. A malformed id must fail here, before any
/// update is issued; it must never degrade into a zero-row write.
pub fn validate_ticket_id(key: &OrderKey) -> AppResult<RecordId> {
    let (raw, expected) = match key {
        OrderKey::Counter { ticket } => (ticket.as_str(), COUNTER_TABLE),
        OrderKey::Tab { ticket, .. } => (ticket.as_str(), TAB_TABLE),
    };

    let id: RecordId = raw.parse().map_err(|_| {
        AppError::Validation(format!(
            "Order key '{key}' does not contain a well-formed ticket id: '{raw}'"
        ))
    })?;

    if id.table() != expected {
        return Err(AppError::Validation(format!(
            "Order key '{key}' points at table '{}', expected '{expected}'",
            id.table()
        )));
    }

    Ok(id)
}

/// Pick the wave of items a tab key stands for.
///
/// With a bucket: exact matches on the recomputed bucket. Without one
/// (degraded key): the most recently added wave.
pub fn select_wave(
    items: Vec<LineItem>,
    bucket: Option<TimeBucket>,
    window_ms: i64,
) -> Vec<LineItem> {
    match bucket {
        Some(target) => items
            .into_iter()
            .filter(|item| TimeBucket::of(item.added_at, window_ms) == target)
            .collect(),
        None => {
            let Some(latest) = items
                .iter()
                .map(|item| TimeBucket::of(item.added_at, window_ms))
                .max()
            else {
                return vec![];
            };
            items
                .into_iter()
                .filter(|item| TimeBucket::of(item.added_at, window_ms) == latest)
                .collect()
        }
    }
}

/// Apply a unified status to the virtual order named by `key`.
///
/// Any failure aborts the remaining steps and surfaces to the caller; the
/// caller owns the best-effort view refresh that follows regardless.
pub async fn apply_status(
    db: &Surreal<Db>,
    tenant: &TenantId,
    tabs: &TabBook,
    key: &OrderKey,
    target: OrderStatus,
    window_ms: i64,
) -> AppResult<StatusChange> {
    let ticket_id = validate_ticket_id(key)?;

    match key {
        OrderKey::Counter { .. } => apply_counter(db, tenant, ticket_id, key, target).await,
        OrderKey::Tab { bucket, .. } => {
            apply_tab(db, tenant, tabs, ticket_id, key, *bucket, target, window_ms).await
        }
    }
}

async fn apply_counter(
    db: &Surreal<Db>,
    tenant: &TenantId,
    ticket_id: RecordId,
    key: &OrderKey,
    target: OrderStatus,
) -> AppResult<StatusChange> {
    let tickets = CounterTicketRepository::new(db.clone());
    let items_repo = LineItemRepository::new(db.clone());

    let ticket = tickets
        .find_by_id(tenant, &ticket_id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Counter ticket {ticket_id} not found")))?;

    let items = items_repo.find_active_by_ticket(&ticket_id).await?;
    if items.is_empty() {
        return Err(AppError::not_found(format!(
            "No open items on counter ticket {ticket_id}"
        )));
    }
    let item_ids: Vec<RecordId> = items.into_iter().filter_map(|item| item.id).collect();

    // Ticket-level vocabulary plus the preparation timestamps.
    let external = counter_from_unified(target);
    let now = Utc::now().timestamp_millis();
    let (started, done) = match target {
        OrderStatus::Preparing => (Some(now), None),
        OrderStatus::Ready => (None, Some(now)),
        _ => (None, None),
    };
    tickets.set_status(&ticket, external, started, done).await?;

    items_repo
        .update_status_batch(item_ids.clone(), item_from_unified(target))
        .await?;

    tracing::info!(
        order_key = %key,
        status = %target,
        items = item_ids.len(),
        "Counter order status updated"
    );

    Ok(StatusChange {
        key: key.clone(),
        target,
        item_ids,
    })
}

#[allow(clippy::too_many_arguments)]
async fn apply_tab(
    db: &Surreal<Db>,
    tenant: &TenantId,
    tabs: &TabBook,
    ticket_id: RecordId,
    key: &OrderKey,
    bucket: Option<TimeBucket>,
    target: OrderStatus,
    window_ms: i64,
) -> AppResult<StatusChange> {
    let tickets = TabTicketRepository::new(db.clone());
    let items_repo = LineItemRepository::new(db.clone());

    let ticket = tickets
        .find_by_id(tenant, &ticket_id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Tab ticket {ticket_id} not found")))?;

    if bucket.is_none() {
        tracing::warn!(order_key = %key, "Tab key has no time bucket, updating the latest wave");
    }

    let items = items_repo.find_active_by_ticket(&ticket_id).await?;
    let wave = select_wave(items, bucket, window_ms);
    if wave.is_empty() {
        return Err(AppError::not_found(format!("No open items for order {key}")));
    }
    let item_ids: Vec<RecordId> = wave.into_iter().filter_map(|item| item.id).collect();

    items_repo
        .update_status_batch(item_ids.clone(), item_from_unified(target))
        .await?;

    // Projection into the secondary tab book: same resolved item set, same
    // operation, applied right after the primary write. Divergence here is
    // logged, never fatal to the write that already happened.
    let id_strings: Vec<String> = item_ids.iter().map(|id| id.to_string()).collect();
    let outcome = tabs.project_item_status(
        &ticket_id.to_string(),
        Some(&ticket),
        &id_strings,
        item_from_unified(target),
    );
    if outcome.created_placeholder || outcome.stubbed > 0 {
        tracing::warn!(
            order_key = %key,
            placeholder = outcome.created_placeholder,
            stubbed = outcome.stubbed,
            "Tab book was behind the store during status projection"
        );
    }

    tracing::info!(
        order_key = %key,
        status = %target,
        items = item_ids.len(),
        "Tab order status updated"
    );

    Ok(StatusChange {
        key: key.clone(),
        target,
        item_ids,
    })
}
