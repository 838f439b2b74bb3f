//! Secondary tab book
//!
//! An in-memory mirror of open tab tickets, kept alongside the store for
//! migration compatibility. It is populated when tabs are opened and items
//! placed, and driven by the status writer's projection so the two
//! representations track the same item states.
//!
//! The book is deliberately not authoritative: it lives only as long as
//! the process, and a ticket the book has never seen gets a minimal
//! placeholder instead of failing the write that referenced it. That keeps
//! the projection idempotent-ish at the cost of a known, logged
//! inconsistency window.

use dashmap::DashMap;
use serde::Serialize;

use crate::db::models::{ItemStatus, TabTicket};

/// One item as the book tracks it.
#[derive(Debug, Clone, Serialize)]
pub struct TabBookItem {
    /// line_item record id, "table:key" form
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub status: ItemStatus,
    pub added_at: i64,
}

/// One tab ticket as the book tracks it.
#[derive(Debug, Clone, Serialize)]
pub struct TabRecord {
    /// tab_ticket record id, "table:key" form
    pub ticket: String,
    pub table_name: Option<String>,
    pub customer_name: Option<String>,
    pub opened_at: i64,
    pub items: Vec<TabBookItem>,
    /// True when the record was synthesized by a projection rather than
    /// created through the placement path.
    pub placeholder: bool,
}

/// What a status projection actually did.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionOutcome {
    /// Items whose status was updated in place
    pub applied: usize,
    /// Items the book had never seen and recorded as stubs
    pub stubbed: usize,
    /// Whether the ticket itself had to be synthesized
    pub created_placeholder: bool,
}

/// In-memory tab ticket book.
#[derive(Debug, Default)]
pub struct TabBook {
    tickets: DashMap<String, TabRecord>,
}

impl TabBook {
    pub fn new() -> Self {
        Self {
            tickets: DashMap::new(),
        }
    }

    /// Register a freshly opened tab.
    pub fn open(&self, ticket_id: &str, ticket: &TabTicket) {
        self.tickets.insert(
            ticket_id.to_string(),
            TabRecord {
                ticket: ticket_id.to_string(),
                table_name: Some(ticket.table_name.clone()),
                customer_name: ticket.customer_name.clone(),
                opened_at: ticket.opened_at,
                items: Vec::new(),
                placeholder: false,
            },
        );
    }

    /// Record a wave of placed items. Unknown tickets get a placeholder so
    /// placement never fails on the secondary path.
    pub fn add_items(&self, ticket_id: &str, items: Vec<TabBookItem>) {
        let mut entry = self
            .tickets
            .entry(ticket_id.to_string())
            .or_insert_with(|| placeholder_record(ticket_id));
        entry.items.extend(items);
    }

    /// Project a status change onto the book: the same resolved item set
    /// the primary write covered.
    pub fn project_item_status(
        &self,
        ticket_id: &str,
        ticket: Option<&TabTicket>,
        item_ids: &[String],
        status: ItemStatus,
    ) -> ProjectionOutcome {
        let mut outcome = ProjectionOutcome::default();

        let mut entry = self.tickets.entry(ticket_id.to_string()).or_insert_with(|| {
            outcome.created_placeholder = true;
            match ticket {
                Some(t) => TabRecord {
                    ticket: ticket_id.to_string(),
                    table_name: Some(t.table_name.clone()),
                    customer_name: t.customer_name.clone(),
                    opened_at: t.opened_at,
                    items: Vec::new(),
                    placeholder: true,
                },
                None => placeholder_record(ticket_id),
            }
        });

        for id in item_ids {
            if let Some(item) = entry.items.iter_mut().find(|item| item.id == *id) {
                item.status = status;
                outcome.applied += 1;
            } else {
                // The store knows this item, the book does not. Record a
                // stub so later projections find it.
                entry.items.push(TabBookItem {
                    id: id.clone(),
                    name: String::new(),
                    quantity: 1,
                    status,
                    added_at: 0,
                });
                outcome.stubbed += 1;
            }
        }

        outcome
    }

    /// Read a ticket's book entry.
    pub fn get(&self, ticket_id: &str) -> Option<TabRecord> {
        self.tickets.get(ticket_id).map(|entry| entry.clone())
    }

    /// Drop a settled ticket from the book.
    pub fn close(&self, ticket_id: &str) -> bool {
        self.tickets.remove(ticket_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

fn placeholder_record(ticket_id: &str) -> TabRecord {
    TabRecord {
        ticket: ticket_id.to_string(),
        table_name: None,
        customer_name: None,
        opened_at: 0,
        items: Vec::new(),
        placeholder: true,
    }
}
