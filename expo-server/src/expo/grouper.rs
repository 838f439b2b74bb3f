//! Virtual order grouper
//!
//! Pure fold of the two fetched row streams into virtual orders. Counter
//! tickets group whole; tab items group per (ticket, time bucket), so each
//! ordering wave on a long-running tab becomes its own ticket on the
//! station. Items landing across a window boundary split into two orders
//! even when placed seconds apart; that is accepted behavior, the window
//! width is configuration.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::fetcher::{CounterItemRow, TabItemRow};
use super::status::unified_from_item;
use shared::{OrderKey, TimeBucket, VirtualOrder, VirtualOrderItem};

/// Fold item rows into an ordered list of virtual orders.
///
/// Re-running this on the same snapshot yields identical keys, item sets
/// and totals. Rows are expected oldest-first (the fetcher orders by
/// `added_at`), which makes the first item of each group its creation
/// anchor.
pub fn group_rows(
    tab_rows: Vec<TabItemRow>,
    counter_rows: Vec<CounterItemRow>,
    window_ms: i64,
) -> Vec<VirtualOrder> {
    let mut groups: HashMap<OrderKey, VirtualOrder> = HashMap::new();

    for row in counter_rows {
        let Some(ticket_id) = row.ticket.id.as_ref().map(|id| id.to_string()) else {
            tracing::warn!(item = %row.id, "Counter row without ticket id, skipping");
            continue;
        };
        let key = OrderKey::counter(ticket_id);
        let order = groups.entry(key.clone()).or_insert_with(|| VirtualOrder {
            id: key,
            location: Some(format!("Counter #{}", row.ticket.order_number)),
            notes: row.ticket.customer_name.clone(),
            status: unified_from_item(row.status),
            total: Decimal::ZERO,
            created_at: row.added_at,
            updated_at: row.added_at,
            items: Vec::new(),
        });
        push_item(
            order,
            row.id.to_string(),
            row.name,
            row.quantity,
            row.unit_price,
            row.note,
            row.status,
            row.added_at,
        );
    }

    for row in tab_rows {
        let Some(ticket_id) = row.ticket.id.as_ref().map(|id| id.to_string()) else {
            tracing::warn!(item = %row.id, "Tab row without ticket id, skipping");
            continue;
        };
        let bucket = TimeBucket::of(row.added_at, window_ms);
        let key = OrderKey::tab(ticket_id, bucket);
        let order = groups.entry(key.clone()).or_insert_with(|| VirtualOrder {
            id: key,
            location: Some(row.ticket.table_name.clone()),
            notes: row.ticket.customer_name.clone(),
            status: unified_from_item(row.status),
            total: Decimal::ZERO,
            created_at: row.added_at,
            updated_at: row.added_at,
            items: Vec::new(),
        });
        push_item(
            order,
            row.id.to_string(),
            row.name,
            row.quantity,
            row.unit_price,
            row.note,
            row.status,
            row.added_at,
        );
    }

    let mut orders: Vec<VirtualOrder> = groups
        .into_values()
        .filter(|order| !order.items.is_empty())
        .collect();
    orders.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
    });
    orders
}

#[allow(clippy::too_many_arguments)]
fn push_item(
    order: &mut VirtualOrder,
    id: String,
    name: String,
    quantity: u32,
    unit_price: Decimal,
    note: Option<String>,
    status: crate::db::models::ItemStatus,
    added_at: i64,
) {
    order.total += unit_price * Decimal::from(quantity);
    order.created_at = order.created_at.min(added_at);
    order.updated_at = order.updated_at.max(added_at);
    order.items.push(VirtualOrderItem {
        id,
        name,
        quantity,
        unit_price,
        note,
        status: unified_from_item(status),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{
        CounterStatus, CounterTicket, ItemStatus, MenuItem, TabStatus, TabTicket,
    };
    use chrono::{TimeZone, Utc};
    use shared::DEFAULT_WINDOW_MS;
    use surrealdb::RecordId;

    fn ms(h: u32, m: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(2026, 3, 14, h, m, s)
            .unwrap()
            .timestamp_millis()
    }

    fn menu_item(name: &str) -> MenuItem {
        MenuItem {
            id: Some(RecordId::from_table_key("menu_item", name)),
            tenant: "t1".into(),
            name: name.into(),
            price: Decimal::new(450, 2),
            direct: false,
            is_active: true,
        }
    }

    fn tab_ticket(key: &str) -> TabTicket {
        TabTicket {
            id: Some(RecordId::from_table_key("tab_ticket", key)),
            tenant: "t1".into(),
            customer_name: Some("Ana".into()),
            table_name: "Table 4".into(),
            opened_at: ms(11, 30, 0),
            status: TabStatus::Open,
        }
    }

    fn tab_row(item_key: &str, ticket_key: &str, price_cents: i64, qty: u32, at: i64) -> TabItemRow {
        TabItemRow {
            id: RecordId::from_table_key("line_item", item_key),
            name: format!("Dish {item_key}"),
            quantity: qty,
            unit_price: Decimal::new(price_cents, 2),
            note: None,
            status: ItemStatus::Pending,
            added_at: at,
            ticket: tab_ticket(ticket_key),
            menu_item: menu_item("burger"),
        }
    }

    fn counter_row(item_key: &str, ticket_key: &str, qty: u32, at: i64) -> CounterItemRow {
        CounterItemRow {
            id: RecordId::from_table_key("line_item", item_key),
            name: format!("Dish {item_key}"),
            quantity: qty,
            unit_price: Decimal::new(1200, 2),
            note: None,
            status: ItemStatus::Pending,
            added_at: at,
            ticket: CounterTicket {
                id: Some(RecordId::from_table_key("counter_ticket", ticket_key)),
                tenant: "t1".into(),
                order_number: 7,
                customer_name: None,
                created_at: at,
                status: CounterStatus::Paid,
                prep_started_at: None,
                prep_done_at: None,
            },
            menu_item: menu_item("espresso"),
        }
    }

    #[test]
    fn counter_ticket_groups_whole_regardless_of_timing() {
        let rows = vec![
            counter_row("c1", "w1", 1, ms(12, 0, 5)),
            counter_row("c2", "w1", 2, ms(12, 7, 0)),
        ];
        let orders = group_rows(vec![], rows, DEFAULT_WINDOW_MS);

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[0].id, OrderKey::counter("counter_ticket:w1"));
        assert_eq!(orders[0].location.as_deref(), Some("Counter #7"));
        // 1 x 12.00 + 2 x 12.00
        assert_eq!(orders[0].total, Decimal::new(3600, 2));
    }

    #[test]
    fn same_minute_tab_items_group_together() {
        // 12:00:00 and 12:00:59 share a bucket; 12:01:01 does not.
        let rows = vec![
            tab_row("a", "t1", 450, 1, ms(12, 0, 0)),
            tab_row("b", "t1", 450, 1, ms(12, 0, 59)),
            tab_row("c", "t1", 450, 1, ms(12, 1, 1)),
        ];
        let orders = group_rows(rows, vec![], DEFAULT_WINDOW_MS);

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[1].items.len(), 1);
    }

    #[test]
    fn two_waves_on_one_ticket_become_two_orders_with_own_totals() {
        // Three items at 12:00:05 and 12:00:40, one more at 12:05:00,
        // all on ticket t1.
        let rows = vec![
            tab_row("a", "t1", 1050, 2, ms(12, 0, 5)),
            tab_row("b", "t1", 300, 1, ms(12, 0, 40)),
            tab_row("c", "t1", 800, 1, ms(12, 5, 0)),
        ];
        let orders = group_rows(rows, vec![], DEFAULT_WINDOW_MS);

        assert_eq!(orders.len(), 2);

        let first = &orders[0];
        assert_eq!(first.items.len(), 2);
        // 2 x 10.50 + 1 x 3.00
        assert_eq!(first.total, Decimal::new(2400, 2));
        assert_eq!(first.created_at, ms(12, 0, 5));
        assert_eq!(first.updated_at, ms(12, 0, 40));

        let second = &orders[1];
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.total, Decimal::new(800, 2));
    }

    #[test]
    fn grouping_key_is_reversible() {
        let added_at = ms(12, 0, 40);
        let rows = vec![tab_row("a", "t1", 450, 1, added_at)];
        let orders = group_rows(rows, vec![], DEFAULT_WINDOW_MS);

        // Encode to the wire form and parse back: ticket and minute floor
        // must be recovered exactly.
        let encoded = orders[0].id.to_string();
        let parsed: OrderKey = encoded.parse().unwrap();
        let OrderKey::Tab {
            ticket,
            bucket: Some(bucket),
        } = parsed
        else {
            panic!("expected tab key");
        };
        assert_eq!(ticket, "tab_ticket:t1");
        assert_eq!(bucket, TimeBucket::of(added_at, DEFAULT_WINDOW_MS));
        assert_eq!(bucket.start_ms(), ms(12, 0, 0));
    }

    #[test]
    fn regrouping_the_same_snapshot_is_idempotent() {
        let tab = vec![
            tab_row("a", "t1", 450, 1, ms(12, 0, 5)),
            tab_row("b", "t2", 900, 2, ms(12, 2, 10)),
        ];
        let counter = vec![counter_row("c1", "w1", 1, ms(12, 1, 0))];

        let first = group_rows(tab.clone(), counter.clone(), DEFAULT_WINDOW_MS);
        let second = group_rows(tab, counter, DEFAULT_WINDOW_MS);

        assert_eq!(first, second);
    }

    #[test]
    fn output_is_ordered_by_creation_time() {
        let tab = vec![tab_row("late", "t1", 450, 1, ms(12, 9, 0))];
        let counter = vec![counter_row("early", "w1", 1, ms(12, 1, 0))];
        let orders = group_rows(tab, counter, DEFAULT_WINDOW_MS);

        assert_eq!(orders.len(), 2);
        assert!(orders[0].created_at < orders[1].created_at);
    }

    #[test]
    fn wider_window_merges_waves() {
        // Same two waves as the minute test, but a 10-minute window.
        let rows = vec![
            tab_row("a", "t1", 450, 1, ms(12, 0, 5)),
            tab_row("b", "t1", 450, 1, ms(12, 5, 0)),
        ];
        let orders = group_rows(rows, vec![], 10 * 60 * 1000);
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items.len(), 2);
    }
}
