//! End-to-end status flow against a real embedded store.
//!
//! Covers the write-scoping guarantees: a status change touches exactly
//! the line items its virtual-order key resolves to, across both ticket
//! subsystems, and the station views reflect the change on the next
//! fetch.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use expo_server::db::models::{
    CounterStatus, CounterTicketCreate, ItemStatus, LineItem, MenuItemCreate, TabTicketCreate,
    TicketSource,
};
use expo_server::db::repository::{
    CounterTicketRepository, LineItemRepository, MenuItemRepository, TabTicketRepository,
};
use expo_server::expo::writer;
use expo_server::{AppError, Config, ServerState};
use shared::{OrderKey, OrderStatus, Station, TimeBucket};
use surrealdb::RecordId;

async fn test_state() -> (ServerState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db_path = tmp.path().join("expo.db");
    let db = expo_server::db::connect(&db_path.to_string_lossy())
        .await
        .expect("open db");
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    (ServerState::with_db(config, db), tmp)
}

fn ms(h: u32, m: u32, s: u32) -> i64 {
    Utc.with_ymd_and_hms(2026, 3, 14, h, m, s)
        .unwrap()
        .timestamp_millis()
}

fn line_item(
    state: &ServerState,
    ticket: &RecordId,
    source: TicketSource,
    menu_item: &RecordId,
    name: &str,
    added_at: i64,
) -> LineItem {
    LineItem {
        id: None,
        tenant: state.tenant.as_str().to_string(),
        ticket: ticket.clone(),
        source,
        menu_item: menu_item.clone(),
        name: name.to_string(),
        quantity: 1,
        unit_price: Decimal::new(900, 2),
        note: None,
        status: ItemStatus::Pending,
        added_at,
    }
}

async fn seed_menu_item(state: &ServerState, name: &str, direct: bool) -> RecordId {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .create(
            &state.tenant,
            MenuItemCreate {
                name: name.to_string(),
                price: Decimal::new(900, 2),
                direct,
            },
        )
        .await
        .expect("create menu item");
    item.id.expect("menu item id")
}

async fn seed_tab_ticket(state: &ServerState, table: &str) -> RecordId {
    let repo = TabTicketRepository::new(state.db.clone());
    let ticket = repo
        .create(
            &state.tenant,
            TabTicketCreate {
                table_name: table.to_string(),
                customer_name: None,
            },
            ms(11, 30, 0),
        )
        .await
        .expect("create tab ticket");
    ticket.id.expect("tab ticket id")
}

/// Create a counter ticket and confirm its payment so it is
/// station-visible.
async fn seed_paid_counter_ticket(state: &ServerState) -> RecordId {
    let repo = CounterTicketRepository::new(state.db.clone());
    let number = repo
        .next_order_number(&state.tenant)
        .await
        .expect("order number");
    let ticket = repo
        .create(
            &state.tenant,
            CounterTicketCreate {
                customer_name: None,
            },
            number,
            ms(11, 55, 0),
        )
        .await
        .expect("create counter ticket");
    let id = ticket.id.expect("counter ticket id");
    repo.confirm_payment(&state.tenant, &id.to_string())
        .await
        .expect("confirm payment");
    id
}

#[tokio::test]
async fn marking_counter_ready_touches_only_that_ticket() {
    let (state, _tmp) = test_state().await;
    let burger = seed_menu_item(&state, "Burger", false).await;

    let counter_id = seed_paid_counter_ticket(&state).await;
    let tab_id = seed_tab_ticket(&state, "Table 4").await;

    let item_repo = LineItemRepository::new(state.db.clone());
    item_repo
        .add_batch(vec![
            line_item(
                &state,
                &counter_id,
                TicketSource::Counter,
                &burger,
                "Burger",
                ms(12, 0, 10),
            ),
            line_item(
                &state,
                &counter_id,
                TicketSource::Counter,
                &burger,
                "Burger",
                ms(12, 0, 12),
            ),
            line_item(
                &state,
                &tab_id,
                TicketSource::Tab,
                &burger,
                "Burger",
                ms(12, 0, 15),
            ),
        ])
        .await
        .expect("seed items");

    let key = OrderKey::counter(counter_id.to_string());
    let change = writer::apply_status(
        &state.db,
        &state.tenant,
        &state.tabs,
        &key,
        OrderStatus::Ready,
        state.config.window_ms(),
    )
    .await
    .expect("apply status");

    assert_eq!(change.item_ids.len(), 2);

    // Every counter item is READY, the ticket is READY with prep_done_at
    // stamped, and the tab item was not touched.
    let counter_items = item_repo
        .find_active_by_ticket(&counter_id)
        .await
        .expect("counter items");
    assert!(counter_items.iter().all(|i| i.status == ItemStatus::Ready));

    let ticket = CounterTicketRepository::new(state.db.clone())
        .find_by_id(&state.tenant, &counter_id.to_string())
        .await
        .expect("find ticket")
        .expect("ticket exists");
    assert_eq!(ticket.status, CounterStatus::Ready);
    assert!(ticket.prep_done_at.is_some());

    let tab_items = item_repo
        .find_active_by_ticket(&tab_id)
        .await
        .expect("tab items");
    assert!(tab_items.iter().all(|i| i.status == ItemStatus::Pending));
}

#[tokio::test]
async fn two_waves_on_one_tab_update_independently() {
    let (state, _tmp) = test_state().await;
    let burger = seed_menu_item(&state, "Burger", false).await;
    let tab_id = seed_tab_ticket(&state, "Table 4").await;

    let item_repo = LineItemRepository::new(state.db.clone());
    item_repo
        .add_batch(vec![
            line_item(&state, &tab_id, TicketSource::Tab, &burger, "A", ms(12, 0, 5)),
            line_item(&state, &tab_id, TicketSource::Tab, &burger, "B", ms(12, 0, 40)),
            line_item(&state, &tab_id, TicketSource::Tab, &burger, "C", ms(12, 5, 0)),
        ])
        .await
        .expect("seed items");

    let window_ms = state.config.window_ms();
    let key = OrderKey::tab(
        tab_id.to_string(),
        TimeBucket::of(ms(12, 0, 5), window_ms),
    );

    let change = writer::apply_status(
        &state.db,
        &state.tenant,
        &state.tabs,
        &key,
        OrderStatus::Preparing,
        window_ms,
    )
    .await
    .expect("apply status");

    // Exactly the first wave: two items, not the 12:05 one.
    assert_eq!(change.item_ids.len(), 2);

    let items = item_repo
        .find_active_by_ticket(&tab_id)
        .await
        .expect("items");
    for item in &items {
        let expected = if item.added_at < ms(12, 1, 0) {
            ItemStatus::Preparing
        } else {
            ItemStatus::Pending
        };
        assert_eq!(item.status, expected, "item {} at {}", item.name, item.added_at);
    }

    // The projection reached the tab book as well, stubbing the items the
    // book had never seen.
    let record = state.tabs.get(&tab_id.to_string()).expect("book record");
    assert_eq!(record.items.len(), 2);
    assert!(record
        .items
        .iter()
        .all(|i| i.status == ItemStatus::Preparing));
}

#[tokio::test]
async fn station_views_reflect_payment_and_direct_flags() {
    let (state, _tmp) = test_state().await;
    let burger = seed_menu_item(&state, "Burger", false).await;
    let soda = seed_menu_item(&state, "Soda", true).await;

    let tab_id = seed_tab_ticket(&state, "Table 2").await;
    let item_repo = LineItemRepository::new(state.db.clone());
    item_repo
        .add_batch(vec![
            line_item(&state, &tab_id, TicketSource::Tab, &burger, "Burger", ms(12, 0, 5)),
            line_item(&state, &tab_id, TicketSource::Tab, &soda, "Soda", ms(12, 0, 6)),
        ])
        .await
        .expect("seed tab items");

    // An unpaid walk-up stays invisible everywhere.
    let counter_repo = CounterTicketRepository::new(state.db.clone());
    let number = counter_repo
        .next_order_number(&state.tenant)
        .await
        .expect("number");
    let unpaid = counter_repo
        .create(
            &state.tenant,
            CounterTicketCreate {
                customer_name: None,
            },
            number,
            ms(12, 0, 0),
        )
        .await
        .expect("create")
        .id
        .expect("id");
    item_repo
        .add_batch(vec![line_item(
            &state,
            &unpaid,
            TicketSource::Counter,
            &burger,
            "Burger",
            ms(12, 0, 20),
        )])
        .await
        .expect("seed counter item");

    // Kitchen: tab burger only (soda is direct, walk-up unpaid).
    let kitchen = state.expo.snapshot(Station::Kitchen).await;
    assert_eq!(kitchen.len(), 1);
    assert_eq!(kitchen[0].items.len(), 1);
    assert_eq!(kitchen[0].items[0].name, "Burger");

    // Bar: the soda shows up alongside the burger.
    let bar = state.expo.snapshot(Station::Bar).await;
    assert_eq!(bar.len(), 1);
    assert_eq!(bar[0].items.len(), 2);

    // After payment the walk-up appears.
    counter_repo
        .confirm_payment(&state.tenant, &unpaid.to_string())
        .await
        .expect("pay");
    let kitchen = state.expo.snapshot(Station::Kitchen).await;
    assert_eq!(kitchen.len(), 2);
}

#[tokio::test]
async fn fetch_failure_degrades_to_empty_views() {
    // An uninitialised handle makes every query fail; the fetcher must
    // swallow that into "no orders" instead of crashing the polling path.
    let db: surrealdb::Surreal<surrealdb::engine::local::Db> = surrealdb::Surreal::init();
    let tenant = shared::TenantId::new("default");

    let (tab, counter) =
        expo_server::expo::fetcher::fetch_station(&db, &tenant, Station::Kitchen).await;
    assert!(tab.is_empty());
    assert!(counter.is_empty());
}

#[tokio::test]
async fn malformed_keys_fail_before_touching_the_store() {
    let (state, _tmp) = test_state().await;

    let key = OrderKey::counter("definitely-not-a-record-id");
    let err = writer::apply_status(
        &state.db,
        &state.tenant,
        &state.tabs,
        &key,
        OrderStatus::Ready,
        state.config.window_ms(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}
