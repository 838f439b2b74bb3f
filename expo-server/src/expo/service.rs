//! Expedite service
//!
//! Composes fetcher and grouper into station views. A view is always
//! recomputed wholesale from the store; the cached copy exists only so the
//! latest snapshot can be broadcast and inspected, never as a merge base.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::broadcast;

use super::{fetcher, grouper};
use shared::{Station, TenantId, VirtualOrder};

/// Broadcast capacity for view updates. Subscribers that lag simply miss
/// intermediate snapshots; the next one is complete anyway.
const VIEW_CHANNEL_CAPACITY: usize = 256;

/// A full station snapshot, broadcast after every refresh.
#[derive(Debug, Clone)]
pub struct StationView {
    pub station: Station,
    pub orders: Vec<VirtualOrder>,
}

/// Station view recomputation and distribution.
pub struct ExpoService {
    db: Surreal<Db>,
    tenant: TenantId,
    window_ms: i64,
    views: RwLock<HashMap<Station, Vec<VirtualOrder>>>,
    view_tx: broadcast::Sender<StationView>,
}

impl std::fmt::Debug for ExpoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpoService")
            .field("tenant", &self.tenant)
            .field("window_ms", &self.window_ms)
            .finish()
    }
}

impl ExpoService {
    pub fn new(db: Surreal<Db>, tenant: TenantId, window_ms: i64) -> Arc<Self> {
        let (view_tx, _) = broadcast::channel(VIEW_CHANNEL_CAPACITY);
        Arc::new(Self {
            db,
            tenant,
            window_ms,
            views: RwLock::new(HashMap::new()),
            view_tx,
        })
    }

    /// Recompute one station's view from the store.
    ///
    /// Fetch failures degrade to an empty view inside the fetcher, so this
    /// never errors; a station shows "no orders" rather than crashing the
    /// polling path.
    pub async fn snapshot(&self, station: Station) -> Vec<VirtualOrder> {
        let (tab_rows, counter_rows) =
            fetcher::fetch_station(&self.db, &self.tenant, station).await;
        let orders = grouper::group_rows(tab_rows, counter_rows, self.window_ms);

        self.views.write().insert(station, orders.clone());
        // No receivers is fine; the REST path reads the return value.
        let _ = self.view_tx.send(StationView {
            station,
            orders: orders.clone(),
        });

        orders
    }

    /// Recompute both stations. Runs after every status write and on every
    /// store-change trigger, so the UI never stays stale after a partial
    /// failure.
    pub async fn refresh_all(&self) {
        for station in Station::ALL {
            let orders = self.snapshot(station).await;
            tracing::debug!(station = %station, orders = orders.len(), "Station view refreshed");
        }
    }

    /// Latest cached snapshot, if any refresh has run.
    pub fn cached(&self, station: Station) -> Option<Vec<VirtualOrder>> {
        self.views.read().get(&station).cloned()
    }

    /// Subscribe to view updates.
    pub fn subscribe(&self) -> broadcast::Receiver<StationView> {
        self.view_tx.subscribe()
    }
}
