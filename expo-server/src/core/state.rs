//! Server state
//!
//! `ServerState` holds shared references to every service. `Arc` fields
//! make cloning cheap; axum clones the state per request.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::broadcast;

use crate::core::Config;
use crate::core::tasks;
use crate::expo::ExpoService;
use crate::tabs::TabBook;
use shared::{StoreChange, TenantId};

/// Store-change channel capacity. Changes are pure refresh triggers, so a
/// lagged subscriber only needs the fact that something changed, not every
/// individual message.
const CHANGE_CHANNEL_CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Tenant context, threaded through every store call
    pub tenant: TenantId,
    /// Secondary in-memory tab book
    pub tabs: Arc<TabBook>,
    /// Station view recomputation service
    pub expo: Arc<ExpoService>,
    /// Store-change notifications (refresh triggers)
    change_tx: broadcast::Sender<StoreChange>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("tenant", &self.tenant)
            .finish()
    }
}

impl ServerState {
    /// Initialize the server state.
    ///
    /// In order:
    /// 1. work directory structure
    /// 2. embedded database (work_dir/database/expo.db)
    /// 3. services (tab book, expedite service)
    ///
    /// # Panics
    ///
    /// Panics when the work directory or the database cannot be
    /// initialized; the process has nothing to serve without them.
    pub async fn initialize(config: &Config) -> Self {
        std::fs::create_dir_all(config.database_dir())
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("expo.db");
        let db = crate::db::connect(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::with_db(config.clone(), db)
    }

    /// Build state around an existing database handle (tests use this with
    /// a tempdir instance).
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let tenant = TenantId::new(config.tenant_id.clone());
        let tabs = Arc::new(TabBook::new());
        let expo = ExpoService::new(db.clone(), tenant.clone(), config.window_ms());
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        Self {
            config,
            db,
            tenant,
            tabs,
            expo,
            change_tx,
        }
    }

    /// Start background tasks. Must run before `Server::run()` serves
    /// requests.
    pub fn start_background_tasks(&self) {
        tasks::spawn_refresh_listener(self.clone());
    }

    /// Publish a store-change notification. Subscribers use it purely as a
    /// refresh trigger; delivery to zero receivers is not an error.
    pub fn broadcast_change(&self, change: StoreChange) {
        let _ = self.change_tx.send(change);
    }

    /// Subscribe to store-change notifications.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<StoreChange> {
        self.change_tx.subscribe()
    }
}
