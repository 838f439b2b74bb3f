//! Background tasks
//!
//! The refresh listener turns store-change notifications into full station
//! refreshes. The notification payload is never merged incrementally; it
//! only says "something changed", and the refresh re-derives everything
//! from the store.

use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;

/// Spawn the store-change refresh listener.
pub fn spawn_refresh_listener(state: ServerState) {
    tokio::spawn(async move {
        refresh_loop(state).await;
    });
}

async fn refresh_loop(state: ServerState) {
    let mut rx = state.subscribe_changes();
    tracing::info!("Store-change refresh listener started");

    loop {
        match rx.recv().await {
            Ok(change) => {
                tracing::debug!(
                    table = %change.table,
                    id = %change.id,
                    "Store change received, refreshing station views"
                );
                state.expo.refresh_all().await;
            }
            Err(RecvError::Lagged(skipped)) => {
                // Missed triggers collapse into one refresh; the views are
                // recomputed wholesale anyway.
                tracing::warn!(skipped, "Refresh listener lagged, refreshing once");
                state.expo.refresh_all().await;
            }
            Err(RecvError::Closed) => {
                tracing::info!("Store-change channel closed, refresh listener stopping");
                break;
            }
        }
    }
}
