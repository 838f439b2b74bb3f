//! Shared types for the Expo kitchen/bar expedite system
//!
//! Wire-level vocabulary used by the server and its clients: the unified
//! order status, station identifiers, the virtual-order key encoding,
//! tenant context, view types and store-change notifications.

pub mod key;
pub mod station;
pub mod status;
pub mod sync;
pub mod tenant;
pub mod view;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use key::{DEFAULT_WINDOW_MS, KeyParseError, OrderKey, TimeBucket};
pub use station::Station;
pub use status::OrderStatus;
pub use sync::{ChangeAction, StoreChange};
pub use tenant::TenantId;
pub use view::{VirtualOrder, VirtualOrderItem};
