//! Expedite pipeline
//!
//! Turns raw line-item rows into the virtual orders shown on kitchen and
//! bar stations, and pushes station-side status changes back to the store.
//!
//! # Flow
//!
//! ```text
//! status write ──> writer ──> store
//!                               │ (re-fetch, never optimistic)
//!                               ▼
//!                  fetcher ──> grouper ──> station views
//! ```
//!
//! - [`fetcher`] - the two joined read queries per station
//! - [`grouper`] - pure fold of item rows into virtual orders
//! - [`status`] - unified <-> subsystem status vocabularies
//! - [`writer`] - key validation, row resolution, batched write-back
//! - [`service`] - composition, cached views, refresh broadcasting

pub mod fetcher;
pub mod grouper;
pub mod service;
pub mod status;
pub mod writer;

pub use fetcher::{CounterItemRow, TabItemRow};
pub use service::{ExpoService, StationView};
pub use writer::StatusChange;
