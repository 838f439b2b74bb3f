//! Database Models

// Serde helpers
pub mod serde_helpers;

// Catalog
pub mod menu_item;

// Tickets
pub mod counter_ticket;
pub mod tab_ticket;

// Items
pub mod line_item;

// Re-exports
pub use counter_ticket::{CounterStatus, CounterTicket, CounterTicketCreate};
pub use line_item::{ItemStatus, LineItem, LineItemInput, TicketSource};
pub use menu_item::{MenuItem, MenuItemCreate};
pub use tab_ticket::{TabStatus, TabTicket, TabTicketCreate};
