//! Status mapper
//!
//! Bidirectional translation between the unified station vocabulary and
//! the two store vocabularies. Forward mappings are total over everything
//! a fetch can return; reverse mappings are scoped to one subsystem and
//! never produce a status outside it. Writing a counter ticket must never
//! use the tab vocabulary and vice versa.

use crate::db::models::{CounterStatus, ItemStatus};
use shared::OrderStatus;

/// Item status -> unified. The item vocabulary is 1:1 with the unified
/// one, so this is the identity translation.
pub fn unified_from_item(status: ItemStatus) -> OrderStatus {
    match status {
        ItemStatus::Pending => OrderStatus::Pending,
        ItemStatus::Preparing => OrderStatus::Preparing,
        ItemStatus::Ready => OrderStatus::Ready,
        ItemStatus::Delivered => OrderStatus::Delivered,
    }
}

/// Unified -> item status (tab subsystem and counter item rows).
pub fn item_from_unified(status: OrderStatus) -> ItemStatus {
    match status {
        OrderStatus::Pending => ItemStatus::Pending,
        OrderStatus::Preparing => ItemStatus::Preparing,
        OrderStatus::Ready => ItemStatus::Ready,
        OrderStatus::Delivered => ItemStatus::Delivered,
    }
}

/// Counter ticket status -> unified.
///
/// `PENDING_PAYMENT` has no unified image; the fetcher filters it out, so
/// a `None` here can only mean a row that should never have reached the
/// mapper.
pub fn unified_from_counter(status: CounterStatus) -> Option<OrderStatus> {
    match status {
        CounterStatus::PendingPayment => None,
        CounterStatus::Paid => Some(OrderStatus::Pending),
        CounterStatus::Preparing => Some(OrderStatus::Preparing),
        CounterStatus::Ready => Some(OrderStatus::Ready),
        CounterStatus::Delivered => Some(OrderStatus::Delivered),
    }
}

/// Unified -> counter ticket status (counter subsystem only).
pub fn counter_from_unified(status: OrderStatus) -> CounterStatus {
    match status {
        OrderStatus::Pending => CounterStatus::Paid,
        OrderStatus::Preparing => CounterStatus::Preparing,
        OrderStatus::Ready => CounterStatus::Ready,
        OrderStatus::Delivered => CounterStatus::Delivered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ITEM: [ItemStatus; 4] = [
        ItemStatus::Pending,
        ItemStatus::Preparing,
        ItemStatus::Ready,
        ItemStatus::Delivered,
    ];

    const ALL_COUNTER: [CounterStatus; 5] = [
        CounterStatus::PendingPayment,
        CounterStatus::Paid,
        CounterStatus::Preparing,
        CounterStatus::Ready,
        CounterStatus::Delivered,
    ];

    #[test]
    fn item_mapping_is_total_and_round_trips() {
        for status in ALL_ITEM {
            let unified = unified_from_item(status);
            assert_eq!(item_from_unified(unified), status);
        }
        for unified in OrderStatus::ALL {
            assert_eq!(unified_from_item(item_from_unified(unified)), unified);
        }
    }

    #[test]
    fn every_fetchable_counter_status_has_exactly_one_unified_image() {
        for status in CounterStatus::STATION_VISIBLE {
            assert!(unified_from_counter(status).is_some());
        }
        // The only hole is the pre-payment state, filtered at fetch time.
        assert_eq!(unified_from_counter(CounterStatus::PendingPayment), None);
    }

    #[test]
    fn counter_reverse_mapping_stays_inside_the_counter_vocabulary() {
        for unified in OrderStatus::ALL {
            let external = counter_from_unified(unified);
            assert!(ALL_COUNTER.contains(&external));
            // PENDING_PAYMENT is unreachable from the station side.
            assert_ne!(external, CounterStatus::PendingPayment);
        }
    }

    #[test]
    fn counter_round_trip_through_unified() {
        for unified in OrderStatus::ALL {
            let back = unified_from_counter(counter_from_unified(unified));
            assert_eq!(back, Some(unified));
        }
    }
}
