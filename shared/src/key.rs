//! Virtual-order keys
//!
//! A virtual order is a derived grouping of line items, recomputed on every
//! fetch and never persisted. Its key must be reversible: from a key the
//! server recovers the parent ticket id and (for tab tickets) the grouping
//! window, and re-resolves the underlying rows for a write-back. Inside the
//! server the key is always this structured type; the string encoding
//! exists only at the wire boundary.
//!
//! Wire forms:
//!
//! | Form | Example |
//! |------|---------|
//! | `counter-<ticket>` | `counter-counter_ticket:x7qf2m81z0a4jw5ke9rn` |
//! | `tab-<ticket>-<bucket start ms>` | `tab-tab_ticket:p03dkk7vq1...-1754560800000` |
//! | `tab-<ticket>` | degraded form, bucket unrecoverable |

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Default grouping window: one calendar minute.
pub const DEFAULT_WINDOW_MS: i64 = 60_000;

/// An `added_at` timestamp truncated to the start of its grouping window.
///
/// All bucket math is on UTC epoch milliseconds; the same truncation is
/// used for grouping and for write-back lookup, so a bucket recovered from
/// a key always matches a bucket recomputed from a stored timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeBucket(i64);

impl TimeBucket {
    /// Truncate a timestamp to the start of its window.
    pub fn of(ts_ms: i64, window_ms: i64) -> Self {
        debug_assert!(window_ms > 0);
        TimeBucket(ts_ms - ts_ms.rem_euclid(window_ms))
    }

    /// Window start, epoch milliseconds.
    pub fn start_ms(self) -> i64 {
        self.0
    }

    /// Rebuild a bucket from a previously encoded start timestamp.
    pub fn from_start_ms(start_ms: i64) -> Self {
        TimeBucket(start_ms)
    }
}

impl std::fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from decoding a wire-encoded order key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("order key '{0}' has no 'tab-' or 'counter-' prefix")]
    UnknownPrefix(String),

    #[error("order key '{0}' has an empty ticket id")]
    EmptyTicket(String),
}

/// Structured key of a virtual order.
///
/// Counter tickets group whole; tab tickets group per time bucket, so one
/// long-running tab yields a distinct virtual order per ordering wave. The
/// bucket is optional on the tab variant to accept degraded keys whose
/// window was lost; the writer falls back to the most recent wave.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderKey {
    Counter {
        /// Parent counter ticket, "table:key" form.
        ticket: String,
    },
    Tab {
        /// Parent tab ticket, "table:key" form.
        ticket: String,
        bucket: Option<TimeBucket>,
    },
}

impl OrderKey {
    pub fn counter(ticket: impl Into<String>) -> Self {
        OrderKey::Counter {
            ticket: ticket.into(),
        }
    }

    pub fn tab(ticket: impl Into<String>, bucket: TimeBucket) -> Self {
        OrderKey::Tab {
            ticket: ticket.into(),
            bucket: Some(bucket),
        }
    }

    /// Parent ticket id, whichever variant.
    pub fn ticket(&self) -> &str {
        match self {
            OrderKey::Counter { ticket } => ticket,
            OrderKey::Tab { ticket, .. } => ticket,
        }
    }
}

impl std::fmt::Display for OrderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderKey::Counter { ticket } => write!(f, "counter-{ticket}"),
            OrderKey::Tab {
                ticket,
                bucket: Some(bucket),
            } => write!(f, "tab-{ticket}-{bucket}"),
            OrderKey::Tab {
                ticket,
                bucket: None,
            } => write!(f, "tab-{ticket}"),
        }
    }
}

impl std::str::FromStr for OrderKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(ticket) = s.strip_prefix("counter-") {
            if ticket.is_empty() {
                return Err(KeyParseError::EmptyTicket(s.to_string()));
            }
            return Ok(OrderKey::Counter {
                ticket: ticket.to_string(),
            });
        }

        if let Some(rest) = s.strip_prefix("tab-") {
            if rest.is_empty() {
                return Err(KeyParseError::EmptyTicket(s.to_string()));
            }
            // The bucket is the numeric tail after the last '-'. Ticket ids
            // are "table:key" with alphanumeric keys, so a purely numeric
            // tail is unambiguous; anything else is a degraded bucketless
            // key.
            if let Some((ticket, tail)) = rest.rsplit_once('-')
                && !ticket.is_empty()
                && !tail.is_empty()
                && tail.bytes().all(|b| b.is_ascii_digit())
                && let Ok(start_ms) = tail.parse::<i64>()
            {
                return Ok(OrderKey::Tab {
                    ticket: ticket.to_string(),
                    bucket: Some(TimeBucket::from_start_ms(start_ms)),
                });
            }
            return Ok(OrderKey::Tab {
                ticket: rest.to_string(),
                bucket: None,
            });
        }

        Err(KeyParseError::UnknownPrefix(s.to_string()))
    }
}

impl Serialize for OrderKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for OrderKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ms(h: u32, m: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(2026, 3, 14, h, m, s)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn bucket_floors_to_minute_start() {
        let bucket = TimeBucket::of(ms(12, 0, 59), DEFAULT_WINDOW_MS);
        assert_eq!(bucket.start_ms(), ms(12, 0, 0));
    }

    #[test]
    fn same_minute_shares_bucket_next_minute_does_not() {
        let a = TimeBucket::of(ms(12, 0, 0), DEFAULT_WINDOW_MS);
        let b = TimeBucket::of(ms(12, 0, 59), DEFAULT_WINDOW_MS);
        let c = TimeBucket::of(ms(12, 1, 1), DEFAULT_WINDOW_MS);
        assert_eq!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn counter_key_round_trips() {
        let key = OrderKey::counter("counter_ticket:x7qf2m81z0a4jw5ke9rn");
        let encoded = key.to_string();
        assert_eq!(encoded, "counter-counter_ticket:x7qf2m81z0a4jw5ke9rn");
        assert_eq!(encoded.parse::<OrderKey>().unwrap(), key);
    }

    #[test]
    fn tab_key_round_trips_with_exact_bucket() {
        let added_at = ms(12, 0, 40);
        let bucket = TimeBucket::of(added_at, DEFAULT_WINDOW_MS);
        let key = OrderKey::tab("tab_ticket:p03dkk7vq1m5ze8wa2xb", bucket);

        let parsed: OrderKey = key.to_string().parse().unwrap();
        assert_eq!(parsed, key);

        // Reversibility: the recovered bucket is exactly floor(t, minute).
        let OrderKey::Tab {
            ticket,
            bucket: Some(recovered),
        } = parsed
        else {
            panic!("expected tab key with bucket");
        };
        assert_eq!(ticket, "tab_ticket:p03dkk7vq1m5ze8wa2xb");
        assert_eq!(recovered.start_ms(), ms(12, 0, 0));
    }

    #[test]
    fn bucketless_tab_key_parses_as_degraded() {
        let parsed: OrderKey = "tab-tab_ticket:p03dkk7vq1m5ze8wa2xb".parse().unwrap();
        assert_eq!(
            parsed,
            OrderKey::Tab {
                ticket: "tab_ticket:p03dkk7vq1m5ze8wa2xb".to_string(),
                bucket: None,
            }
        );
    }

    #[test]
    fn non_numeric_tail_stays_part_of_ticket() {
        let parsed: OrderKey = "tab-tab_ticket:abc-def".parse().unwrap();
        assert_eq!(
            parsed,
            OrderKey::Tab {
                ticket: "tab_ticket:abc-def".to_string(),
                bucket: None,
            }
        );
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert!(matches!(
            "order-xyz".parse::<OrderKey>(),
            Err(KeyParseError::UnknownPrefix(_))
        ));
        assert!(matches!(
            "counter-".parse::<OrderKey>(),
            Err(KeyParseError::EmptyTicket(_))
        ));
        assert!(matches!(
            "tab-".parse::<OrderKey>(),
            Err(KeyParseError::EmptyTicket(_))
        ));
    }

    #[test]
    fn serde_round_trips_as_string() {
        let key = OrderKey::tab(
            "tab_ticket:p03dkk7vq1m5ze8wa2xb",
            TimeBucket::from_start_ms(1754560800000),
        );
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"tab-tab_ticket:p03dkk7vq1m5ze8wa2xb-1754560800000\"");
        let back: OrderKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
