//! Cache key generators for consistent key naming.

use seatbook_core::EventId;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "seatbook:cache";

/// Cache key for a single event snapshot.
#[must_use]
pub fn event_by_id(id: EventId) -> String {
    format!("{}:event:{}", CACHE_PREFIX, id)
}

/// Cache key for the full event listing.
#[must_use]
pub fn events_list() -> String {
    format!("{}:events:list", CACHE_PREFIX)
}

/// Every key whose snapshot includes the event.
#[must_use]
pub fn event_keys(id: EventId) -> Vec<String> {
    vec![event_by_id(id), events_list()]
}
