use dashmap::DashMap;
use jiff::civil::Date;

use crate::{ClientIdentity, RateLimitDecision};

/// Counter key: one window per client per UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct WindowKey {
    client: ClientIdentity,
    day: Date,
}

impl WindowKey {
    pub(crate) fn new(client: ClientIdentity, day: Date) -> Self {
        Self { client, day }
    }
}

/// Storage backend for window counters.
///
/// Only an in-memory backend exists today; an external store would slot in
/// here if quota enforcement ever has to survive restarts or replicas.
pub(crate) trait RateLimitStorage {
    fn check_and_consume(&self, key: WindowKey, limit: u32) -> RateLimitDecision;
}

/// Process-local counter table.
///
/// Entries accumulate for the process lifetime; the table is bounded by
/// distinct clients times days seen, which is acceptable at this scale.
#[derive(Default)]
pub(crate) struct InMemoryStorage {
    counters: DashMap<WindowKey, u32>,
}

impl RateLimitStorage for InMemoryStorage {
    fn check_and_consume(&self, key: WindowKey, limit: u32) -> RateLimitDecision {
        // The entry guard holds the shard lock, so the read-modify-write
        // below is a single critical section per key.
        let mut count = self.counters.entry(key).or_insert(0);

        if *count >= limit {
            return RateLimitDecision {
                allowed: false,
                used: *count,
                limit,
            };
        }

        *count += 1;

        RateLimitDecision {
            allowed: true,
            used: *count,
            limit,
        }
    }
}
