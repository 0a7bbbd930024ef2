//! Per-client daily request quota.
//!
//! One `RateLimitManager` lives for the whole process and owns its counter
//! state; callers hand it a client identity and a timestamp and get back an
//! admit/reject decision. The window is the UTC calendar day of the supplied
//! timestamp: counters roll over at UTC midnight and are never shared across
//! identities.

mod storage;

use std::{fmt, net::IpAddr};

use jiff::{Timestamp, civil::Date, tz::TimeZone};

use storage::{InMemoryStorage, RateLimitStorage, WindowKey};

/// Identifies the caller for quota accounting.
///
/// Derived from the apparent network address and prefixed so it cannot
/// collide with other identity schemes added later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    pub fn from_ip(ip: IpAddr) -> Self {
        Self(format!("ip:{ip}"))
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests admitted so far in the window, including this one if allowed.
    pub used: u32,
    pub limit: u32,
}

/// Process-wide quota manager.
///
/// State is in-memory and lost on restart; enforcement is best-effort per
/// process. Stale day keys are not evicted.
pub struct RateLimitManager {
    storage: InMemoryStorage,
    limit: u32,
}

impl RateLimitManager {
    pub fn new(daily_limit: u32) -> Self {
        Self {
            storage: InMemoryStorage::default(),
            limit: daily_limit,
        }
    }

    /// Admit or reject one request for `identity` at time `now`.
    ///
    /// The counter is incremented only when the request is admitted, and the
    /// check-then-increment runs as a single critical section per key, so
    /// concurrent callers can never push a window past the limit.
    pub fn check_and_increment(&self, identity: &ClientIdentity, now: Timestamp) -> RateLimitDecision {
        let key = WindowKey::new(identity.clone(), utc_day(now));
        let decision = self.storage.check_and_consume(key, self.limit);

        if decision.allowed {
            log::debug!(
                "admitted request {}/{} for {identity} on {}",
                decision.used,
                decision.limit,
                utc_day(now)
            );
        } else {
            log::debug!("quota exhausted for {identity} on {}", utc_day(now));
        }

        decision
    }
}

fn utc_day(now: Timestamp) -> Date {
    now.to_zoned(TimeZone::UTC).date()
}
