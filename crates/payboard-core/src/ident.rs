//! Identifier generation for new payment records.
//!
//! Identifiers come from a PRNG seeded with the current Unix time truncated
//! to whole seconds. Two requests in the same second therefore produce the
//! same identifier; the server answers the second one with a conflict and
//! the submission client regenerates.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PaymentId;

/// Number of decimal digits in a generated identifier.
pub const ID_DIGITS: usize = 16;

const ID_RANGE: u64 = 10_000_000_000_000_000;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock stopped at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Create a clock stopped at a Unix timestamp in milliseconds.
    pub fn from_millis(millis: i64) -> Self {
        let now = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_else(|| DateTime::<Utc>::from(std::time::UNIX_EPOCH));
        Self::new(now)
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move the clock forward.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Map a seed to its identifier.
///
/// Pure: the same seed always gives the same identifier.
pub fn identifier_for_seed(seed: u64) -> PaymentId {
    let mut rng = StdRng::seed_from_u64(seed);
    let value: u64 = rng.gen_range(0..ID_RANGE);
    PaymentId::new(format!("{:0width$}", value, width = ID_DIGITS))
}

/// Format an instant the way records carry it: `2024-01-02T15:04:05.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Produces `(id, timestamp)` pairs for stamping drafts.
#[derive(Clone)]
pub struct IdentifierGenerator {
    clock: Arc<dyn Clock>,
}

impl IdentifierGenerator {
    /// Create a generator reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Create a generator on wall-clock time.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Generate an identifier seeded by the current second, and the current
    /// instant as an ISO-8601 string.
    pub fn generate(&self) -> (PaymentId, String) {
        let now = self.clock.now();
        let seed = now.timestamp() as u64;
        (identifier_for_seed(seed), format_timestamp(now))
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for IdentifierGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierGenerator").finish_non_exhaustive()
    }
}
