//! Counter Service: produce the next count and persist the increment.
//!
//! The default mode is a plain read, then write of `observed + 1`, as two
//! independent round trips with no lock, compare-and-swap, or transaction.
//! Two concurrent callers can observe the same value and both write
//! `observed + 1`; the counter then advances by one and both callers report
//! the same number (lost update). `CounterMode::Atomic` swaps the pair for the
//! store's increment-and-get and keeps the same contract (pre-increment value
//! returned).

use std::fmt;
use std::str::FromStr;

use crate::error::{HitcountError, Result};
use crate::store::{CounterRead, CounterStore};

/// Wire value reported in place of a count when counting failed.
pub const FAILED_SENTINEL: i64 = -1;

/// Convert a count outcome to the value rendered on the wire.
pub fn wire_count(result: &Result<u64>) -> i64 {
    match result {
        Ok(n) => i64::try_from(*n).unwrap_or(FAILED_SENTINEL),
        Err(_) => FAILED_SENTINEL,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterMode {
    /// GET then SET, unsynchronized.
    #[default]
    ReadModifyWrite,
    /// Single INCR round trip.
    Atomic,
}

impl CounterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CounterMode::ReadModifyWrite => "read-modify-write",
            CounterMode::Atomic => "atomic",
        }
    }
}

impl fmt::Display for CounterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CounterMode {
    type Err = HitcountError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read-modify-write" | "rmw" => Ok(CounterMode::ReadModifyWrite),
            "atomic" => Ok(CounterMode::Atomic),
            other => Err(HitcountError::Config(format!(
                "unknown counter mode {other:?} (expected read-modify-write or atomic)"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct CounterService {
    store: CounterStore,
    mode: CounterMode,
}

impl CounterService {
    pub fn new(store: CounterStore, mode: CounterMode) -> Self {
        Self { store, mode }
    }

    /// Return the count observed before this call's increment.
    ///
    /// Errors are single-shot: nothing is retried, and a failed read never
    /// attempts a write. Failures are logged here, inside the caller's span.
    pub async fn next_count(&self) -> Result<u64> {
        let res = match self.mode {
            CounterMode::ReadModifyWrite => self.read_modify_write().await,
            CounterMode::Atomic => self.atomic().await,
        };
        if let Err(e) = &res {
            tracing::error!(
                backend = self.store.backend(),
                mode = %self.mode,
                code = e.client_code().as_str(),
                error = %e,
                "count failed"
            );
        }
        res
    }

    async fn read_modify_write(&self) -> Result<u64> {
        let observed = match self.store.read_counter().await {
            CounterRead::Value(raw) => parse_count(&raw)?,
            CounterRead::Absent => 0,
            CounterRead::StoreError(e) => return Err(e),
        };

        let next = observed
            .checked_add(1)
            .ok_or_else(|| HitcountError::StoreProtocol("counter overflow".into()))?;

        // Read already succeeded; a failed write still fails the count.
        self.store.write_counter(next).await?;
        Ok(observed)
    }

    async fn atomic(&self) -> Result<u64> {
        let post = self.store.increment_counter().await?;
        post.checked_sub(1)
            .ok_or_else(|| HitcountError::StoreProtocol(format!("incr returned {post}")))
    }
}

fn parse_count(raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|e| HitcountError::StoreProtocol(format!("stored counter {raw:?} is not a count: {e}")))
}
