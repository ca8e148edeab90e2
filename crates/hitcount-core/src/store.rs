//! Store seam and the counter's view of it.
//!
//! `KvStore` is the minimal surface of a networked key-value store. Plain
//! `get` and `set` carry no transactional guarantee between them; `incr` is
//! the store's own atomic increment-and-get.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{HitcountError, Result};

/// Key holding the shared counter.
pub const COUNTER_KEY: &str = "counter";

/// Networked key-value store. Implementations must not retry internally.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Read a key. `Ok(None)` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key with no expiry.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Atomically increment a key by one and return the new value.
    /// A missing key counts as 0.
    async fn incr(&self, key: &str) -> Result<i64>;
}

/// Outcome of reading the counter key.
#[derive(Debug)]
pub enum CounterRead {
    /// Raw stored value, not yet validated.
    Value(String),
    Absent,
    StoreError(HitcountError),
}

impl From<Result<Option<String>>> for CounterRead {
    fn from(r: Result<Option<String>>) -> Self {
        match r {
            Ok(Some(v)) => CounterRead::Value(v),
            Ok(None) => CounterRead::Absent,
            Err(e) => CounterRead::StoreError(e),
        }
    }
}

/// Translates counter operations into store round trips.
#[derive(Clone)]
pub struct CounterStore {
    kv: Arc<dyn KvStore>,
    key: &'static str,
}

impl CounterStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            key: COUNTER_KEY,
        }
    }

    pub fn backend(&self) -> &'static str {
        self.kv.backend()
    }

    /// One round trip. Failures come back as `CounterRead::StoreError`.
    pub async fn read_counter(&self) -> CounterRead {
        self.kv.get(self.key).await.into()
    }

    /// One round trip, no TTL.
    pub async fn write_counter(&self, value: u64) -> Result<()> {
        self.kv.set(self.key, &value.to_string()).await
    }

    /// One round trip. Returns the post-increment value.
    pub async fn increment_counter(&self) -> Result<u64> {
        let post = self.kv.incr(self.key).await?;
        u64::try_from(post)
            .map_err(|_| HitcountError::StoreProtocol(format!("negative counter after incr: {post}")))
    }
}
