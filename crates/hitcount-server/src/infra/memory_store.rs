//! Process-local `KvStore` on a `DashMap`.
//!
//! `incr` runs under the entry's shard lock, so it is atomic per key.

use async_trait::async_trait;
use dashmap::DashMap;

use hitcount_core::error::{HitcountError, Result};
use hitcount_core::KvStore;

/// Process-local store. Replicas do not share it; use for local runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    values: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        // The entry guard holds the shard lock for the whole increment.
        let mut entry = self.values.entry(key.to_string()).or_insert_with(|| "0".into());
        let cur: i64 = entry.parse().map_err(|_| {
            HitcountError::StoreProtocol(format!("value at {key:?} is not an integer"))
        })?;
        let next = cur
            .checked_add(1)
            .ok_or_else(|| HitcountError::StoreProtocol("increment would overflow".into()))?;
        *entry = next.to_string();
        Ok(next)
    }
}
