//! Shared application state.
//!
//! Built once at startup and cloned into every handler. Hostname and process
//! start time are captured by `main` and passed in; nothing here is global.

use std::sync::Arc;

use hitcount_core::error::Result;
use hitcount_core::{CounterService, CounterStore, KvStore};

use crate::config::{ServerConfig, StoreBackend};
use crate::context::StartTime;
use crate::infra::{MemoryStore, RedisStore};
use crate::obs::ServerMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    counter: CounterService,
    hostname: String,
    started: StartTime,
    metrics: ServerMetrics,
}

impl AppState {
    /// Build state around an explicit store.
    pub fn new(cfg: ServerConfig, store: Arc<dyn KvStore>, hostname: String, started: StartTime) -> Self {
        let counter = CounterService::new(CounterStore::new(store), cfg.counter.mode);
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                counter,
                hostname,
                started,
                metrics: ServerMetrics::default(),
            }),
        }
    }

    /// Build state with the store backend named by the config.
    /// The Redis backend does not connect here; the first count does.
    pub fn from_config(cfg: ServerConfig, hostname: String, started: StartTime) -> Result<Self> {
        let store: Arc<dyn KvStore> = match cfg.store.backend {
            StoreBackend::Redis => Arc::new(RedisStore::new(&cfg.store.redis_url(), cfg.store.timeout())?),
            StoreBackend::Memory => {
                tracing::warn!("memory store selected; the counter is not shared between replicas");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::new(cfg, store, hostname, started))
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn counter(&self) -> &CounterService {
        &self.inner.counter
    }

    pub fn hostname(&self) -> &str {
        &self.inner.hostname
    }

    pub fn started(&self) -> StartTime {
        self.inner.started
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.inner.metrics
    }
}
