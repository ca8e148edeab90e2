use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use hitcount_core::error::{HitcountError, Result};
use hitcount_core::CounterMode;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub store: StoreSection,
    pub counter: CounterSection,
}

impl ServerConfig {
    pub(crate) fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            server: ServerSection {
                port: parse_or(vars, "PORT", default_port())?,
                slow_start_secs: parse_or(vars, "SLOW_START", 0i64)?,
                extra_text: vars.get("EXTRA_TEXT").cloned(),
            },
            store: StoreSection {
                backend: parse_or(vars, "STORE_BACKEND", StoreBackend::Redis)?,
                host: vars
                    .get("REDIS")
                    .cloned()
                    .unwrap_or_else(default_redis_host),
                port: parse_or(vars, "REDIS_PORT", default_redis_port())?,
                timeout_ms: parse_or(vars, "STORE_TIMEOUT_MS", default_store_timeout_ms())?,
            },
            counter: CounterSection {
                mode: parse_or(vars, "COUNTER_MODE", CounterMode::default())?,
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ServerSection {
    pub port: u16,
    /// Negative values mean no delay.
    pub slow_start_secs: i64,
    pub extra_text: Option<String>,
}

impl ServerSection {
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn slow_start(&self) -> Duration {
        Duration::from_secs(self.slow_start_secs.max(0).unsigned_abs())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Redis => f.write_str("redis"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = HitcountError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(HitcountError::Config(format!(
                "unknown store backend {other:?} (expected redis or memory)"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreSection {
    pub backend: StoreBackend,
    pub host: String,
    pub port: u16,
    pub timeout_ms: u64,
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StoreBackend::Redis && self.host.trim().is_empty() {
            return Err(HitcountError::Config("REDIS must not be blank".into()));
        }
        if !(1..=60_000).contains(&self.timeout_ms) {
            return Err(HitcountError::Config(
                "STORE_TIMEOUT_MS must be between 1 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone)]
pub struct CounterSection {
    pub mode: CounterMode,
}

fn parse_or<T>(vars: &HashMap<String, String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match vars.get(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| {
            HitcountError::Config(format!("cannot parse {name} value {raw:?}: {e}"))
        }),
    }
}

fn default_port() -> u16 {
    80
}
fn default_redis_host() -> String {
    "127.0.0.1".into()
}
fn default_redis_port() -> u16 {
    6379
}
fn default_store_timeout_ms() -> u64 {
    2000
}
