//! Server config loader (environment variables, strict parsing).
//!
//! Every value is read once at startup. Empty variables count as unset, and
//! any value that does not parse is a `HitcountError::Config`, which the
//! binary treats as fatal.

pub mod schema;

use std::collections::HashMap;

use hitcount_core::Result;

pub use schema::{CounterSection, ServerConfig, ServerSection, StoreBackend, StoreSection};

pub fn load_from_env() -> Result<ServerConfig> {
    load_from_vars(std::env::vars())
}

pub fn load_from_vars<I, K, V>(vars: I) -> Result<ServerConfig>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .filter(|(_, v)| !v.is_empty())
        .collect();
    let cfg = ServerConfig::from_vars(&vars)?;
    cfg.validate()?;
    Ok(cfg)
}
