//! hitcount server library entry.
//!
//! Wires config, store backends, the counter service, and the HTTP surface
//! into one stateless replica. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod handlers;
pub mod infra;
pub mod obs;
pub mod ops;
pub mod render;
pub mod router;

/// Build identifier reported by `/version`.
pub const VERSION: &str = match option_env!("HITCOUNT_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
