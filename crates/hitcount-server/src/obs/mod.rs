//! Lightweight in-process metrics.
//!
//! Stored as atomics and rendered in Prometheus text format by `/metrics`.
//! Values are per replica; the shared counter itself lives in the store.

pub mod metrics;

pub use metrics::ServerMetrics;
