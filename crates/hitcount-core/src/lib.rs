//! hitcount core: the counter increment protocol, its store seam, and the
//! shared error surface.
//!
//! This crate defines the read-increment-write sequence against a shared
//! key-value store and the failure policy around it. It carries no transport,
//! runtime, or network dependencies; concrete stores live in the server crate.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every store failure surfaces as `HitcountError`/`Result` so a bad store
//! never takes a serving process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;
pub mod store;

/// Shared result type.
pub use error::{HitcountError, Result};

pub use counter::{wire_count, CounterMode, CounterService, FAILED_SENTINEL};
pub use store::{CounterRead, CounterStore, KvStore, COUNTER_KEY};
