//! Process-wide context built once in `main` and carried by `AppState`.

pub mod clock;
pub mod host;

pub use clock::StartTime;
