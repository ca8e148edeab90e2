//! Shared error type across hitcount crates.

use thiserror::Error;

/// Stable error codes used in logs and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Store unreachable or timed out.
    StoreUnavailable,
    /// Store answered with something the counter cannot use.
    StoreProtocol,
    /// Invalid startup configuration.
    Config,
}

impl ClientCode {
    /// String representation used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::StoreProtocol => "STORE_PROTOCOL",
            ClientCode::Config => "CONFIG",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HitcountError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum HitcountError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("store protocol error: {0}")]
    StoreProtocol(String),
    #[error("config error: {0}")]
    Config(String),
}

impl HitcountError {
    /// Map an error to its stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HitcountError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            HitcountError::StoreProtocol(_) => ClientCode::StoreProtocol,
            HitcountError::Config(_) => ClientCode::Config,
        }
    }
}
