//! Error types
//!
//! Static-serving failures never leave the component that produced them: they
//! are turned into 404 responses on the spot. Handler faults are boxed so any
//! external handler can report its own error type.

use thiserror::Error;

/// Error returned by an external API handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to load a static asset.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AssetError {
    /// Missing, unreadable, or not a regular file. Causes are not distinguished.
    #[error("asset not found")]
    NotFound,

    /// The request path resolved to a location outside the base directory.
    #[error("asset path escapes base directory")]
    OutsideBase,
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        source: std::net::AddrParseError,
    },
}

/// Errors that stop the server process.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
