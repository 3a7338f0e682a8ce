//! Error types for gstate operations.

use thiserror::Error;

/// Errors that can occur while configuring gstate.
///
/// Store reads and writes never fail; only by-name option updates and
/// configuration loading produce errors.
#[derive(Debug, Error)]
pub enum GlobalStateError {
    /// The option name is unknown, or the value does not fit the option.
    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: String, reason: String },

    /// The defaults configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error while reading a configuration file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for gstate operations.
pub type Result<T> = std::result::Result<T, GlobalStateError>;
