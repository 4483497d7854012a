//! Error types for Pokedex.
//!
//! The response cache never fails, so everything here belongs to the
//! client and the REPL that sit around it.

use thiserror::Error;

/// Result type alias using `PokedexError`.
pub type Result<T> = std::result::Result<T, PokedexError>;

/// Main error type for all Pokedex operations.
#[derive(Debug, Error)]
pub enum PokedexError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Connection timeout.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    /// Server answered with a non-success status.
    #[error("Received status {status} from {url}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A base or pagination URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // PAGINATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// `mapb` called while already on the first page.
    #[error("You're on the first page")]
    FirstPage,

    /// `map` called after the last page.
    #[error("You're on the last page")]
    NoMorePages,

    // ═══════════════════════════════════════════════════════════════════════════
    // COMMAND ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Command name not in the command table.
    #[error("Unknown command: {0}. Type 'help' for usage")]
    UnknownCommand(String),

    /// Command invoked without its required argument.
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        /// Command name
        command: &'static str,
        /// Name of the missing argument
        argument: &'static str,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // ENVIRONMENT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Terminal I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PokedexError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        match self {
            PokedexError::HttpError(_) | PokedexError::ConnectionTimeout(_) => true,
            PokedexError::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if this error came from user input rather than the network.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            PokedexError::UnknownCommand(_)
                | PokedexError::MissingArgument { .. }
                | PokedexError::FirstPage
                | PokedexError::NoMorePages
        )
    }
}
