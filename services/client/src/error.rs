//! services/client/src/error.rs
//!
//! Defines the primary error type for the client service.

use crate::config::ConfigError;
use hack_or_snooze_core::ports::PortError;
use hack_or_snooze_core::ValidationError;

/// The primary error type for the `client` service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("{0}")]
    Port(#[from] PortError),

    /// User input that does not make a valid story or account.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Represents an error building the underlying HTTP client.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., writing the credentials file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The command needs a logged-in user and there is none.
    #[error("Not logged in. Run `snooze login` or `snooze signup` first.")]
    NotLoggedIn,
}
