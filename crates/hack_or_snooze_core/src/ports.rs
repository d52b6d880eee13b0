//! crates/hack_or_snooze_core/src/ports.rs
//!
//! Defines the service contracts (traits) the data-access operations are written against.
//! These traits keep the core independent of the HTTP client and of where
//! credentials are persisted between runs.

use crate::domain::{
    AuthenticatedProfile, LoginToken, Story, StoryDraft, StoredCredentials, UserProfile,
    ValidationError,
};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// Credential rejection during signup or login.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The backend did not recognise the username/password pair.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    /// The request itself was refused, e.g. a taken username or a missing field.
    #[error("Rejected by the server ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// A non-2xx response from the backend.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
    /// The backend answered with a record that does not hold together.
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),
    /// An operation that needs a logged-in user was attempted anonymously.
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The Hack-or-Snooze REST backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryApi: Send + Sync {
    // --- Stories ---
    async fn list_stories(&self) -> PortResult<Vec<Story>>;

    async fn get_story(&self, story_id: &str) -> PortResult<Story>;

    async fn create_story(&self, token: &LoginToken, draft: &StoryDraft) -> PortResult<Story>;

    async fn delete_story(&self, token: &LoginToken, story_id: &str) -> PortResult<()>;

    // --- Accounts ---
    async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> PortResult<AuthenticatedProfile>;

    async fn login(&self, username: &str, password: &str) -> PortResult<AuthenticatedProfile>;

    async fn get_user(&self, username: &str, token: &LoginToken) -> PortResult<UserProfile>;

    // --- Favorites ---
    async fn add_favorite(
        &self,
        username: &str,
        story_id: &str,
        token: &LoginToken,
    ) -> PortResult<()>;

    async fn remove_favorite(
        &self,
        username: &str,
        story_id: &str,
        token: &LoginToken,
    ) -> PortResult<()>;
}

/// Somewhere to keep the session credentials between runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns `None` when nothing has been stored yet.
    async fn load(&self) -> PortResult<Option<StoredCredentials>>;

    async fn save(&self, credentials: &StoredCredentials) -> PortResult<()>;

    async fn clear(&self) -> PortResult<()>;
}
