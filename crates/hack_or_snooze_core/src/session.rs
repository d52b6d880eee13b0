//! crates/hack_or_snooze_core/src/session.rs
//!
//! The explicit "who is logged in" value handed to every authenticated operation.

use crate::domain::User;
use crate::ports::{CredentialStore, PortError, PortResult, StoryApi};
use tracing::{info, warn};

/// Either nobody is logged in, or exactly one user with a live token is.
#[derive(Debug, Default)]
pub enum SessionContext {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    pub fn sign_in(&mut self, user: User) {
        *self = Self::Authenticated(user);
    }

    /// Returns the user that was logged in, if any.
    pub fn sign_out(&mut self) -> Option<User> {
        match std::mem::take(self) {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    pub fn user_mut(&mut self) -> Option<&mut User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    /// The logged-in user, or `PortError::Unauthorized`.
    pub fn require_user(&mut self) -> PortResult<&mut User> {
        self.user_mut().ok_or(PortError::Unauthorized)
    }

    /// Restores the session from stored credentials. Anything going wrong,
    /// including an unreadable store, leaves the session anonymous.
    pub async fn resume(api: &dyn StoryApi, store: &dyn CredentialStore) -> Self {
        let credentials = match store.load().await {
            Ok(Some(credentials)) => credentials,
            Ok(None) => return Self::Anonymous,
            Err(e) => {
                warn!(error = %e, "Could not read stored credentials");
                return Self::Anonymous;
            }
        };

        match User::restore_session(api, credentials.token, &credentials.username).await {
            Some(user) => Self::Authenticated(user),
            None => Self::Anonymous,
        }
    }

    /// Persists the current user's credentials so the next run can resume.
    pub async fn remember(&self, store: &dyn CredentialStore) -> PortResult<()> {
        if let Some(user) = self.user() {
            store.save(&user.credentials()).await?;
            info!(username = user.username(), "Stored session credentials");
        }
        Ok(())
    }

    /// Logs out: clears the stored credentials and discards the user.
    pub async fn logout(&mut self, store: &dyn CredentialStore) -> PortResult<Option<User>> {
        store.clear().await?;
        let user = self.sign_out();
        if let Some(user) = &user {
            info!(username = user.username(), "Logged out");
        }
        Ok(user)
    }
}
