//! services/client/src/state.rs
//!
//! Defines the application's shared state: the ports every command runs against.

use crate::adapters::{FileCredentialStore, HttpStoryApi};
use crate::config::Config;
use crate::error::ClientError;
use hack_or_snooze_core::ports::{CredentialStore, StoryApi};
use std::sync::Arc;

/// Created once at startup and passed to every command.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn StoryApi>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    /// Wires the HTTP adapter and the file-backed credential store from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let api = HttpStoryApi::new(config.base_url.clone(), config.request_timeout)?;
        let credentials = FileCredentialStore::new(config.credentials_path.clone());
        Ok(Self {
            api: Arc::new(api),
            credentials: Arc::new(credentials),
        })
    }
}
