//! services/client/src/adapters/credentials.rs
//!
//! A `CredentialStore` that keeps the username and token in a small JSON file,
//! playing the role browser local storage plays for the web front-end.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use hack_or_snooze_core::domain::{LoginToken, StoredCredentials};
use hack_or_snooze_core::ports::{CredentialStore, PortError, PortResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize, Deserialize)]
struct CredentialsFile {
    username: String,
    token: String,
}

/// Stores credentials at a fixed path. A missing file means "nothing stored".
#[derive(Clone, Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> PortError {
        PortError::Unexpected(format!(
            "Failed to {} credentials at {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> PortResult<Option<StoredCredentials>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error("read", e)),
        };
        let file: CredentialsFile = serde_json::from_slice(&raw).map_err(|e| {
            PortError::Unexpected(format!(
                "Credentials file {} is corrupt: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(StoredCredentials {
            username: file.username,
            token: LoginToken::new(file.token),
        }))
    }

    async fn save(&self, credentials: &StoredCredentials) -> PortResult<()> {
        let file = CredentialsFile {
            username: credentials.username.clone(),
            token: credentials.token.as_str().to_string(),
        };
        let raw = serde_json::to_vec_pretty(&file)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("create directory for", e))?;
        }
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| self.io_error("write", e))?;
        debug!(path = %self.path.display(), "Credentials saved");
        Ok(())
    }

    async fn clear(&self) -> PortResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error("remove", e)),
        }
    }
}
