//! services/client/src/adapters/http.rs
//!
//! This module contains the reqwest-backed adapter for the Hack-or-Snooze REST API.
//! It implements the `StoryApi` port from the `core` crate and owns transport
//! details only: URL building, request serialisation, status mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use hack_or_snooze_core::domain::{
    AuthenticatedProfile, LoginToken, Story, StoryDraft, UserProfile,
};
use hack_or_snooze_core::ports::{AuthError, PortError, PortResult, StoryApi};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::dto::{
    error_message, stories_into_domain, AuthEnvelope, CreateStoryRequest, LoginUser,
    SignupUser, StoriesEnvelope, StoryEnvelope, TokenBody, UserEnvelope, UserRequest,
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `StoryApi` port over HTTPS with JSON bodies.
#[derive(Clone)]
pub struct HttpStoryApi {
    client: Client,
    base_url: Url,
}

impl HttpStoryApi {
    /// Builds the adapter. `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> PortResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                PortError::Unexpected(format!("Base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends one request (no retry) and returns the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, Failure> {
        let response = request
            .send()
            .await
            .map_err(|e| Failure::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Failure::Transport(e.to_string()))?;

        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("request failed");
            let message = error_message(body.as_ref(), fallback);
            warn!(status = status.as_u16(), %message, "Backend rejected request");
            return Err(Failure::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Failure> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(|e| Failure::Decode(e.to_string()))
    }

    async fn authenticate<T: serde::Serialize + Send + Sync>(
        &self,
        path: &str,
        payload: &UserRequest<T>,
    ) -> PortResult<AuthenticatedProfile> {
        let url = self.endpoint(&[path])?;
        debug!(%url, "POST");
        let envelope: AuthEnvelope = self
            .fetch(self.client.post(url).json(payload))
            .await
            .map_err(auth_failure)?;

        let token = envelope
            .token
            .ok_or_else(|| PortError::Unexpected("Response carried no token".to_string()))?;
        Ok(AuthenticatedProfile {
            profile: envelope.user.into_domain()?,
            token: LoginToken::new(token),
        })
    }
}

//=========================================================================================
// Failure Mapping
//=========================================================================================

/// What went wrong with a single HTTP exchange, before it is given port meaning.
#[derive(Debug)]
enum Failure {
    Transport(String),
    Status { status: u16, message: String },
    Decode(String),
}

/// Any non-2xx keeps the status and the backend's message.
fn api_failure(failure: Failure) -> PortError {
    match failure {
        Failure::Status { status, message } => PortError::Api { status, message },
        Failure::Transport(e) => PortError::Unexpected(format!("Transport error: {}", e)),
        Failure::Decode(e) => PortError::Unexpected(format!("Malformed response: {}", e)),
    }
}

/// Signup/login failures: credential rejection and request validation become `AuthError`.
fn auth_failure(failure: Failure) -> PortError {
    match failure {
        Failure::Status {
            status: 401 | 404,
            message,
        } => AuthError::InvalidCredentials(message).into(),
        Failure::Status {
            status: status @ (400 | 403 | 409 | 422),
            message,
        } => AuthError::Rejected { status, message }.into(),
        other => api_failure(other),
    }
}

//=========================================================================================
// `StoryApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl StoryApi for HttpStoryApi {
    async fn list_stories(&self) -> PortResult<Vec<Story>> {
        let url = self.endpoint(&["stories"])?;
        debug!(%url, "GET");
        let envelope: StoriesEnvelope = self
            .fetch(self.client.get(url))
            .await
            .map_err(api_failure)?;
        Ok(stories_into_domain(envelope.stories))
    }

    async fn get_story(&self, story_id: &str) -> PortResult<Story> {
        let url = self.endpoint(&["stories", story_id])?;
        debug!(%url, "GET");
        let envelope: StoryEnvelope = self
            .fetch(self.client.get(url))
            .await
            .map_err(api_failure)?;
        Ok(envelope.story.into_domain()?)
    }

    async fn create_story(&self, token: &LoginToken, draft: &StoryDraft) -> PortResult<Story> {
        let url = self.endpoint(&["stories"])?;
        debug!(%url, "POST");
        let payload = CreateStoryRequest {
            token: token.as_str(),
            story: draft.into(),
        };
        let envelope: StoryEnvelope = self
            .fetch(self.client.post(url).json(&payload))
            .await
            .map_err(api_failure)?;
        Ok(envelope.story.into_domain()?)
    }

    async fn delete_story(&self, token: &LoginToken, story_id: &str) -> PortResult<()> {
        let url = self.endpoint(&["stories", story_id])?;
        debug!(%url, "DELETE");
        let payload = TokenBody {
            token: token.as_str(),
        };
        self.execute(self.client.delete(url).json(&payload))
            .await
            .map_err(api_failure)?;
        Ok(())
    }

    async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> PortResult<AuthenticatedProfile> {
        let payload = UserRequest {
            user: SignupUser {
                username,
                password,
                name,
            },
        };
        self.authenticate("signup", &payload).await
    }

    async fn login(&self, username: &str, password: &str) -> PortResult<AuthenticatedProfile> {
        let payload = UserRequest {
            user: LoginUser { username, password },
        };
        self.authenticate("login", &payload).await
    }

    async fn get_user(&self, username: &str, token: &LoginToken) -> PortResult<UserProfile> {
        let url = self.endpoint(&["users", username])?;
        debug!(%url, "GET");
        let envelope: UserEnvelope = self
            .fetch(self.client.get(url).query(&[("token", token.as_str())]))
            .await
            .map_err(api_failure)?;
        Ok(envelope.user.into_domain()?)
    }

    async fn add_favorite(
        &self,
        username: &str,
        story_id: &str,
        token: &LoginToken,
    ) -> PortResult<()> {
        let url = self.endpoint(&["users", username, "favorites", story_id])?;
        debug!(%url, "POST");
        let payload = TokenBody {
            token: token.as_str(),
        };
        self.execute(self.client.post(url).json(&payload))
            .await
            .map_err(api_failure)?;
        Ok(())
    }

    async fn remove_favorite(
        &self,
        username: &str,
        story_id: &str,
        token: &LoginToken,
    ) -> PortResult<()> {
        let url = self.endpoint(&["users", username, "favorites", story_id])?;
        debug!(%url, "DELETE");
        let payload = TokenBody {
            token: token.as_str(),
        };
        self.execute(self.client.delete(url).json(&payload))
            .await
            .map_err(api_failure)?;
        Ok(())
    }
}
