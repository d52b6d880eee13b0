//! services/client/src/adapters/dto.rs
//!
//! Wire shapes of the Hack-or-Snooze REST API and their conversion into domain types.

use hack_or_snooze_core::domain::{Story, StoryDraft, UserProfile, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::warn;

fn present(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

//=========================================================================================
// "Impure" Response Records
//=========================================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    story_id: Option<String>,
    title: Option<String>,
    author: Option<String>,
    url: Option<String>,
    username: Option<String>,
    created_at: Option<String>,
}

impl StoryRecord {
    pub fn into_domain(self) -> Result<Story, ValidationError> {
        let created_at = present("createdAt", self.created_at)?;
        Story::try_new(
            present("storyId", self.story_id)?,
            present("title", self.title)?,
            present("author", self.author)?,
            present("url", self.url)?,
            present("username", self.username)?,
            &created_at,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    username: Option<String>,
    name: Option<String>,
    created_at: Option<String>,
    #[serde(default)]
    favorites: Vec<StoryRecord>,
    /// The backend calls a user's own stories `stories`.
    #[serde(default, alias = "ownStories")]
    stories: Vec<StoryRecord>,
}

impl UserRecord {
    pub fn into_domain(self) -> Result<UserProfile, ValidationError> {
        let created_at = present("createdAt", self.created_at)?;
        UserProfile::try_new(
            present("username", self.username)?,
            present("name", self.name)?,
            &created_at,
            stories_into_domain(self.favorites),
            stories_into_domain(self.stories),
        )
    }
}

/// Converts a list of records, skipping the ones that fail validation so a
/// single bad story does not hide the rest of the list.
pub fn stories_into_domain(records: Vec<StoryRecord>) -> Vec<Story> {
    records
        .into_iter()
        .filter_map(|record| {
            let story_id = record.story_id.clone();
            match record.into_domain() {
                Ok(story) => Some(story),
                Err(e) => {
                    warn!(story_id = ?story_id, error = %e, "Skipping invalid story record");
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct StoriesEnvelope {
    pub stories: Vec<StoryRecord>,
}

#[derive(Debug, Deserialize)]
pub struct StoryEnvelope {
    pub story: StoryRecord,
}

#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: UserRecord,
}

/// Signup and login answers: the profile plus the token issued for it.
#[derive(Debug, Deserialize)]
pub struct AuthEnvelope {
    pub user: UserRecord,
    pub token: Option<String>,
}

/// `{"error": {"status": 401, "title": "Unauthorized", "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    title: Option<String>,
}

/// Best available human-readable message from an error response body.
pub fn error_message(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message.or(envelope.error.title))
        .unwrap_or_else(|| fallback.to_string())
}

//=========================================================================================
// Request Payloads
//=========================================================================================

#[derive(Debug, Serialize)]
pub struct NewStoryPayload<'a> {
    pub author: &'a str,
    pub title: &'a str,
    pub url: &'a str,
}

impl<'a> From<&'a StoryDraft> for NewStoryPayload<'a> {
    fn from(draft: &'a StoryDraft) -> Self {
        Self {
            author: &draft.author,
            title: &draft.title,
            url: &draft.url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateStoryRequest<'a> {
    pub token: &'a str,
    pub story: NewStoryPayload<'a>,
}

#[derive(Debug, Serialize)]
pub struct TokenBody<'a> {
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignupUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `{"user": {...}}` wrapper shared by signup and login.
#[derive(Debug, Serialize)]
pub struct UserRequest<T> {
    pub user: T,
}
