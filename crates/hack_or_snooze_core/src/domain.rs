//! crates/hack_or_snooze_core/src/domain.rs
//!
//! Defines the pure, core data structures for the client.
//! These structs are independent of the HTTP transport and of any serialization format.
//! Every record coming from the backend passes through one of the validating
//! constructors below before the rest of the crate sees it.

use chrono::{DateTime, Utc};
use std::fmt;
use url::Url;

//=========================================================================================
// Construction Errors
//=========================================================================================

/// Raised when a record is missing a required field or carries an unusable value.
/// Free-text fields may be empty; identifiers may not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),
    #[error("Invalid timestamp in `{field}`: '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },
    #[error("Invalid URL in `{field}`: {reason}")]
    InvalidUrl { field: &'static str, reason: String },
}

/// Raised when a story URL cannot be reduced to a host name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlParseError {
    #[error("Malformed story URL '{url}': {reason}")]
    Malformed { url: String, reason: String },
    #[error("Story URL '{0}' has no host")]
    MissingHost(String),
}

fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

fn timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

fn host_of(raw: &str) -> Result<String, UrlParseError> {
    let parsed = Url::parse(raw).map_err(|e| UrlParseError::Malformed {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| UrlParseError::MissingHost(raw.to_string()))
}

//=========================================================================================
// Story
//=========================================================================================

/// A single submitted link. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    story_id: String,
    title: String,
    author: String,
    url: String,
    username: String,
    created_at: DateTime<Utc>,
}

impl Story {
    /// Builds a story from a backend record. Only a blank `storyId` or a
    /// timestamp that is not RFC 3339 is rejected; text fields are taken as sent.
    pub fn try_new(
        story_id: String,
        title: String,
        author: String,
        url: String,
        username: String,
        created_at: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            story_id: required("storyId", story_id)?,
            title,
            author,
            url,
            username,
            created_at: timestamp("createdAt", created_at)?,
        })
    }

    pub fn story_id(&self) -> &str {
        &self.story_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The submitter's username.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the host component of the story URL, without scheme, port or path.
    pub fn host_name(&self) -> Result<String, UrlParseError> {
        host_of(&self.url)
    }
}

/// The fields a user fills in when submitting a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    pub title: String,
    pub author: String,
    pub url: String,
}

impl StoryDraft {
    pub fn new(title: String, author: String, url: String) -> Result<Self, ValidationError> {
        let url = required("url", url)?;
        host_of(&url).map_err(|e| ValidationError::InvalidUrl {
            field: "url",
            reason: e.to_string(),
        })?;
        Ok(Self {
            title: required("title", title)?,
            author: required("author", author)?,
            url,
        })
    }
}

//=========================================================================================
// StoryList
//=========================================================================================

/// The global feed, in display order: server order on fetch, newest additions first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryList {
    stories: Vec<Story>,
}

impl StoryList {
    pub fn new(stories: Vec<Story>) -> Self {
        Self { stories }
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn find(&self, story_id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.story_id == story_id)
    }

    pub(crate) fn prepend(&mut self, story: Story) {
        self.stories.insert(0, story);
    }

    pub(crate) fn remove(&mut self, story_id: &str) -> Option<Story> {
        let index = self.stories.iter().position(|s| s.story_id == story_id)?;
        Some(self.stories.remove(index))
    }
}

//=========================================================================================
// Users and Credentials
//=========================================================================================

/// Opaque session credential issued by signup or login.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginToken(String);

impl LoginToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LoginToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoginToken(<redacted>)")
    }
}

/// What is kept between runs to log back in without a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub username: String,
    pub token: LoginToken,
}

/// A user's profile as the backend reports it, without the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub favorites: Vec<Story>,
    pub own_stories: Vec<Story>,
}

impl UserProfile {
    pub fn try_new(
        username: String,
        name: String,
        created_at: &str,
        favorites: Vec<Story>,
        own_stories: Vec<Story>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: required("username", username)?,
            name,
            created_at: timestamp("createdAt", created_at)?,
            favorites,
            own_stories,
        })
    }
}

/// A profile paired with the token issued alongside it by signup or login.
#[derive(Debug, Clone)]
pub struct AuthenticatedProfile {
    pub profile: UserProfile,
    pub token: LoginToken,
}

/// The currently authenticated user. `favorites` and `own_stories` are local
/// copies of server state and only change through the operations in `users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    name: String,
    created_at: DateTime<Utc>,
    favorites: Vec<Story>,
    own_stories: Vec<Story>,
    login_token: LoginToken,
}

impl User {
    pub fn from_profile(profile: UserProfile, login_token: LoginToken) -> Self {
        Self {
            username: profile.username,
            name: profile.name,
            created_at: profile.created_at,
            favorites: profile.favorites,
            own_stories: profile.own_stories,
            login_token,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn favorites(&self) -> &[Story] {
        &self.favorites
    }

    pub fn own_stories(&self) -> &[Story] {
        &self.own_stories
    }

    pub fn login_token(&self) -> &LoginToken {
        &self.login_token
    }

    pub fn is_favorite(&self, story_id: &str) -> bool {
        self.favorites.iter().any(|s| s.story_id == story_id)
    }

    pub fn credentials(&self) -> StoredCredentials {
        StoredCredentials {
            username: self.username.clone(),
            token: self.login_token.clone(),
        }
    }

    pub(crate) fn prepend_favorite(&mut self, story: Story) {
        self.favorites.insert(0, story);
    }

    /// Drops the first favorite with this id. Returns whether one was found.
    pub(crate) fn drop_favorite(&mut self, story_id: &str) -> bool {
        match self.favorites.iter().position(|s| s.story_id == story_id) {
            Some(index) => {
                self.favorites.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn prepend_own_story(&mut self, story: Story) {
        self.own_stories.insert(0, story);
    }

    /// Forgets every local copy of a story that no longer exists on the server.
    pub(crate) fn forget_story(&mut self, story_id: &str) {
        self.own_stories.retain(|s| s.story_id != story_id);
        self.favorites.retain(|s| s.story_id != story_id);
    }
}
