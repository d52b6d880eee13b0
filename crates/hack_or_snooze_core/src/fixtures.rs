//! Shared builders for unit tests.

use crate::domain::{AuthenticatedProfile, LoginToken, Story, User, UserProfile};

pub fn story(id: &str) -> Story {
    Story::try_new(
        id.to_string(),
        format!("Story {id}"),
        "Ada Lovelace".to_string(),
        format!("https://example.com/{id}"),
        "ada".to_string(),
        "2021-03-04T05:06:07.890Z",
    )
    .unwrap()
}

pub fn profile(username: &str) -> UserProfile {
    UserProfile::try_new(
        username.to_string(),
        "Test User".to_string(),
        "2021-01-01T00:00:00Z",
        vec![],
        vec![],
    )
    .unwrap()
}

pub fn authenticated(username: &str, token: &str) -> AuthenticatedProfile {
    AuthenticatedProfile {
        profile: profile(username),
        token: LoginToken::new(token),
    }
}

pub fn user(username: &str) -> User {
    User::from_profile(profile(username), LoginToken::new("token-123"))
}
