pub mod domain;
pub mod ports;
pub mod session;
pub mod stories;
pub mod users;

#[cfg(test)]
mod fixtures;

pub use domain::{
    AuthenticatedProfile, LoginToken, Story, StoryDraft, StoryList, StoredCredentials,
    UrlParseError, User, UserProfile, ValidationError,
};
pub use ports::{AuthError, CredentialStore, PortError, PortResult, StoryApi};
pub use session::SessionContext;
