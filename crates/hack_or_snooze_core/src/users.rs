//! crates/hack_or_snooze_core/src/users.rs
//!
//! Account and favorite operations for the authenticated user.

use crate::domain::{LoginToken, Story, User};
use crate::ports::{PortResult, StoryApi};
use tracing::{debug, info, warn};

impl User {
    /// Registers a new account and returns it logged in.
    pub async fn signup(
        api: &dyn StoryApi,
        username: &str,
        password: &str,
        name: &str,
    ) -> PortResult<User> {
        let auth = api.signup(username, password, name).await?;
        info!(username = %auth.profile.username, "Signed up");
        Ok(User::from_profile(auth.profile, auth.token))
    }

    pub async fn login(api: &dyn StoryApi, username: &str, password: &str) -> PortResult<User> {
        let auth = api.login(username, password).await?;
        info!(username = %auth.profile.username, "Logged in");
        Ok(User::from_profile(auth.profile, auth.token))
    }

    /// Best-effort login with a previously issued token.
    ///
    /// Any failure (expired token, unknown user, network) yields `None` instead of an error.
    pub async fn restore_session(
        api: &dyn StoryApi,
        token: LoginToken,
        username: &str,
    ) -> Option<User> {
        match api.get_user(username, &token).await {
            Ok(profile) => {
                info!(username, "Restored stored session");
                Some(User::from_profile(profile, token))
            }
            Err(e) => {
                warn!(username, error = %e, "Restoring stored session failed");
                None
            }
        }
    }

    /// Marks `story` as a favorite. The local list changes only after the backend confirms.
    pub async fn add_favorite(&mut self, api: &dyn StoryApi, story: &Story) -> PortResult<()> {
        api.add_favorite(self.username(), story.story_id(), self.login_token())
            .await?;
        debug!(story_id = story.story_id(), "Favorite added");
        self.prepend_favorite(story.clone());
        Ok(())
    }

    /// Unmarks `story`. The delete request is sent even when `story` is not in
    /// the local favorites; on success the first matching entry is removed.
    pub async fn remove_favorite(&mut self, api: &dyn StoryApi, story: &Story) -> PortResult<()> {
        api.remove_favorite(self.username(), story.story_id(), self.login_token())
            .await?;
        if !self.drop_favorite(story.story_id()) {
            debug!(story_id = story.story_id(), "Story was not a local favorite");
        }
        Ok(())
    }

    /// Flips the favorite state of `story` and returns the new state.
    pub async fn toggle_favorite(&mut self, api: &dyn StoryApi, story: &Story) -> PortResult<bool> {
        if self.is_favorite(story.story_id()) {
            self.remove_favorite(api, story).await?;
            Ok(false)
        } else {
            self.add_favorite(api, story).await?;
            Ok(true)
        }
    }
}
