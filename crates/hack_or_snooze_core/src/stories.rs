//! crates/hack_or_snooze_core/src/stories.rs
//!
//! Data-access operations for single stories and the global feed.

use crate::domain::{Story, StoryDraft, StoryList, User};
use crate::ports::{PortResult, StoryApi};
use tracing::{debug, info};

impl Story {
    /// Fetches one story by identifier. Errors propagate unchanged; there is no retry.
    pub async fn fetch_by_id(api: &dyn StoryApi, story_id: &str) -> PortResult<Story> {
        debug!(story_id, "Fetching story");
        api.get_story(story_id).await
    }
}

impl StoryList {
    /// Fetches the full feed, keeping the order the backend returned it in.
    pub async fn fetch_all(api: &dyn StoryApi) -> PortResult<Self> {
        let stories = api.list_stories().await?;
        info!(count = stories.len(), "Fetched story feed");
        Ok(Self::new(stories))
    }

    /// Submits a story as `user` and, once the backend confirms, puts it at the
    /// front of this list and of the user's own stories.
    ///
    /// Nothing local changes when the request fails.
    pub async fn add_story(
        &mut self,
        api: &dyn StoryApi,
        user: &mut User,
        draft: &StoryDraft,
    ) -> PortResult<Story> {
        let story = api.create_story(user.login_token(), draft).await?;
        info!(story_id = story.story_id(), username = user.username(), "Story created");

        self.prepend(story.clone());
        user.prepend_own_story(story.clone());
        Ok(story)
    }

    /// Deletes one of the user's stories on the backend, then drops every local
    /// copy of it: from this list, the user's own stories and their favorites.
    pub async fn remove_story(
        &mut self,
        api: &dyn StoryApi,
        user: &mut User,
        story_id: &str,
    ) -> PortResult<()> {
        api.delete_story(user.login_token(), story_id).await?;
        info!(story_id, username = user.username(), "Story deleted");

        self.remove(story_id);
        user.forget_story(story_id);
        Ok(())
    }
}
