//! services/client/src/cli.rs
//!
//! The `snooze` command line: argument definitions and the command dispatcher.
//! This is the UI layer that drives the core data-access operations and prints
//! their results.

use std::io::Write;

use clap::{Parser, Subcommand};
use hack_or_snooze_core::domain::{Story, StoryDraft, StoryList, User};
use hack_or_snooze_core::SessionContext;
use tracing::{error, info};

use crate::error::ClientError;
use crate::render::{stories_markup, story_line};
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "snooze", version, about = "Browse and share stories on Hack-or-Snooze")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the global story feed, newest first.
    Stories,
    /// Show a single story.
    Story { story_id: String },
    /// Create an account and log in.
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Log in and remember the session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show who is logged in.
    Whoami,
    /// Submit a new story.
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        url: String,
    },
    /// Delete one of your stories.
    Remove { story_id: String },
    /// Mark a story as a favorite.
    Favorite { story_id: String },
    /// Unmark a favorite story.
    Unfavorite { story_id: String },
    /// List your favorite stories.
    Favorites,
    /// List the stories you submitted.
    Mine,
    /// Print the feed (or your favorites) as HTML list markup.
    Html {
        #[arg(long)]
        favorites: bool,
    },
}

fn print_stories(
    out: &mut dyn Write,
    stories: &[Story],
    session: &SessionContext,
) -> Result<(), ClientError> {
    if stories.is_empty() {
        writeln!(out, "No stories here yet!")?;
    }
    for story in stories {
        let favorite = session.user().map(|u| u.is_favorite(story.story_id()));
        writeln!(out, "{}", story_line(story, favorite))?;
    }
    Ok(())
}

fn logged_in(session: &mut SessionContext) -> Result<&mut User, ClientError> {
    session.require_user().map_err(|_| ClientError::NotLoggedIn)
}

/// Runs one command and reports a failure once, through the log.
/// Returns whether the command succeeded.
pub async fn run_and_report(command: Command, state: &AppState, out: &mut dyn Write) -> bool {
    match run(command, state, out).await {
        Ok(()) => true,
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}

/// Runs one command. Commands other than signup/login start by restoring the
/// stored session, best effort.
pub async fn run(
    command: Command,
    state: &AppState,
    out: &mut dyn Write,
) -> Result<(), ClientError> {
    let api = state.api.as_ref();
    let store = state.credentials.as_ref();

    let mut session = match command {
        Command::Signup { .. } | Command::Login { .. } => SessionContext::anonymous(),
        _ => SessionContext::resume(api, store).await,
    };

    match command {
        Command::Stories => {
            let list = StoryList::fetch_all(api).await?;
            print_stories(out, list.stories(), &session)?;
        }
        Command::Story { story_id } => {
            let story = Story::fetch_by_id(api, &story_id).await?;
            let favorite = session.user().map(|u| u.is_favorite(story.story_id()));
            writeln!(out, "{}", story_line(&story, favorite))?;
            writeln!(out, "  {}", story.url())?;
            writeln!(out, "  submitted {}", story.created_at().to_rfc3339())?;
        }
        Command::Signup {
            username,
            password,
            name,
        } => {
            let user = User::signup(api, &username, &password, &name).await?;
            session.sign_in(user);
            session.remember(store).await?;
            writeln!(out, "Welcome, {}! You are logged in as {}.", name, username)?;
        }
        Command::Login { username, password } => {
            let user = User::login(api, &username, &password).await?;
            let greeting = format!("Logged in as {} ({}).", user.username(), user.name());
            session.sign_in(user);
            session.remember(store).await?;
            writeln!(out, "{}", greeting)?;
        }
        Command::Logout => match session.logout(store).await? {
            Some(user) => writeln!(out, "Logged out {}.", user.username())?,
            None => writeln!(out, "Nobody was logged in.")?,
        },
        Command::Whoami => match session.user() {
            Some(user) => writeln!(
                out,
                "{} ({}), member since {}, {} favorites, {} stories",
                user.username(),
                user.name(),
                user.created_at().format("%Y-%m-%d"),
                user.favorites().len(),
                user.own_stories().len()
            )?,
            None => writeln!(out, "Not logged in.")?,
        },
        Command::Submit { title, author, url } => {
            let draft = StoryDraft::new(title, author, url)?;
            let user = logged_in(&mut session)?;
            let mut list = StoryList::default();
            let story = list.add_story(api, user, &draft).await?;
            writeln!(out, "Submitted: {}", story_line(&story, Some(false)))?;
        }
        Command::Remove { story_id } => {
            let user = logged_in(&mut session)?;
            let mut list = StoryList::default();
            list.remove_story(api, user, &story_id).await?;
            writeln!(out, "Removed story {}.", story_id)?;
        }
        Command::Favorite { story_id } => {
            let user = logged_in(&mut session)?;
            let story = Story::fetch_by_id(api, &story_id).await?;
            user.add_favorite(api, &story).await?;
            writeln!(out, "{}", story_line(&story, Some(true)))?;
        }
        Command::Unfavorite { story_id } => {
            let user = logged_in(&mut session)?;
            let story = match user.favorites().iter().find(|s| s.story_id() == story_id) {
                Some(story) => story.clone(),
                None => Story::fetch_by_id(api, &story_id).await?,
            };
            user.remove_favorite(api, &story).await?;
            writeln!(out, "{}", story_line(&story, Some(false)))?;
        }
        Command::Favorites => {
            let stories = logged_in(&mut session)?.favorites().to_vec();
            print_stories(out, &stories, &session)?;
        }
        Command::Mine => {
            let stories = logged_in(&mut session)?.own_stories().to_vec();
            print_stories(out, &stories, &session)?;
        }
        Command::Html { favorites } => {
            let stories = if favorites {
                logged_in(&mut session)?.favorites().to_vec()
            } else {
                StoryList::fetch_all(api).await?.stories().to_vec()
            };
            let html = stories_markup(&stories, |s| {
                session.user().map(|u| u.is_favorite(s.story_id()))
            });
            writeln!(out, "{}", html)?;
        }
    }

    info!(authenticated = session.is_authenticated(), "Command finished");
    Ok(())
}
