//! services/client/src/render.rs
//!
//! Turns stories into list markup (HTML) and into one-line terminal entries.
//!
//! There is a single renderer per output format. Favorite decoration is driven
//! by an `Option<bool>`: `None` when nobody is logged in (no star at all),
//! `Some(is_favorite)` otherwise.

use hack_or_snooze_core::domain::Story;

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A story whose URL has no host still renders, with an empty host.
fn host_or_blank(story: &Story) -> String {
    story.host_name().unwrap_or_default()
}

/// Markup for one `<li>` entry of a story list.
pub fn story_markup(story: &Story, favorite: Option<bool>) -> String {
    let star = match favorite {
        Some(true) => "\n  <span class=\"star\"><i class=\"fas fa-star\"></i></span>",
        Some(false) => "\n  <span class=\"star\"><i class=\"far fa-star\"></i></span>",
        None => "",
    };
    format!(
        "<li id=\"{id}\">{star}\n  <a href=\"{url}\" target=\"a_blank\" class=\"story-link\">{title}</a>\n  <small class=\"story-hostname\">({host})</small>\n  <small class=\"story-author\">by {author}</small>\n  <small class=\"story-user\">posted by {user}</small>\n</li>",
        id = escape_html(story.story_id()),
        url = escape_html(story.url()),
        title = escape_html(story.title()),
        host = escape_html(&host_or_blank(story)),
        author = escape_html(story.author()),
        user = escape_html(story.username()),
    )
}

/// Markup for a whole `<ol>` of stories; `favorite` decides each entry's star.
pub fn stories_markup<'a>(
    stories: impl IntoIterator<Item = &'a Story>,
    favorite: impl Fn(&Story) -> Option<bool>,
) -> String {
    let mut out = String::from("<ol id=\"all-stories-list\" class=\"stories-list\">\n");
    let mut empty = true;
    for story in stories {
        empty = false;
        out.push_str(&story_markup(story, favorite(story)));
        out.push('\n');
    }
    if empty {
        out.push_str("<h5>No stories here yet!</h5>\n");
    }
    out.push_str("</ol>");
    out
}

/// One terminal line: `★ Title (host) by author, posted by user [id]`.
pub fn story_line(story: &Story, favorite: Option<bool>) -> String {
    let star = match favorite {
        Some(true) => "★ ",
        Some(false) => "☆ ",
        None => "",
    };
    format!(
        "{star}{title} ({host}) by {author}, posted by {user} [{id}]",
        title = story.title(),
        host = host_or_blank(story),
        author = story.author(),
        user = story.username(),
        id = story.story_id(),
    )
}
