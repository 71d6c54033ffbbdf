//! Hugo content rendering: `+++`-fenced TOML front matter, then the body.

use serde::Serialize;

use crate::EntryError;
use crate::post::Post;

/// Front matter fence for TOML.
pub const FENCE: &str = "+++";

/// RFC 3339 with a `±HH:MM` offset, second precision.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Serialize)]
struct FrontMatter<'a> {
    date: String,
    draft: bool,
    title: &'a str,
    tags: &'a [String],
}

/// Render a post as the full text of its content file.
pub fn render(post: &Post) -> Result<String, EntryError> {
    let front = toml::to_string(&FrontMatter {
        date: post.date.format(DATE_FORMAT).to_string(),
        draft: post.draft,
        title: &post.title,
        tags: &post.tags,
    })?;

    Ok(format!("{FENCE}\n{front}{FENCE}\n{}\n", post.content))
}
