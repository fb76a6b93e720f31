use askama::Template;

use super::PageContext;

/// Full-page replacement shown while the feed is in the error state.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub message: String,
}
