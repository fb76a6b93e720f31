use askama::Template;

use super::PageContext;

/// The root view. Child components arrive pre-rendered.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub filter_bar: String,
    pub stat_cards: Vec<String>,
    pub chart_cards: Vec<String>,
    /// `DashboardView` as JSON, already safe inside a script block.
    pub view_json: String,
}
