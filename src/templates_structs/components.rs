//! Small presentational pieces composed by the dashboard page.

use askama::Template;

use crate::models::filter::{FilterState, course_options};

/// One dropdown entry.
pub struct CourseOption {
    pub value: String,
    pub selected: bool,
}

/// Date picker plus course dropdown. Holds no state of its own: it renders
/// whatever filter it is given and the browser submits changes back.
#[derive(Template)]
#[template(path = "components/filter_bar.html")]
pub struct FilterBar {
    pub action: String,
    pub selected_date: String,
    pub options: Vec<CourseOption>,
}

impl FilterBar {
    /// A course outside the fixed list is appended as an extra, selected entry
    /// so the dropdown shows the filter actually applied.
    pub fn new(action: &str, filter: &FilterState) -> Self {
        let selected = filter.course.as_str();
        let mut options: Vec<CourseOption> = course_options()
            .map(|value| CourseOption {
                value: value.to_string(),
                selected: value == selected,
            })
            .collect();
        if !options.iter().any(|o| o.selected) {
            options.push(CourseOption {
                value: selected.to_string(),
                selected: true,
            });
        }
        Self {
            action: action.to_string(),
            selected_date: filter.date_string(),
            options,
        }
    }
}

/// Titled panel around arbitrary, already-rendered content.
#[derive(Template)]
#[template(path = "components/card.html")]
pub struct DashboardCard {
    pub title: String,
    pub body: String,
}

impl DashboardCard {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Big number with a caption, used inside a card.
#[derive(Template)]
#[template(path = "components/stat.html")]
pub struct StatValue {
    /// Summary field this number mirrors, for live updates.
    pub key: &'static str,
    pub value: usize,
    pub caption: &'static str,
    pub tone: &'static str,
}

/// Canvas placeholder the page script draws a chart into.
#[derive(Template)]
#[template(path = "components/chart.html")]
pub struct ChartCanvas {
    pub canvas_id: &'static str,
    pub kind: &'static str,
}
