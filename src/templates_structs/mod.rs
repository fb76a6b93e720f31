// Template context structures for Askama templates, organized by page.

mod api;
mod common;
mod components;
mod dashboard;

pub use self::api::{ApiRecordsResponse, SnapshotMessage};
pub use self::common::ErrorTemplate;
pub use self::components::{ChartCanvas, CourseOption, DashboardCard, FilterBar, StatValue};
pub use self::dashboard::DashboardTemplate;

/// Fixed page title shown in the header and `<title>`.
pub const APP_TITLE: &str = "Attendance Analytics Dashboard";

/// Common context shared by all pages.
pub struct PageContext {
    pub app_name: String,
}

impl PageContext {
    pub fn build() -> Self {
        Self {
            app_name: APP_TITLE.to_string(),
        }
    }
}
