use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::aggregate::{self, ChartData, Summary};
use super::filter::{self, FilterState};
use super::zone::DisplayZone;
use crate::store::{FeedStatus, StoreState};

/// Everything the page needs for one (snapshot, filter) pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub status: FeedStatus,
    pub version: u64,
    pub updated_at: Option<DateTime<Utc>>,
    pub filter: FilterState,
    pub summary: Summary,
    pub course_chart: ChartData,
    pub time_chart: ChartData,
    pub chart_options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub pie: Value,
    pub bar: Value,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            pie: aggregate::pie_options(),
            bar: aggregate::bar_options(),
        }
    }
}

impl DashboardView {
    pub fn build(state: &StoreState, filter: &FilterState, zone: &DisplayZone) -> Self {
        let filtered = filter::apply(state.records.iter(), filter, zone);
        Self {
            status: state.status.clone(),
            version: state.version,
            updated_at: state.updated_at,
            filter: filter.clone(),
            summary: aggregate::summarize(&filtered),
            course_chart: aggregate::by_course(&filtered),
            time_chart: aggregate::by_time(&filtered),
            chart_options: ChartOptions::default(),
        }
    }

    /// JSON for embedding in a `<script type="application/json">` block.
    pub fn to_embedded_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| "{}".to_string())
            .replace('<', "\\u003c")
    }
}
