use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use serde_json::{Value, json};

use super::attendance::AttendanceRecord;
use super::filter::COURSES;

/// One color per course slice, parallel to `COURSES`.
pub const COURSE_PALETTE: [&str; 7] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#47B39C",
];

pub const TIME_BAR_COLOR: &str = "#4BC0C0";
pub const TIME_DATASET_LABEL: &str = "Attendance by Time";

/// Headline numbers for the stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_students: usize,
    /// Distinct courses among the filtered records, known or not.
    pub unique_courses: usize,
}

/// Chart.js `data` object: labels plus parallel datasets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<usize>,
    pub background_color: Palette,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Palette {
    Single(&'static str),
    PerSlice(Vec<&'static str>),
}

impl ChartData {
    /// Counts of the first dataset.
    pub fn counts(&self) -> &[usize] {
        self.datasets.first().map(|d| d.data.as_slice()).unwrap_or(&[])
    }
}

pub fn summarize(filtered: &[&AttendanceRecord]) -> Summary {
    let courses: HashSet<&str> = filtered.iter().map(|r| r.course.as_str()).collect();
    Summary {
        total_students: filtered.len(),
        unique_courses: courses.len(),
    }
}

/// Pie data: always the seven fixed courses in declared order. Unknown courses
/// are not charted.
pub fn by_course(filtered: &[&AttendanceRecord]) -> ChartData {
    let data: Vec<usize> = COURSES
        .iter()
        .map(|course| filtered.iter().filter(|r| r.course == *course).count())
        .collect();
    ChartData {
        labels: COURSES.iter().map(|c| c.to_string()).collect(),
        datasets: vec![Dataset {
            label: None,
            data,
            background_color: Palette::PerSlice(COURSE_PALETTE.to_vec()),
        }],
    }
}

/// Bar data: one bar per distinct `timings` value, sorted ascending.
pub fn by_time(filtered: &[&AttendanceRecord]) -> ChartData {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in filtered {
        *counts.entry(record.timings.as_str()).or_default() += 1;
    }
    let (labels, data): (Vec<String>, Vec<usize>) = counts
        .into_iter()
        .map(|(slot, n)| (slot.to_string(), n))
        .unzip();
    ChartData {
        labels,
        datasets: vec![Dataset {
            label: Some(TIME_DATASET_LABEL.to_string()),
            data,
            background_color: Palette::Single(TIME_BAR_COLOR),
        }],
    }
}

/// Static Chart.js options for the course pie.
pub fn pie_options() -> Value {
    json!({ "maintainAspectRatio": false })
}

/// Static Chart.js options for the time-slot bars.
pub fn bar_options() -> Value {
    json!({
        "maintainAspectRatio": false,
        "scales": {
            "y": {
                "beginAtZero": true,
                "ticks": { "stepSize": 1 }
            }
        }
    })
}
