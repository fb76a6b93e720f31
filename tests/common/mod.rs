//! Shared fixtures for the integration tests.
//!
//! All tests run with a UTC display offset so "today" is the same for the
//! fixtures and the filter defaults.

#![allow(dead_code)]

use chrono::{FixedOffset, NaiveDate, Utc};
use serde_json::{Map, Value, json};

use attendance_dashboard::models::filter::{CourseFilter, FilterState};
use attendance_dashboard::models::zone::DisplayZone;
use attendance_dashboard::state::AppState;
use attendance_dashboard::store::RecordStore;

pub fn utc() -> DisplayZone {
    DisplayZone::Fixed(FixedOffset::east_opt(0).expect("zero offset"))
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Noon today in UTC, far from either midnight.
pub fn today_at_noon() -> String {
    format!("{}T12:00:00Z", today().format("%Y-%m-%d"))
}

pub fn record(course: &str, timings: &str, timestamp: &str) -> Value {
    json!({
        "course": course,
        "name": format!("student-{course}-{timings}"),
        "section": "A",
        "timings": timings,
        "timestamp": timestamp,
    })
}

/// Key records the way the feed does (opaque push ids).
pub fn snapshot(records: Vec<Value>) -> Value {
    let map: Map<String, Value> = records
        .into_iter()
        .enumerate()
        .map(|(i, r)| (format!("-Nx{i:04}"), r))
        .collect();
    Value::Object(map)
}

/// Three records dated today: Java, Java, iOS.
pub fn java_java_ios() -> Value {
    let ts = today_at_noon();
    snapshot(vec![
        record("Java", "9:00-10:00", &ts),
        record("Java", "10:00-11:00", &ts),
        record("iOS", "9:00-10:00", &ts),
    ])
}

pub fn filter_today(course: &str) -> FilterState {
    FilterState {
        date: today(),
        course: CourseFilter::from_param(Some(course)),
    }
}

pub fn app_state(store: &RecordStore) -> AppState {
    AppState::new(store.reader(), utc())
}
