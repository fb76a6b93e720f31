use chrono::NaiveDate;
use serde::Serialize;

use super::attendance::AttendanceRecord;
use super::zone::DisplayZone;

/// Dropdown value meaning "no course filter".
pub const ALL_COURSES: &str = "All Courses";

/// The fixed course list, in chart order.
pub const COURSES: [&str; 7] = [
    "Android",
    "Patterns",
    "GDP-1",
    "Java",
    "iOS",
    "Web Applications",
    "ADB",
];

/// Date format used by the date input and for comparisons.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The eight dropdown entries: the sentinel followed by the courses.
pub fn course_options() -> impl Iterator<Item = &'static str> {
    std::iter::once(ALL_COURSES).chain(COURSES)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CourseFilter {
    #[default]
    All,
    Course(String),
}

impl CourseFilter {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(ALL_COURSES) => CourseFilter::All,
            Some(course) => CourseFilter::Course(course.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CourseFilter::All => ALL_COURSES,
            CourseFilter::Course(c) => c,
        }
    }

    /// Exact, case-sensitive match.
    pub fn matches(&self, course: &str) -> bool {
        match self {
            CourseFilter::All => true,
            CourseFilter::Course(c) => c == course,
        }
    }
}

impl Serialize for CourseFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Current filter selection. Owned by the page, changed only through the filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterState {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub course: CourseFilter,
}

fn serialize_date<S: serde::Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}

impl FilterState {
    /// Today in `zone`, all courses.
    pub fn today(zone: &DisplayZone) -> Self {
        Self {
            date: zone.today(),
            course: CourseFilter::All,
        }
    }

    /// Strict parse of query parameters. A missing or empty date means today.
    pub fn from_params(
        date: Option<&str>,
        course: Option<&str>,
        zone: &DisplayZone,
    ) -> Result<Self, chrono::ParseError> {
        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)?,
            None => zone.today(),
        };
        Ok(Self {
            date,
            course: CourseFilter::from_param(course),
        })
    }

    /// Like `from_params`, but an unreadable date falls back to today.
    pub fn lenient(date: Option<&str>, course: Option<&str>, zone: &DisplayZone) -> Self {
        Self::from_params(date, course, zone).unwrap_or_else(|e| {
            log::debug!("Ignoring unreadable date filter {date:?}: {e}");
            Self {
                date: zone.today(),
                course: CourseFilter::from_param(course),
            }
        })
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn matches(&self, record: &AttendanceRecord, zone: &DisplayZone) -> bool {
        let Some(day) = record.local_date(zone) else {
            log::debug!(
                "Skipping record '{}' with unreadable timestamp '{}'",
                record.name,
                record.timestamp
            );
            return false;
        };
        day == self.date && self.course.matches(&record.course)
    }
}

/// Records matching the date and course selection, in input order.
pub fn apply<'a, I>(records: I, filter: &FilterState, zone: &DisplayZone) -> Vec<&'a AttendanceRecord>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    records
        .into_iter()
        .filter(|r| filter.matches(r, zone))
        .collect()
}
