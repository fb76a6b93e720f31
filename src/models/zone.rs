use std::fmt;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Zone used to turn instants into calendar dates.
///
/// `Local` and `Named` apply the zone's rules to each instant, so a winter
/// record and a summer record each get their own UTC offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    /// Host time zone.
    #[default]
    Local,
    /// IANA zone, e.g. `Europe/Berlin`.
    Named(Tz),
    /// One offset for every date.
    Fixed(FixedOffset),
}

impl DisplayZone {
    pub fn date_of<Z: TimeZone>(&self, instant: &DateTime<Z>) -> NaiveDate {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).date_naive(),
            DisplayZone::Named(tz) => instant.with_timezone(tz).date_naive(),
            DisplayZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(&Utc::now())
    }
}

impl From<FixedOffset> for DisplayZone {
    fn from(offset: FixedOffset) -> Self {
        DisplayZone::Fixed(offset)
    }
}

impl From<Tz> for DisplayZone {
    fn from(tz: Tz) -> Self {
        DisplayZone::Named(tz)
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayZone::Local => f.write_str("host local time"),
            DisplayZone::Named(tz) => write!(f, "{}", tz.name()),
            DisplayZone::Fixed(offset) => write!(f, "UTC{offset}"),
        }
    }
}
