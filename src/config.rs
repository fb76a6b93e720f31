use std::time::Duration;

use chrono::FixedOffset;
use chrono_tz::Tz;

use crate::errors::AppError;
use crate::models::zone::DisplayZone;

pub const DEFAULT_FEED_PATH: &str = "student-details";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_RECONNECT_SECS: u64 = 5;

/// Runtime configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the realtime database, e.g. `https://example.firebaseio.com`.
    pub feed_url: String,
    /// Collection path holding the attendance records.
    pub feed_path: String,
    pub reconnect_delay: Duration,
    pub bind_addr: String,
    /// Zone used to turn record timestamps into calendar dates.
    pub display_zone: DisplayZone,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let feed_url = get("FEED_URL")
            .ok_or_else(|| AppError::Config("FEED_URL must be set".to_string()))?;
        if !feed_url.starts_with("http://") && !feed_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "FEED_URL must be an http(s) URL, got '{feed_url}'"
            )));
        }

        let feed_path = get("FEED_PATH").unwrap_or_else(|| DEFAULT_FEED_PATH.to_string());

        let reconnect_secs = match get("FEED_RECONNECT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("FEED_RECONNECT_SECS must be a whole number, got '{raw}'"))
            })?,
            None => DEFAULT_RECONNECT_SECS,
        };

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let display_zone = match (get("DISPLAY_TZ"), get("DISPLAY_UTC_OFFSET_MINUTES")) {
            (Some(_), Some(_)) => {
                return Err(AppError::Config(
                    "set only one of DISPLAY_TZ and DISPLAY_UTC_OFFSET_MINUTES".to_string(),
                ));
            }
            (Some(name), None) => DisplayZone::Named(parse_zone_name(&name)?),
            (None, Some(raw)) => DisplayZone::Fixed(parse_offset_minutes(&raw)?),
            (None, None) => DisplayZone::Local,
        };

        Ok(Self {
            feed_url,
            feed_path,
            reconnect_delay: Duration::from_secs(reconnect_secs),
            bind_addr,
            display_zone,
        })
    }

    /// Streaming endpoint for the configured collection.
    pub fn feed_endpoint(&self) -> String {
        format!(
            "{}/{}.json",
            self.feed_url.trim_end_matches('/'),
            self.feed_path.trim_matches('/')
        )
    }
}

fn parse_zone_name(raw: &str) -> Result<Tz, AppError> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|e| AppError::Config(format!("DISPLAY_TZ is not a known time zone: {e}")))
}

fn parse_offset_minutes(raw: &str) -> Result<FixedOffset, AppError> {
    let minutes = raw.trim().parse::<i32>().map_err(|_| {
        AppError::Config(format!("DISPLAY_UTC_OFFSET_MINUTES must be an integer, got '{raw}'"))
    })?;
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| AppError::Config(format!("UTC offset out of range: {minutes} minutes")))
}
