use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use std::ops::Deref;

use crate::api::{ConversionError, FlagValue};

/// A span of time, written in humantime notation (ex: `1h30m`, `250ms`, `2days`).
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{ext::Duration, FlagValue};
///
/// let mut timeout = Duration::default();
/// timeout.set("1m 30s").unwrap();
/// assert_eq!(*timeout, std::time::Duration::from_secs(90));
/// assert_eq!(timeout.display(), "1m 30s");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(std::time::Duration);

impl Duration {
    /// The underlying duration.
    pub fn get(&self) -> std::time::Duration {
        self.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Self(value)
    }
}

impl FlagValue for Duration {
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        self.0 = humantime::parse_duration(raw)
            .map_err(|error| ConversionError::message(format!("invalid duration '{raw}': {error}")))?;
        Ok(())
    }

    fn display(&self) -> String {
        humantime::format_duration(self.0).to_string()
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", humantime::format_duration(self.0))
    }
}

/// A point in time: RFC 3339 (`2024-05-01T10:00:00+02:00`), `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`.
///
/// Forms without an offset are read as UTC.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{ext::Time, FlagValue};
///
/// let mut at = Time::default();
/// assert_eq!(at.display(), "");
///
/// at.set("2024-05-01").unwrap();
/// assert_eq!(at.display(), "2024-05-01T00:00:00+00:00");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Time(Option<DateTime<FixedOffset>>);

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

impl Time {
    /// The parsed time, if any was assigned.
    pub fn get(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    fn parse(raw: &str) -> Option<DateTime<FixedOffset>> {
        if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
            return Some(time);
        }

        NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).fixed_offset())
    }
}

impl FlagValue for Time {
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        match Self::parse(raw.trim()) {
            Some(time) => {
                self.0.replace(time);
                Ok(())
            }
            None => Err(ConversionError::invalid::<Time>(raw)),
        }
    }

    fn display(&self) -> String {
        self.0.map(|time| time.to_rfc3339()).unwrap_or_default()
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", FlagValue::display(self))
    }
}
