//! Wall-clock times of day.
//!
//! The scheduler is not calendar-aware: times are minutes since midnight and
//! wrap at 24 hours. A visit that runs past midnight shows the clock face
//! (`00:10`), not a next-day date.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u64 = 24 * 60;

/// Errors returned when parsing a [`TimeOfDay`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeOfDayError {
    /// The text was not a 24-hour `HH:MM` time.
    #[error("invalid time {input:?}; expected 24-hour HH:MM")]
    Invalid {
        /// Text as supplied.
        input: String,
    },
}

/// A clock time with minute resolution.
///
/// # Examples
/// ```
/// use tripwise_core::TimeOfDay;
///
/// let start: TimeOfDay = "08:05".parse()?;
/// assert_eq!(start.minutes(), 485);
/// assert_eq!(start.to_string(), "08:05");
/// assert_eq!(TimeOfDay::wrapping_from_minutes(1450).to_string(), "00:10");
/// # Ok::<(), tripwise_core::TimeOfDayError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self { minutes: 0 };

    /// Project an absolute minute count onto the 24-hour clock face.
    pub fn wrapping_from_minutes(total: u64) -> Self {
        let minutes = u16::try_from(total % MINUTES_PER_DAY).unwrap_or_default();
        Self { minutes }
    }

    /// Minutes elapsed since midnight, in `0..1440`.
    pub const fn minutes(self) -> u16 {
        self.minutes
    }

    /// Hour component, `0..24`.
    pub const fn hour(self) -> u16 {
        self.minutes / 60
    }

    /// Minute component, `0..60`.
    pub const fn minute(self) -> u16 {
        self.minutes % 60
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed =
            NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| TimeOfDayError::Invalid {
                input: s.to_owned(),
            })?;
        let minutes = parsed.hour() * 60 + parsed.minute();
        let minutes = u16::try_from(minutes).map_err(|_| TimeOfDayError::Invalid {
            input: s.to_owned(),
        })?;
        Ok(Self { minutes })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeOfDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}
