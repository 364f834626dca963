//! Clock times and priced opening-hour windows.
//!
//! Restaurants publish their opening hours as a list of `HH:MM` ranges, each
//! optionally carrying a per-person price. This module holds the
//! [`ClockTime`] and [`TimeWindow`] types used to represent them.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Number of minutes in a day. `24:00` maps to this value.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time expressed as minutes since midnight.
///
/// Parses from `HH:MM` (a trailing `:SS` is accepted and ignored).
/// `24:00` is allowed so that a window can close at end of day.
///
/// # Example
///
/// ```
/// use booking_engine::models::ClockTime;
///
/// let time: ClockTime = "20:30".parse().unwrap();
/// assert_eq!(time.minutes(), 20 * 60 + 30);
/// assert_eq!(time.to_string(), "20:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Builds a clock time from an hour and minute.
    ///
    /// Returns `None` when the values do not describe a time between
    /// `00:00` and `24:00` inclusive.
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if minute > 59 || hour > 24 || (hour == 24 && minute != 0) {
            return None;
        }
        Some(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Returns the number of minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Returns the hour component.
    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    /// Returns the minute component.
    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidClockTime {
            value: s.to_string(),
        };

        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        let mut parts = s.trim().split(':');
        let hour = parts.next().ok_or_else(invalid)?;
        let minute = parts.next().ok_or_else(invalid)?;
        if let Some(second) = parts.next() {
            if second.len() != 2
                || !digits(second)
                || second.parse::<u8>().map_or(true, |sec| sec > 59)
            {
                return Err(invalid());
            }
        }
        if parts.next().is_some()
            || !digits(hour)
            || !digits(minute)
            || hour.len() > 2
            || minute.len() != 2
        {
            return Err(invalid());
        }

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A priced opening-hour window.
///
/// The window covers `[open, close)`. Windows fetched from a business's
/// settings may be incomplete, so every field is optional; a window missing
/// either bound never matches.
///
/// # Example
///
/// ```
/// use booking_engine::models::TimeWindow;
/// use rust_decimal::Decimal;
///
/// let dinner = TimeWindow::new("18:00".parse().unwrap(), "21:00".parse().unwrap(), Decimal::from(80));
/// assert!(dinner.contains("20:30".parse().unwrap()));
/// assert!(!dinner.contains("21:00".parse().unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Opening time (inclusive).
    #[serde(default)]
    pub open: Option<ClockTime>,
    /// Closing time (exclusive).
    #[serde(default)]
    pub close: Option<ClockTime>,
    /// Per-person price for reservations inside this window.
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl TimeWindow {
    /// Creates a fully specified window.
    pub fn new(open: ClockTime, close: ClockTime, price: Decimal) -> Self {
        Self {
            open: Some(open),
            close: Some(close),
            price: Some(price),
        }
    }

    /// Returns true if `time` falls within `[open, close)`.
    pub fn contains(&self, time: ClockTime) -> bool {
        match (self.open, self.close) {
            (Some(open), Some(close)) => time >= open && time < close,
            _ => false,
        }
    }
}
