//! Remaining countdown time split into display units.

use crate::error::{CountdownError, Result};
use crate::format::Unit;
use std::time::{Duration, SystemTime};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Whole seconds left on a countdown, decomposed into days, hours, minutes
/// and seconds.
///
/// ```rust
/// use bubbletea_countdown::remaining::Remaining;
///
/// let remaining = Remaining::from_secs(90_061);
/// assert_eq!(remaining.days, 1);
/// assert_eq!(remaining.hours, 1);
/// assert_eq!(remaining.minutes, 1);
/// assert_eq!(remaining.seconds, 1);
/// assert_eq!(remaining.total_secs(), 90_061);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    /// Whole days, unbounded.
    pub days: u64,
    /// Hours modulo 24.
    pub hours: u64,
    /// Minutes modulo 60.
    pub minutes: u64,
    /// Seconds modulo 60.
    pub seconds: u64,
}

impl Remaining {
    /// All fields zero.
    pub const ZERO: Remaining = Remaining {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decomposes a total number of seconds.
    pub fn from_secs(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: (total / SECS_PER_HOUR) % 24,
            minutes: (total / SECS_PER_MINUTE) % 60,
            seconds: total % 60,
        }
    }

    /// Converts a millisecond countdown length, truncating to whole seconds.
    ///
    /// # Errors
    ///
    /// [`CountdownError::NonPositiveDuration`] when `millis <= 0`.
    pub fn from_millis(millis: i64) -> Result<Self> {
        if millis <= 0 {
            return Err(CountdownError::NonPositiveDuration { millis });
        }
        Ok(Self::from_secs(millis as u64 / 1000))
    }

    /// Seconds left between `now` and `deadline`; zero once the deadline
    /// has passed.
    ///
    /// ```rust
    /// use bubbletea_countdown::remaining::Remaining;
    /// use std::time::{Duration, SystemTime};
    ///
    /// let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
    /// let deadline = now + Duration::from_secs(3_661);
    /// assert_eq!(Remaining::until(deadline, now), Remaining::from_secs(3_661));
    /// assert_eq!(Remaining::until(now, deadline), Remaining::ZERO);
    /// ```
    pub fn until(deadline: SystemTime, now: SystemTime) -> Self {
        let left = deadline.duration_since(now).unwrap_or(Duration::ZERO);
        Self::from_secs(left.as_secs())
    }

    /// Recombines the fields into a total second count.
    pub fn total_secs(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }

    /// Whether no time is left.
    pub fn is_zero(&self) -> bool {
        self.total_secs() == 0
    }

    /// Removes one second, saturating at zero.
    pub fn decrement(&mut self) {
        *self = Self::from_secs(self.total_secs().saturating_sub(1));
    }

    /// Value of a single unit.
    pub fn value(&self, unit: Unit) -> u64 {
        match unit {
            Unit::Day => self.days,
            Unit::Hour => self.hours,
            Unit::Minute => self.minutes,
            Unit::Second => self.seconds,
        }
    }

    /// Display text for `unit`, zero-padded to the unit's width.
    pub fn text(&self, unit: Unit) -> String {
        time_string(self.value(unit), unit.min_digits())
    }
}

/// Formats `value` left-padded with zeros to at least `min_len` digits.
///
/// Values wider than `min_len` are never truncated.
///
/// ```rust
/// use bubbletea_countdown::remaining::time_string;
///
/// assert_eq!(time_string(5, 2), "05");
/// assert_eq!(time_string(125, 2), "125");
/// assert_eq!(time_string(0, 0), "0");
/// ```
pub fn time_string(value: u64, min_len: usize) -> String {
    format!("{value:0>min_len$}")
}

/// Number of digits needed to show `days`, at least one.
pub fn day_digit_count(days: u64) -> usize {
    days.checked_ilog10().map_or(1, |log| log as usize + 1)
}
