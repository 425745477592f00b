//! Weekly service calendar.
//!
//! A `ServiceCalendar` answers one question: does a trip operate on a
//! given calendar date? The check is purely a date comparison; no
//! timezone conversion is applied.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Weekly operating pattern plus a validity window.
///
/// Weekday flags are indexed Monday..Sunday. The validity window is
/// inclusive at both ends and `valid_from <= valid_until` is enforced
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCalendar {
    /// Operating flags, Monday first.
    pub weekdays: [bool; 7],
    /// First date the trip operates (inclusive).
    pub valid_from: NaiveDate,
    /// Last date the trip operates (inclusive).
    pub valid_until: NaiveDate,
}

impl ServiceCalendar {
    /// Construct a calendar, validating the window.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `valid_from > valid_until`.
    pub fn new(
        weekdays: [bool; 7],
        valid_from: NaiveDate,
        valid_until: NaiveDate,
    ) -> Result<Self, DomainError> {
        if valid_from > valid_until {
            return Err(DomainError::InvalidCalendar(
                "validity start is after validity end",
            ));
        }
        Ok(Self {
            weekdays,
            valid_from,
            valid_until,
        })
    }

    /// A calendar that operates every day within the window.
    pub fn daily(valid_from: NaiveDate, valid_until: NaiveDate) -> Result<Self, DomainError> {
        Self::new([true; 7], valid_from, valid_until)
    }

    /// Whether the trip operates on `date`.
    ///
    /// `None` bypasses the calendar entirely: every trip is eligible
    /// when the caller does not constrain the date.
    pub fn operates_on(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return true;
        };

        if date < self.valid_from || date > self.valid_until {
            return false;
        }

        self.weekdays[weekday_index(date.weekday())]
    }
}

/// Index of a weekday into the flags array, Monday = 0.
fn weekday_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}
