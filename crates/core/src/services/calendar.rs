//! Calendar helpers shared by the DCA simulator and the chart window.
//!
//! Everything works on `NaiveDate`, so results never depend on the host's
//! time zone or daylight-saving rules.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

use crate::errors::CoreError;

/// ISO-8601 week number (1..=53).
///
/// Weeks start on Monday; week 1 is the week containing the year's first
/// Thursday. Early-January dates can therefore belong to week 52/53 of the
/// previous year, and late-December dates to week 1 of the next.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// ISO week-numbering year, which differs from the calendar year around New Year.
pub fn iso_week_year(date: NaiveDate) -> i32 {
    date.iso_week().year()
}

/// Calendar month, 1..=12.
pub fn month_number(date: NaiveDate) -> u32 {
    date.month()
}

/// The same calendar day `years` years earlier.
///
/// Feb 29 maps to Feb 28 in a non-leap target year. Saturates at
/// `NaiveDate::MIN` instead of failing.
pub fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

/// Shorthand for `years_before(date, 1)`.
pub fn one_year_before(date: NaiveDate) -> NaiveDate {
    years_before(date, 1)
}

/// Parse a calendar date from user or document input.
///
/// Accepts `YYYY-MM-DD`, and timestamps starting with one
/// (`YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`), keeping only the date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError("date is empty".into()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.fZ"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    Err(CoreError::ValidationError(format!(
        "'{trimmed}' is not a valid date (expected YYYY-MM-DD)"
    )))
}
