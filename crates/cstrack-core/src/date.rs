//! Target-date resolution and the `M/D` labels used by the dashboard sheet.

use chrono::{Datelike, Days, Local, NaiveDate};
use thiserror::Error;

/// Accepted format for an explicit target date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid date argument \"{input}\" (expected YYYY-MM-DD)")]
    InvalidArgument { input: String },
}

/// Resolve the date to report on.
///
/// With no argument the target is the day before `today`. An explicit
/// argument must be a valid `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`DateError::InvalidArgument`] if `arg` is not a valid date.
pub fn resolve_target_date(arg: Option<&str>, today: NaiveDate) -> Result<NaiveDate, DateError> {
    match arg {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
            DateError::InvalidArgument {
                input: raw.to_owned(),
            }
        }),
        None => today
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| DateError::InvalidArgument {
                input: today.to_string(),
            }),
    }
}

/// [`resolve_target_date`] against the local wall clock.
///
/// # Errors
///
/// Returns [`DateError::InvalidArgument`] if `arg` is not a valid date.
pub fn resolve_target_date_now(arg: Option<&str>) -> Result<NaiveDate, DateError> {
    resolve_target_date(arg, Local::now().date_naive())
}

/// Format a date the way the sheet's header row labels it: `M/D`, no
/// zero-padding and no year.
#[must_use]
pub fn date_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}
