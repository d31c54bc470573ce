use chrono::{Days, Local, NaiveDate};

use crate::error::{ReportError, Result};

/// Returns the effective "today" given an optional override.
///
/// Tests pin the calendar through `--now-override`; everything else uses
/// the local clock.
pub fn effective_today(override_today: Option<NaiveDate>) -> NaiveDate {
  override_today.unwrap_or_else(|| Local::now().date_naive())
}

/// Parse the hidden `--now-override` value (YYYY-MM-DD).
///
/// Absent means "use the clock"; anything present must be a real date.
pub fn parse_today(s: Option<&str>) -> Result<Option<NaiveDate>> {
  let Some(s) = s else { return Ok(None) };
  NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
    .map(Some)
    .map_err(|_| ReportError::InvalidFilter(format!("--now-override expects YYYY-MM-DD, got '{}'", s)))
}

/// Reconcile `--startdate` with `--age`.
///
/// - both set: `ConflictingFilter`
/// - only age: today minus `age` days as `YYYY-MM-DD`
/// - otherwise the start date passes through untouched
pub fn resolve_start_date(
  start_date: Option<&str>,
  age_days: Option<u32>,
  today: NaiveDate,
) -> Result<Option<String>> {
  match (start_date, age_days) {
    (Some(_), Some(_)) => Err(ReportError::ConflictingFilter),
    (None, Some(age)) => {
      let start = today
        .checked_sub_days(Days::new(u64::from(age)))
        .ok_or_else(|| ReportError::InvalidFilter(format!("--age {} reaches before the calendar start", age)))?;
      Ok(Some(start.format("%Y-%m-%d").to_string()))
    }
    (start, None) => Ok(start.map(str::to_string)),
  }
}
