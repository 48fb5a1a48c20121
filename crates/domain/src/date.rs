use chrono::{prelude::*, Duration};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDateError {
    #[error("Malformed date: {0}, expected YYYY-MM-DD")]
    MalformedDate(String),
    #[error("Malformed time: {0}, expected HH:MM")]
    MalformedTime(String),
    #[error("The local time {0} does not exist in the configured time zone")]
    NonexistentLocalTime(String),
}

/// Parses a `YYYY-MM-DD` date as typed into a form
pub fn parse_date(datestr: &str) -> Result<NaiveDate, InvalidDateError> {
    let err = || InvalidDateError::MalformedDate(datestr.to_string());
    let dates = datestr.trim().split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(err());
    }
    let year = dates[0].parse::<i32>().map_err(|_| err())?;
    let month = dates[1].parse::<u32>().map_err(|_| err())?;
    let day = dates[2].parse::<u32>().map_err(|_| err())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)
}

/// Parses a `HH:MM` time as typed into a form. Seconds are always zero.
pub fn parse_time(timestr: &str) -> Result<NaiveTime, InvalidDateError> {
    let err = || InvalidDateError::MalformedTime(timestr.to_string());
    let parts = timestr.trim().split(':').collect::<Vec<_>>();
    if parts.len() != 2 {
        return Err(err());
    }
    let hours = parts[0].parse::<u32>().map_err(|_| err())?;
    let minutes = parts[1].parse::<u32>().map_err(|_| err())?;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(err)
}

/// Resolves a wall clock time in `tz`. An ambiguous time (clocks turned
/// back) resolves to the earliest instant. A time skipped when clocks are
/// turned forward is moved forward by the length of the gap, so 02:30 on
/// the night clocks jump from 02:00 to 03:00 becomes 03:30.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, local: &NaiveDateTime) -> Option<DateTime<Tz>> {
    if let Some(dt) = tz.from_local_datetime(local).earliest() {
        return Some(dt);
    }
    // Offset in effect before the gap
    let before = local.checked_sub_signed(Duration::days(1))?;
    let offset = tz.from_local_datetime(&before).earliest()?.offset().fix();
    let utc = local.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
    Some(tz.from_utc_datetime(&utc))
}

/// Date part of `date` in `tz` formatted for a date input field: `YYYY-MM-DD`
pub fn format_date_for_input<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz).format("%Y-%m-%d").to_string()
}

/// Time part of `date` in `tz` formatted for a time input field: `HH:MM`
pub fn format_time_for_input<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz).format("%H:%M").to_string()
}

/// Combines the values of a date and a time input, interpreted as wall clock
/// time in `tz`, into an instant. See `resolve_local` for wall clock times
/// that are ambiguous or skipped in `tz`.
pub fn combine_date_time<Tz: TimeZone>(
    datestr: &str,
    timestr: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>, InvalidDateError> {
    let date = parse_date(datestr)?;
    let time = parse_time(timestr)?;
    let local = date.and_time(time);
    resolve_local(tz, &local)
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| InvalidDateError::NonexistentLocalTime(local.to_string()))
}

/// Human readable parts of an event date
#[derive(Debug, Clone, PartialEq)]
pub struct EventDateTimeDisplay {
    /// e.g. "21 September"
    pub date: String,
    /// e.g. "13:00"
    pub time: String,
    /// e.g. "21 September 2025"
    pub full_date: String,
}

pub fn format_event_date_time<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> EventDateTimeDisplay
where
    Tz::Offset: std::fmt::Display,
{
    let local = date.with_timezone(tz);
    EventDateTimeDisplay {
        date: local.format("%-d %B").to_string(),
        time: local.format("%H:%M").to_string(),
        full_date: local.format("%-d %B %Y").to_string(),
    }
}
