use crate::{date::resolve_local, shared::period::PeriodUnit};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// How often a vaccination or treatment repeats, e.g. "every 1 month"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub value: u32,
    pub unit: PeriodUnit,
}

impl Recurrence {
    pub fn new(value: u32, unit: PeriodUnit) -> Self {
        Self { value, unit }
    }

    /// The form only lets the user pick a unit, the count is always one
    pub fn every(unit: PeriodUnit) -> Self {
        Self::new(1, unit)
    }

    pub fn next_after<Tz: TimeZone>(&self, anchor: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        next_occurrence(anchor, self.value, self.unit)
    }

    pub fn label(&self) -> String {
        if self.value == 1 {
            self.unit.repeat_label().to_string()
        } else {
            format!("Every {} {}s", self.value, self.unit)
        }
    }
}

/// Computes the next occurrence `value` units after `anchor`.
///
/// Minutes and hours are fixed durations. Days and longer are added to the
/// wall clock time in the time zone of `anchor`, so the time of day stays
/// the same across daylight saving changes. Months and years keep the day
/// of month and roll the days a shorter target month lacks over into the
/// following month: Jan 31 + 1 month is Mar 3 (Mar 2 in leap years) and
/// Feb 29 + 1 year is Mar 1.
///
/// Returns `None` when the result does not fit in the supported date range.
pub fn next_occurrence<Tz: TimeZone>(
    anchor: &DateTime<Tz>,
    value: u32,
    unit: PeriodUnit,
) -> Option<DateTime<Tz>> {
    let local = anchor.naive_local();
    let next = match unit {
        PeriodUnit::Minute | PeriodUnit::Hour => {
            let duration = unit.fixed_duration(i64::from(value))?;
            return anchor.clone().checked_add_signed(duration);
        }
        PeriodUnit::Day => local.checked_add_days(Days::new(u64::from(value)))?,
        PeriodUnit::Week => local.checked_add_days(Days::new(u64::from(value) * 7))?,
        PeriodUnit::Month => add_months_rolling_over(&local, value)?,
        PeriodUnit::Year => add_months_rolling_over(&local, value.checked_mul(12)?)?,
    };
    resolve_local(&anchor.timezone(), &next)
}

fn add_months_rolling_over(local: &NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    let total = i64::from(local.year()) * 12 + i64::from(local.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first.checked_add_days(Days::new(u64::from(local.day0())))?;
    Some(date.and_time(local.time()))
}
