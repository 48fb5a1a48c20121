use anyhow::anyhow;
use chrono::Utc;
use petcare_domain::date::{combine_date_time, format_event_date_time};
use petcare_sdk::{Recurrence, Tz};

/// When a procedure held at `date` `time` in `tz` is due again
pub fn next_date(
    date: &str,
    time: &str,
    recurrence: Recurrence,
    tz: &Tz,
) -> anyhow::Result<String> {
    let event_date = combine_date_time(date, time, tz)?.with_timezone(tz);
    let next = recurrence
        .next_after(&event_date)
        .ok_or_else(|| anyhow!("The next date is too far in the future"))?;
    let next = format_event_date_time(&next.with_timezone(&Utc), tz);
    Ok(format!(
        "{} {} ({})",
        next.full_date,
        next.time,
        recurrence.label()
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono_tz::Europe::{Berlin, Moscow};
    use petcare_sdk::PeriodUnit;

    #[test]
    fn computes_next_date_in_time_zone() {
        let next = next_date(
            "2025-01-31",
            "23:30",
            Recurrence::every(PeriodUnit::Month),
            &Moscow,
        )
        .unwrap();
        assert_eq!(next, "3 March 2025 23:30 (Once a month)");

        let next = next_date(
            "2024-02-29",
            "09:00",
            Recurrence::new(2, PeriodUnit::Week),
            &Tz::UTC,
        )
        .unwrap();
        assert_eq!(next, "14 March 2024 09:00 (Every 2 weeks)");
    }

    #[test]
    fn next_date_skipped_by_clock_change_moves_forward() {
        let next = next_date(
            "2024-03-30",
            "02:30",
            Recurrence::every(PeriodUnit::Year),
            &Berlin,
        )
        .unwrap();
        assert_eq!(next, "30 March 2025 03:30 (Once a year)");
    }

    #[test]
    fn rejects_malformed_input() {
        let res = next_date("2025-02-30", "10:00", Recurrence::every(PeriodUnit::Day), &Tz::UTC);
        assert!(res.is_err());
        let res = next_date("2025-02-03", "25:00", Recurrence::every(PeriodUnit::Day), &Tz::UTC);
        assert!(res.is_err());
    }
}
