use super::Context;
use crate::{
    cli::{AddEventArgs, EventCommand, EventDetailsArgs, UpdateEventArgs},
    render,
};
use anyhow::bail;
use petcare_domain::date::{combine_date_time, format_date_for_input, format_time_for_input};
use petcare_sdk::{
    DoctorVisitInput, EventInput, EventKind, MedicalEvent, PeriodUnit, Recurrence,
    ReminderSettings, TreatmentInput, Tz, VaccineInput,
};

/// Period of a new vaccination or treatment when none is given
const DEFAULT_PERIOD: PeriodUnit = PeriodUnit::Month;

/// What gets submitted for an event, one variant per kind
#[derive(Debug)]
enum EventPayload {
    DoctorVisit(DoctorVisitInput),
    Vaccine(VaccineInput),
    Treatment(TreatmentInput),
}

impl EventDetailsArgs {
    fn reminder(&self) -> Option<ReminderSettings> {
        if self.no_reminder {
            Some(ReminderSettings::disabled())
        } else {
            self.remind
        }
    }
}

pub async fn run(command: EventCommand, ctx: &Context) -> anyhow::Result<()> {
    let tz = &ctx.timezone;
    match command {
        EventCommand::Upcoming { pet_id, limit } => {
            let mut events = ctx.sdk.event.upcoming(pet_id).await?;
            if let Some(limit) = limit {
                events.truncate(limit);
            }
            println!(
                "{}",
                render::event_list(
                    "Upcoming procedures",
                    &events,
                    "No upcoming procedures",
                    tz
                )
            );
        }
        EventCommand::History { pet_id } => {
            let events = ctx.sdk.event.past(pet_id).await?;
            println!(
                "{}",
                render::event_list("Medical history", &events, "No past procedures", tz)
            );
        }
        EventCommand::Show { kind, id } => {
            let event = ctx.sdk.event.get(kind, id).await?;
            println!("{}", render::event_details(&event, tz));
        }
        EventCommand::Add(args) => {
            let kind = args.kind;
            let event_id = match new_event(args, tz)? {
                EventPayload::DoctorVisit(input) => {
                    ctx.sdk.event.create_doctor_visit(input).await?
                }
                EventPayload::Vaccine(input) => ctx.sdk.event.create_vaccine(input).await?,
                EventPayload::Treatment(input) => ctx.sdk.event.create_treatment(input).await?,
            };
            println!("{} #{} created", kind.display_name(), event_id);
        }
        EventCommand::Update(args) => {
            let (kind, event_id) = (args.kind, args.id);
            let current = ctx.sdk.event.get(kind, event_id).await?;
            match updated_event(current, args, tz)? {
                EventPayload::DoctorVisit(input) => {
                    ctx.sdk.event.update_doctor_visit(event_id, input).await?;
                }
                EventPayload::Vaccine(input) => {
                    ctx.sdk.event.update_vaccine(event_id, input).await?;
                }
                EventPayload::Treatment(input) => {
                    ctx.sdk.event.update_treatment(event_id, input).await?;
                }
            }
            println!("{} #{} updated", kind.display_name(), event_id);
        }
        EventCommand::Delete { kind, id } => {
            ctx.sdk.event.delete(kind, id).await?;
            println!("{} #{} deleted", kind.display_name(), id);
        }
    }
    Ok(())
}

/// Only vaccinations and treatments repeat, and never more often than daily
fn repeat_period(
    kind: EventKind,
    period: Option<PeriodUnit>,
) -> anyhow::Result<Option<PeriodUnit>> {
    match period {
        Some(_) if !kind.is_recurring() => {
            bail!("A {} does not repeat", kind.display_name().to_lowercase())
        }
        Some(unit) if !PeriodUnit::REPEAT_UNITS.contains(&unit) => {
            bail!("A procedure repeats once a day, week, month or year")
        }
        period => Ok(period),
    }
}

fn new_event(args: AddEventArgs, tz: &Tz) -> anyhow::Result<EventPayload> {
    let event_date = combine_date_time(&args.date, &args.time, tz)?.with_timezone(tz);
    let details = args.details;
    let event = EventInput {
        pet_id: args.pet_id,
        title: details.title.clone(),
        event_date,
        reminder: details
            .reminder()
            .unwrap_or_else(ReminderSettings::disabled),
    };
    let period = repeat_period(args.kind, details.period)?;
    let period = Some(Recurrence::every(period.unwrap_or(DEFAULT_PERIOD)));

    let payload = match args.kind {
        EventKind::DoctorVisit => EventPayload::DoctorVisit(DoctorVisitInput {
            event,
            clinic: details.clinic,
            doctor: details.doctor,
            diagnosis: details.diagnosis,
            recommendations: details.recommendations,
            referrals: details.referrals,
        }),
        EventKind::Vaccine => EventPayload::Vaccine(VaccineInput {
            event,
            medicine: details.medicine,
            period,
        }),
        EventKind::Treatment => EventPayload::Treatment(TreatmentInput {
            event,
            remedy: details.remedy,
            parasite: details.parasite,
            period,
        }),
    };
    Ok(payload)
}

/// The current event with the given changes applied. The date and the time
/// can be changed separately, the missing one keeps its current value.
fn updated_event(
    current: MedicalEvent,
    args: UpdateEventArgs,
    tz: &Tz,
) -> anyhow::Result<EventPayload> {
    let current_date = current.event_date();
    let date = args
        .date
        .unwrap_or_else(|| format_date_for_input(&current_date, tz));
    let time = args
        .time
        .unwrap_or_else(|| format_time_for_input(&current_date, tz));
    let event_date = combine_date_time(&date, &time, tz)?.with_timezone(tz);

    let details = args.details;
    let event = EventInput {
        pet_id: current.pet_id(),
        title: details.title.clone().or_else(|| Some(current.title())),
        event_date,
        reminder: details.reminder().unwrap_or_else(|| current.reminder()),
    };
    let changed_period = repeat_period(current.kind(), details.period)?;
    let period = |existing: Option<Recurrence>| changed_period.map(Recurrence::every).or(existing);

    let payload = match current {
        MedicalEvent::DoctorVisit(visit) => EventPayload::DoctorVisit(DoctorVisitInput {
            event,
            clinic: details.clinic.clone().or(visit.clinic),
            doctor: details.doctor.clone().or(visit.doctor),
            diagnosis: details.diagnosis.clone().or(visit.diagnosis),
            recommendations: details.recommendations.clone().or(visit.recommendations),
            referrals: details.referrals.clone().or(visit.referrals),
        }),
        MedicalEvent::Vaccine(vaccine) => EventPayload::Vaccine(VaccineInput {
            event,
            period: period(vaccine.recurrence()),
            medicine: details.medicine.clone().or(vaccine.medicine),
        }),
        MedicalEvent::Treatment(treatment) => EventPayload::Treatment(TreatmentInput {
            event,
            period: period(treatment.recurrence()),
            remedy: details.remedy.clone().or(treatment.remedy),
            parasite: details.parasite.clone().or(treatment.parasite),
        }),
    };
    Ok(payload)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Europe::Moscow;
    use petcare_domain::Vaccine;
    use petcare_sdk::ID;

    fn vaccine() -> MedicalEvent {
        MedicalEvent::Vaccine(Vaccine {
            id: ID::new(7),
            pet_id: ID::new(4),
            title: Some("Rabies".into()),
            event_date: Utc.with_ymd_and_hms(2025, 9, 21, 10, 0, 0).unwrap(),
            reminder: ReminderSettings::enabled(1, PeriodUnit::Day),
            medicine: Some("Nobivac".into()),
            period_value: Some(1),
            period_unit: Some(PeriodUnit::Year),
            next_vaccination_date: None,
        })
    }

    #[test]
    fn new_event_defaults_to_monthly_period() {
        let args = AddEventArgs {
            kind: EventKind::Treatment,
            pet_id: ID::new(4),
            date: "2025-09-21".into(),
            time: "13:00".into(),
            details: EventDetailsArgs {
                remedy: Some("Drops".into()),
                ..Default::default()
            },
        };
        match new_event(args, &Moscow).unwrap() {
            EventPayload::Treatment(input) => {
                assert_eq!(input.period, Some(Recurrence::every(PeriodUnit::Month)));
                assert_eq!(input.remedy.as_deref(), Some("Drops"));
                assert_eq!(input.event.reminder, ReminderSettings::disabled());
                assert_eq!(
                    input.event.event_date.with_timezone(&Utc),
                    Utc.with_ymd_and_hms(2025, 9, 21, 10, 0, 0).unwrap()
                );
            }
            payload => panic!("Expected a treatment, got: {:?}", payload),
        }
    }

    #[test]
    fn update_keeps_unchanged_fields() {
        let args = UpdateEventArgs {
            kind: EventKind::Vaccine,
            id: ID::new(7),
            date: None,
            time: Some("15:30".into()),
            details: EventDetailsArgs {
                no_reminder: true,
                ..Default::default()
            },
        };
        match updated_event(vaccine(), args, &Moscow).unwrap() {
            EventPayload::Vaccine(input) => {
                assert_eq!(input.event.pet_id, ID::new(4));
                assert_eq!(input.event.title.as_deref(), Some("Rabies"));
                assert_eq!(input.event.reminder, ReminderSettings::disabled());
                assert_eq!(
                    input.event.event_date.with_timezone(&Utc),
                    Utc.with_ymd_and_hms(2025, 9, 21, 12, 30, 0).unwrap()
                );
                assert_eq!(input.medicine.as_deref(), Some("Nobivac"));
                assert_eq!(input.period, Some(Recurrence::every(PeriodUnit::Year)));
            }
            payload => panic!("Expected a vaccine, got: {:?}", payload),
        }
    }

    #[test]
    fn update_applies_changes() {
        let args = UpdateEventArgs {
            kind: EventKind::Vaccine,
            id: ID::new(7),
            date: Some("2025-10-01".into()),
            time: None,
            details: EventDetailsArgs {
                medicine: Some("Rabisin".into()),
                period: Some(PeriodUnit::Month),
                ..Default::default()
            },
        };
        match updated_event(vaccine(), args, &Moscow).unwrap() {
            EventPayload::Vaccine(input) => {
                assert_eq!(
                    input.event.event_date.with_timezone(&Utc),
                    Utc.with_ymd_and_hms(2025, 10, 1, 10, 0, 0).unwrap()
                );
                assert_eq!(
                    input.event.reminder,
                    ReminderSettings::enabled(1, PeriodUnit::Day)
                );
                assert_eq!(input.medicine.as_deref(), Some("Rabisin"));
                assert_eq!(input.period, Some(Recurrence::every(PeriodUnit::Month)));
            }
            payload => panic!("Expected a vaccine, got: {:?}", payload),
        }
    }

    #[test]
    fn rejects_invalid_periods() {
        let args = |kind| AddEventArgs {
            kind,
            pet_id: ID::new(4),
            date: "2025-09-21".into(),
            time: "13:00".into(),
            details: EventDetailsArgs {
                period: Some(PeriodUnit::Hour),
                ..Default::default()
            },
        };
        assert!(new_event(args(EventKind::Vaccine), &Moscow).is_err());
        let err = new_event(args(EventKind::DoctorVisit), &Moscow).unwrap_err();
        assert_eq!(err.to_string(), "A doctor visit does not repeat");
    }
}
