use chrono::{DateTime, NaiveDate, Utc};
use petcare_domain::date::format_event_date_time;
use petcare_sdk::{EventSummary, MedicalEvent, Pet, Tz};

const MISSING: &str = "-";

fn field(label: &str, value: Option<&str>) -> String {
    let value = value.map(str::trim).filter(|v| !v.is_empty());
    format!("{}: {}", label, value.unwrap_or(MISSING))
}

fn full_date(date: &DateTime<Utc>, tz: &Tz) -> String {
    format_event_date_time(date, tz).full_date
}

/// The profile of a pet, `photo_urls` are the absolute urls of its photos
pub fn pet_profile(pet: &Pet, photo_urls: &[String], today: NaiveDate) -> String {
    let mut lines = vec![
        format!("{} (#{})", pet.name, pet.id),
        field("Breed", pet.breed.as_deref()),
        field("Weight", pet.weight_kg.map(|w| format!("{} kg", w)).as_deref()),
    ];
    let birth_date = pet.birth_date.map(|date| {
        let date_str = date.format("%-d %B %Y").to_string();
        match pet.age_in_years(today) {
            Some(1) => format!("{} (1 year)", date_str),
            Some(age) => format!("{} ({} years)", date_str, age),
            None => date_str,
        }
    });
    lines.push(field("Birth date", birth_date.as_deref()));
    lines.push(format!(
        "Photos: {} ({} more can be added)",
        pet.photos.len(),
        pet.remaining_photo_slots()
    ));
    for (photo, url) in pet.photos.iter().zip(photo_urls) {
        lines.push(format!("  #{} {}", photo.id, url));
    }
    lines.join("\n")
}

/// One line of an event list: when, what and the kind specific detail
pub fn event_summary_line(event: &EventSummary, tz: &Tz) -> String {
    let when = format_event_date_time(&event.event_date, tz);
    let mut line = format!(
        "{} {}  {}: {}",
        when.full_date,
        when.time,
        event.type_name(),
        event.display_title()
    );
    if let Some(subtitle) = event.subtitle() {
        line.push_str(&format!(" ({})", subtitle));
    }
    if let Some(next) = event.next_date() {
        line.push_str(&format!(", next on {}", full_date(&next, tz)));
    }
    if event.reminder_enabled {
        line.push_str(" [reminder]");
    }
    match event.kind() {
        Some(kind) => format!("{}  <{} {}>", line, kind, event.id),
        None => line,
    }
}

pub fn event_list(heading: &str, events: &[EventSummary], empty: &str, tz: &Tz) -> String {
    let mut lines = vec![heading.to_string()];
    if events.is_empty() {
        lines.push(format!("  {}", empty));
    }
    for event in events {
        lines.push(format!("  {}", event_summary_line(event, tz)));
    }
    lines.join("\n")
}

pub fn event_details(event: &MedicalEvent, tz: &Tz) -> String {
    let when = format_event_date_time(&event.event_date(), tz);
    let reminder = event.reminder();
    let mut lines = vec![
        format!("{}: {}", event.kind().display_name(), event.title()),
        format!("Date: {}, {}", when.full_date, when.time),
        if reminder.enabled {
            format!("Reminder: {} before", reminder.lead_label())
        } else {
            "Reminder: off".to_string()
        },
    ];
    match event {
        MedicalEvent::DoctorVisit(visit) => {
            lines.push(field("Clinic", visit.clinic.as_deref()));
            lines.push(field("Doctor", visit.doctor.as_deref()));
            lines.push(field("Diagnosis", visit.diagnosis.as_deref()));
            lines.push(field("Recommendations", visit.recommendations.as_deref()));
            lines.push(field("Referrals", visit.referrals.as_deref()));
        }
        MedicalEvent::Vaccine(vaccine) => {
            lines.push(field("Medicine", vaccine.medicine.as_deref()));
            lines.push(format!("Repeats: {}", vaccine.period_label()));
            let next = vaccine.next_vaccination_date.map(|d| full_date(&d, tz));
            lines.push(field("Next vaccination", next.as_deref()));
        }
        MedicalEvent::Treatment(treatment) => {
            lines.push(field("Remedy", treatment.remedy.as_deref()));
            lines.push(field("Parasite", treatment.parasite.as_deref()));
            lines.push(format!("Repeats: {}", treatment.period_label()));
            let next = treatment.next_treatment_date.map(|d| full_date(&d, tz));
            lines.push(field("Next treatment", next.as_deref()));
        }
    }
    lines.join("\n")
}
