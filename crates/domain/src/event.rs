use crate::{
    reminder::ReminderSettings,
    shared::entity::{Entity, ID},
    shared::period::PeriodUnit,
    shared::recurrence::Recurrence,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The three kinds of medical events a pet can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    DoctorVisit,
    Vaccine,
    Treatment,
}

impl EventKind {
    /// Path segment used both by the api and by the event routes
    pub fn slug(&self) -> &'static str {
        match self {
            Self::DoctorVisit => "doctor-visit",
            Self::Vaccine => "vaccine",
            Self::Treatment => "treatment",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DoctorVisit => "Doctor visit",
            Self::Vaccine => "Vaccination",
            Self::Treatment => "Treatment",
        }
    }

    /// Title submitted when the user leaves the title empty
    pub fn default_title(&self) -> &'static str {
        self.display_name()
    }

    pub fn title_or_default(&self, title: Option<&str>) -> String {
        match title.map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.default_title().to_string(),
        }
    }

    /// Route of the details view of an event, `search` is the query string
    /// of the current location (including the leading `?`) and is kept so
    /// the pet selection survives navigation.
    pub fn route(&self, event_id: ID, search: &str) -> String {
        format!("/{}/{}{}", self.slug(), event_id, search)
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::DoctorVisit)
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidEventKindError {
    #[error("Unknown event type: {0}")]
    Unknown(String),
}

impl FromStr for EventKind {
    type Err = InvalidEventKindError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind.trim().to_lowercase().as_str() {
            "doctor-visit" | "doctor_visit" | "doctorvisit" | "visit" => Ok(Self::DoctorVisit),
            "vaccine" | "vaccination" => Ok(Self::Vaccine),
            "treatment" => Ok(Self::Treatment),
            _ => Err(InvalidEventKindError::Unknown(kind.to_string())),
        }
    }
}

/// Name shown for an event type tag coming from the api
pub fn event_type_name(type_tag: &str) -> &'static str {
    type_tag
        .parse::<EventKind>()
        .map(|kind| kind.display_name())
        .unwrap_or("Procedure")
}

/// Computes the next due date of a recurring procedure held at `event_date`.
/// The calendar arithmetic happens in the time zone of `event_date`.
pub fn next_due_date<Tz: TimeZone>(
    event_date: &DateTime<Tz>,
    recurrence: Option<Recurrence>,
) -> Option<DateTime<Utc>> {
    recurrence
        .and_then(|r| r.next_after(event_date))
        .map(|next| next.with_timezone(&Utc))
}

fn period_recurrence(value: Option<u32>, unit: Option<PeriodUnit>) -> Option<Recurrence> {
    unit.map(|unit| Recurrence::new(value.unwrap_or(1), unit))
}

fn period_label(value: Option<u32>, unit: Option<PeriodUnit>) -> String {
    period_recurrence(value, unit)
        .unwrap_or_else(|| Recurrence::every(PeriodUnit::Month))
        .label()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorVisit {
    pub id: ID,
    pub pet_id: ID,
    #[serde(default)]
    pub title: Option<String>,
    pub event_date: DateTime<Utc>,
    #[serde(flatten)]
    pub reminder: ReminderSettings,
    #[serde(default)]
    pub clinic: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub recommendations: Option<String>,
    #[serde(default)]
    pub referrals: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub id: ID,
    pub pet_id: ID,
    #[serde(default)]
    pub title: Option<String>,
    pub event_date: DateTime<Utc>,
    #[serde(flatten)]
    pub reminder: ReminderSettings,
    #[serde(default)]
    pub medicine: Option<String>,
    #[serde(default)]
    pub period_value: Option<u32>,
    #[serde(default)]
    pub period_unit: Option<PeriodUnit>,
    #[serde(default)]
    pub next_vaccination_date: Option<DateTime<Utc>>,
}

impl Vaccine {
    pub fn recurrence(&self) -> Option<Recurrence> {
        period_recurrence(self.period_value, self.period_unit)
    }

    pub fn period_label(&self) -> String {
        period_label(self.period_value, self.period_unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: ID,
    pub pet_id: ID,
    #[serde(default)]
    pub title: Option<String>,
    pub event_date: DateTime<Utc>,
    #[serde(flatten)]
    pub reminder: ReminderSettings,
    #[serde(default)]
    pub remedy: Option<String>,
    #[serde(default)]
    pub parasite: Option<String>,
    #[serde(default)]
    pub period_value: Option<u32>,
    #[serde(default)]
    pub period_unit: Option<PeriodUnit>,
    #[serde(default)]
    pub next_treatment_date: Option<DateTime<Utc>>,
}

impl Treatment {
    pub fn recurrence(&self) -> Option<Recurrence> {
        period_recurrence(self.period_value, self.period_unit)
    }

    pub fn period_label(&self) -> String {
        period_label(self.period_value, self.period_unit)
    }
}

/// A scheduled or historical medical occurrence of a pet
#[derive(Debug, Clone, PartialEq)]
pub enum MedicalEvent {
    DoctorVisit(DoctorVisit),
    Vaccine(Vaccine),
    Treatment(Treatment),
}

impl MedicalEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::DoctorVisit(_) => EventKind::DoctorVisit,
            Self::Vaccine(_) => EventKind::Vaccine,
            Self::Treatment(_) => EventKind::Treatment,
        }
    }

    pub fn pet_id(&self) -> ID {
        match self {
            Self::DoctorVisit(e) => e.pet_id,
            Self::Vaccine(e) => e.pet_id,
            Self::Treatment(e) => e.pet_id,
        }
    }

    fn raw_title(&self) -> Option<&str> {
        match self {
            Self::DoctorVisit(e) => e.title.as_deref(),
            Self::Vaccine(e) => e.title.as_deref(),
            Self::Treatment(e) => e.title.as_deref(),
        }
    }

    /// Title to show, falling back to the name of the event kind
    pub fn title(&self) -> String {
        match self.raw_title().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.kind().display_name().to_string(),
        }
    }

    pub fn event_date(&self) -> DateTime<Utc> {
        match self {
            Self::DoctorVisit(e) => e.event_date,
            Self::Vaccine(e) => e.event_date,
            Self::Treatment(e) => e.event_date,
        }
    }

    pub fn reminder(&self) -> ReminderSettings {
        match self {
            Self::DoctorVisit(e) => e.reminder,
            Self::Vaccine(e) => e.reminder,
            Self::Treatment(e) => e.reminder,
        }
    }

    pub fn recurrence(&self) -> Option<Recurrence> {
        match self {
            Self::DoctorVisit(_) => None,
            Self::Vaccine(e) => e.recurrence(),
            Self::Treatment(e) => e.recurrence(),
        }
    }

    /// Next due date as stored by the server
    pub fn next_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DoctorVisit(_) => None,
            Self::Vaccine(e) => e.next_vaccination_date,
            Self::Treatment(e) => e.next_treatment_date,
        }
    }

    pub fn route(&self, search: &str) -> String {
        self.kind().route(*self.id(), search)
    }
}

impl Entity for MedicalEvent {
    fn id(&self) -> &ID {
        match self {
            Self::DoctorVisit(e) => &e.id,
            Self::Vaccine(e) => &e.id,
            Self::Treatment(e) => &e.id,
        }
    }
}

impl From<DoctorVisit> for MedicalEvent {
    fn from(e: DoctorVisit) -> Self {
        Self::DoctorVisit(e)
    }
}

impl From<Vaccine> for MedicalEvent {
    fn from(e: Vaccine) -> Self {
        Self::Vaccine(e)
    }
}

impl From<Treatment> for MedicalEvent {
    fn from(e: Treatment) -> Self {
        Self::Treatment(e)
    }
}
