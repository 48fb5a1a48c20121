use chrono::{DateTime, Utc};
use petcare_domain::{event_type_name, EventKind, ID};
use serde::{Deserialize, Serialize};

pub use petcare_domain::{
    DoctorVisit as DoctorVisitDTO, Treatment as TreatmentDTO, Vaccine as VaccineDTO,
};

/// An entry of the upcoming and past event lists. The list mixes all event
/// kinds, so every kind specific field is optional.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSummaryDTO {
    pub id: ID,
    /// `doctor-visit`, `vaccine` or `treatment`
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub title: Option<String>,
    pub event_date: DateTime<Utc>,
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default)]
    pub clinic: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub medicine: Option<String>,
    #[serde(default)]
    pub next_vaccination_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub remedy: Option<String>,
    #[serde(default)]
    pub parasite: Option<String>,
    #[serde(default)]
    pub next_treatment_date: Option<DateTime<Utc>>,
}

impl EventSummaryDTO {
    /// `None` for event types this client does not know about
    pub fn kind(&self) -> Option<EventKind> {
        self.event_type.parse().ok()
    }

    pub fn type_name(&self) -> &'static str {
        event_type_name(&self.event_type)
    }

    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.type_name().to_string(),
        }
    }

    /// Route of the details view, `None` for unknown event types
    pub fn route(&self, search: &str) -> Option<String> {
        self.kind().map(|kind| kind.route(self.id, search))
    }

    pub fn next_date(&self) -> Option<DateTime<Utc>> {
        self.next_vaccination_date.or(self.next_treatment_date)
    }

    /// Kind specific detail worth showing in a list
    pub fn subtitle(&self) -> Option<&str> {
        match self.kind()? {
            EventKind::DoctorVisit => self.clinic.as_deref().or_else(|| self.doctor.as_deref()),
            EventKind::Vaccine => self.medicine.as_deref(),
            EventKind::Treatment => self.remedy.as_deref().or_else(|| self.parasite.as_deref()),
        }
    }
}
