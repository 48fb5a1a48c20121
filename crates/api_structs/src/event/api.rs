use crate::dtos::{DoctorVisitDTO, EventSummaryDTO, TreatmentDTO, VaccineDTO};
use chrono::{DateTime, Utc};
use petcare_domain::{PeriodUnit, ReminderSettings, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPathParams {
    pub event_id: ID,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetEventsPathParams {
    pub pet_id: ID,
}

/// Body shared by create and update of a doctor visit
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorVisitRequestBody {
    pub pet_id: ID,
    pub title: String,
    pub event_date: DateTime<Utc>,
    #[serde(flatten)]
    pub reminder: ReminderSettings,
    pub clinic: Option<String>,
    pub doctor: Option<String>,
    pub diagnosis: Option<String>,
    pub recommendations: Option<String>,
    pub referrals: Option<String>,
}

/// Body shared by create and update of a vaccination
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineRequestBody {
    pub pet_id: ID,
    pub title: String,
    pub event_date: DateTime<Utc>,
    #[serde(flatten)]
    pub reminder: ReminderSettings,
    pub medicine: Option<String>,
    pub period_value: Option<u32>,
    pub period_unit: Option<PeriodUnit>,
    pub next_vaccination_date: Option<DateTime<Utc>>,
}

/// Body shared by create and update of a parasite treatment
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRequestBody {
    pub pet_id: ID,
    pub title: String,
    pub event_date: DateTime<Utc>,
    #[serde(flatten)]
    pub reminder: ReminderSettings,
    pub remedy: Option<String>,
    pub parasite: Option<String>,
    pub period_value: Option<u32>,
    pub period_unit: Option<PeriodUnit>,
    pub next_treatment_date: Option<DateTime<Utc>>,
}

pub mod create_doctor_visit {
    use super::*;

    pub type RequestBody = DoctorVisitRequestBody;
    /// Id of the created event
    pub type APIResponse = ID;
}

pub mod get_doctor_visit {
    use super::*;

    pub type PathParams = EventPathParams;
    pub type APIResponse = DoctorVisitDTO;
}

pub mod update_doctor_visit {
    use super::*;

    pub type PathParams = EventPathParams;
    pub type RequestBody = DoctorVisitRequestBody;
    pub type APIResponse = serde_json::Value;
}

pub mod delete_doctor_visit {
    use super::*;

    pub type PathParams = EventPathParams;
    pub type APIResponse = serde_json::Value;
}

pub mod create_vaccine {
    use super::*;

    pub type RequestBody = VaccineRequestBody;
    pub type APIResponse = ID;
}

pub mod get_vaccine {
    use super::*;

    pub type PathParams = EventPathParams;
    pub type APIResponse = VaccineDTO;
}

pub mod update_vaccine {
    use super::*;

    pub type PathParams = EventPathParams;
    pub type RequestBody = VaccineRequestBody;
    pub type APIResponse = serde_json::Value;
}

pub mod delete_vaccine {
    use super::*;

    pub type PathParams = EventPathParams;
    pub type APIResponse = serde_json::Value;
}

pub mod create_treatment {
    use super::*;

    pub type RequestBody = TreatmentRequestBody;
    pub type APIResponse = ID;
}

pub mod get_treatment {
    use super::*;

    pub type PathParams = EventPathParams;
    pub type APIResponse = TreatmentDTO;
}

pub mod update_treatment {
    use super::*;

    pub type PathParams = EventPathParams;
    pub type RequestBody = TreatmentRequestBody;
    pub type APIResponse = serde_json::Value;
}

pub mod delete_treatment {
    use super::*;

    pub type PathParams = EventPathParams;
    pub type APIResponse = serde_json::Value;
}

pub mod get_upcoming_events {
    use super::*;

    pub type PathParams = PetEventsPathParams;
    pub type APIResponse = Vec<EventSummaryDTO>;
}

pub mod get_past_events {
    use super::*;

    pub type PathParams = PetEventsPathParams;
    pub type APIResponse = Vec<EventSummaryDTO>;
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn vaccine_body_matches_api_shape() {
        let body = VaccineRequestBody {
            pet_id: ID::new(1),
            title: "Vaccination".into(),
            event_date: Utc.with_ymd_and_hms(2025, 9, 21, 13, 0, 0).unwrap(),
            reminder: ReminderSettings::disabled(),
            medicine: None,
            period_value: Some(1),
            period_unit: Some(PeriodUnit::Year),
            next_vaccination_date: Some(Utc.with_ymd_and_hms(2026, 9, 21, 13, 0, 0).unwrap()),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "petId": 1,
                "title": "Vaccination",
                "eventDate": "2025-09-21T13:00:00Z",
                "reminderEnabled": false,
                "reminderValue": 0,
                "reminderUnit": 0,
                "medicine": null,
                "periodValue": 1,
                "periodUnit": 5,
                "nextVaccinationDate": "2026-09-21T13:00:00Z",
            })
        );
    }

    #[test]
    fn parses_mixed_event_list() {
        let json = r#"[
            {
                "id": 1,
                "type": "vaccine",
                "title": "Tuberculosis vaccination",
                "eventDate": "2025-09-21T13:00:00Z",
                "reminderEnabled": true,
                "medicine": "BCG",
                "nextVaccinationDate": "2026-09-21T13:00:00Z"
            },
            {
                "id": 2,
                "type": "doctor-visit",
                "title": "",
                "eventDate": "2025-09-25T10:00:00Z",
                "reminderEnabled": false,
                "clinic": "Vet clinic"
            },
            {
                "id": 3,
                "type": "grooming",
                "eventDate": "2025-10-01T14:00:00Z"
            }
        ]"#;
        let events: get_upcoming_events::APIResponse = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].subtitle(), Some("BCG"));
        assert!(events[0].next_date().is_some());
        assert_eq!(events[1].display_title(), "Doctor visit");
        assert_eq!(events[1].route("?id=4").as_deref(), Some("/doctor-visit/2?id=4"));
        assert_eq!(events[2].kind(), None);
        assert_eq!(events[2].display_title(), "Procedure");
        assert_eq!(events[2].route(""), None);
    }
}
