use crate::base::{APIResponse, BaseClient};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use petcare_api_structs::*;
use petcare_domain::{
    next_due_date, non_empty, EventKind, MedicalEvent, Recurrence, ReminderSettings, ID,
};
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct MedicalEventClient {
    base: Arc<BaseClient>,
}

/// Fields every kind of medical event has
#[derive(Debug, Clone)]
pub struct EventInput {
    pub pet_id: ID,
    /// Blank titles are replaced by the default title of the event kind
    pub title: Option<String>,
    /// Wall clock time of the event. Its time zone is also the one used for
    /// the calendar arithmetic of the next due date.
    pub event_date: DateTime<Tz>,
    pub reminder: ReminderSettings,
}

impl EventInput {
    fn title(&self, kind: EventKind) -> String {
        kind.title_or_default(self.title.as_deref())
    }

    fn event_date_utc(&self) -> DateTime<Utc> {
        self.event_date.with_timezone(&Utc)
    }
}

#[derive(Debug, Clone)]
pub struct DoctorVisitInput {
    pub event: EventInput,
    pub clinic: Option<String>,
    pub doctor: Option<String>,
    pub diagnosis: Option<String>,
    pub recommendations: Option<String>,
    pub referrals: Option<String>,
}

impl DoctorVisitInput {
    fn into_body(self) -> DoctorVisitRequestBody {
        DoctorVisitRequestBody {
            pet_id: self.event.pet_id,
            title: self.event.title(EventKind::DoctorVisit),
            event_date: self.event.event_date_utc(),
            reminder: self.event.reminder.normalized(),
            clinic: non_empty(self.clinic),
            doctor: non_empty(self.doctor),
            diagnosis: non_empty(self.diagnosis),
            recommendations: non_empty(self.recommendations),
            referrals: non_empty(self.referrals),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VaccineInput {
    pub event: EventInput,
    pub medicine: Option<String>,
    pub period: Option<Recurrence>,
}

impl VaccineInput {
    fn into_body(self) -> VaccineRequestBody {
        VaccineRequestBody {
            pet_id: self.event.pet_id,
            title: self.event.title(EventKind::Vaccine),
            event_date: self.event.event_date_utc(),
            reminder: self.event.reminder.normalized(),
            medicine: non_empty(self.medicine),
            period_value: self.period.map(|p| p.value),
            period_unit: self.period.map(|p| p.unit),
            next_vaccination_date: next_due_date(&self.event.event_date, self.period),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreatmentInput {
    pub event: EventInput,
    pub remedy: Option<String>,
    pub parasite: Option<String>,
    pub period: Option<Recurrence>,
}

impl TreatmentInput {
    fn into_body(self) -> TreatmentRequestBody {
        TreatmentRequestBody {
            pet_id: self.event.pet_id,
            title: self.event.title(EventKind::Treatment),
            event_date: self.event.event_date_utc(),
            reminder: self.event.reminder.normalized(),
            remedy: non_empty(self.remedy),
            parasite: non_empty(self.parasite),
            period_value: self.period.map(|p| p.value),
            period_unit: self.period.map(|p| p.unit),
            next_treatment_date: next_due_date(&self.event.event_date, self.period),
        }
    }
}

fn event_path(kind: EventKind, event_id: ID) -> String {
    format!("api/{}/{}", kind.slug(), event_id)
}

impl MedicalEventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create_doctor_visit(
        &self,
        input: DoctorVisitInput,
    ) -> APIResponse<create_doctor_visit::APIResponse> {
        self.base
            .post(input.into_body(), "api/doctor-visit".into())
            .await
    }

    pub async fn get_doctor_visit(
        &self,
        event_id: ID,
    ) -> APIResponse<get_doctor_visit::APIResponse> {
        self.base
            .get(event_path(EventKind::DoctorVisit, event_id))
            .await
    }

    pub async fn update_doctor_visit(
        &self,
        event_id: ID,
        input: DoctorVisitInput,
    ) -> APIResponse<update_doctor_visit::APIResponse> {
        self.base
            .put(
                input.into_body(),
                event_path(EventKind::DoctorVisit, event_id),
            )
            .await
    }

    pub async fn create_vaccine(
        &self,
        input: VaccineInput,
    ) -> APIResponse<create_vaccine::APIResponse> {
        self.base
            .post(input.into_body(), "api/vaccine".into())
            .await
    }

    pub async fn get_vaccine(&self, event_id: ID) -> APIResponse<get_vaccine::APIResponse> {
        self.base
            .get(event_path(EventKind::Vaccine, event_id))
            .await
    }

    pub async fn update_vaccine(
        &self,
        event_id: ID,
        input: VaccineInput,
    ) -> APIResponse<update_vaccine::APIResponse> {
        self.base
            .put(input.into_body(), event_path(EventKind::Vaccine, event_id))
            .await
    }

    pub async fn create_treatment(
        &self,
        input: TreatmentInput,
    ) -> APIResponse<create_treatment::APIResponse> {
        self.base
            .post(input.into_body(), "api/treatment".into())
            .await
    }

    pub async fn get_treatment(&self, event_id: ID) -> APIResponse<get_treatment::APIResponse> {
        self.base
            .get(event_path(EventKind::Treatment, event_id))
            .await
    }

    pub async fn update_treatment(
        &self,
        event_id: ID,
        input: TreatmentInput,
    ) -> APIResponse<update_treatment::APIResponse> {
        self.base
            .put(input.into_body(), event_path(EventKind::Treatment, event_id))
            .await
    }

    /// Fetches an event of any kind
    pub async fn get(&self, kind: EventKind, event_id: ID) -> APIResponse<MedicalEvent> {
        let event: MedicalEvent = match kind {
            EventKind::DoctorVisit => self.get_doctor_visit(event_id).await?.into(),
            EventKind::Vaccine => self.get_vaccine(event_id).await?.into(),
            EventKind::Treatment => self.get_treatment(event_id).await?.into(),
        };
        Ok(event)
    }

    /// Deletes an event of any kind. The delete endpoints of all kinds
    /// share the same response.
    pub async fn delete(
        &self,
        kind: EventKind,
        event_id: ID,
    ) -> APIResponse<delete_doctor_visit::APIResponse> {
        self.base.delete(event_path(kind, event_id)).await
    }

    /// Upcoming events of a pet, soonest first as ordered by the server.
    /// A server without the events endpoint answers 404, which is treated
    /// as having no events.
    pub async fn upcoming(&self, pet_id: ID) -> APIResponse<get_upcoming_events::APIResponse> {
        match self
            .base
            .get(format!("api/events/upcoming/{}", pet_id))
            .await
        {
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                warn!(
                    "The upcoming events endpoint was not found, make sure the server exposes it"
                );
                Ok(Vec::new())
            }
            res => res,
        }
    }

    pub async fn past(&self, pet_id: ID) -> APIResponse<get_past_events::APIResponse> {
        self.base
            .get(format!("api/events/past/{}", pet_id))
            .await
    }
}
