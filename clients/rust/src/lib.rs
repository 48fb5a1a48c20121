mod base;
mod event;
mod notify;
mod pet;
mod shared;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use event::MedicalEventClient;
pub use event::{DoctorVisitInput, EventInput, TreatmentInput, VaccineInput};
pub use notify::PetChanged;
use notify::PetChangeNotifier;
use pet::PetClient;
pub use pet::{CreatePetInput, UpdatePhotosInput, UploadPhotoInput};
pub use shared::PhotoFile;
use std::sync::Arc;
use tokio::sync::broadcast;

pub use chrono_tz::Tz;
pub use petcare_api_structs::dtos::*;
pub use petcare_domain::{
    EventKind, MedicalEvent, PeriodUnit, PetChanges, PetForm, Recurrence, ReminderSettings, ID,
};

// Domain
pub use petcare_api_structs::dtos::EventSummaryDTO as EventSummary;
pub use petcare_api_structs::dtos::PetDTO as Pet;
pub use petcare_api_structs::dtos::PhotoDTO as Photo;

/// Pet change notifications that were not received yet are dropped once
/// this many newer ones are queued
const PET_CHANGES_CAPACITY: usize = 16;

/// Petcare SDK
///
/// The SDK contains methods for interacting with the Petcare server api.
#[derive(Clone)]
pub struct PetcareSDK {
    pub pet: PetClient,
    pub event: MedicalEventClient,
    base: Arc<BaseClient>,
    notifier: PetChangeNotifier,
}

impl PetcareSDK {
    pub fn new<T: Into<String>>(address: T) -> Self {
        let base = Arc::new(BaseClient::new(address.into()));
        let notifier = PetChangeNotifier::new(PET_CHANGES_CAPACITY);
        let pet = PetClient::new(base.clone(), notifier.clone());
        let event = MedicalEventClient::new(base.clone());

        Self {
            pet,
            event,
            base,
            notifier,
        }
    }

    /// Receives a `PetChanged` every time this sdk (or a clone of it)
    /// successfully changes a pet
    pub fn subscribe_pet_changes(&self) -> broadcast::Receiver<PetChanged> {
        self.notifier.subscribe()
    }

    /// Absolute url of a photo
    pub fn photo_url(&self, photo: &Photo) -> String {
        photo.resolve_url(self.base.address())
    }
}
