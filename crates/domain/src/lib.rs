pub mod date;
mod event;
mod pet;
mod reminder;
mod shared;

pub use event::{
    event_type_name, next_due_date, DoctorVisit, EventKind, InvalidEventKindError, MedicalEvent,
    Treatment, Vaccine,
};
pub use pet::{
    check_photo_capacity, content_type_for_file_name, validate_photo, Pet, PetChanges, PetForm,
    Photo, PhotoValidationError, ACCEPTED_PHOTO_TYPES, MAX_PHOTOS, MAX_PHOTO_SIZE,
};
pub use reminder::{ReminderPreset, ReminderSettings, REMINDER_PRESETS};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::form::non_empty;
pub use shared::period::{InvalidPeriodUnitError, PeriodUnit};
pub use shared::recurrence::{next_occurrence, Recurrence};
