mod event;
mod pet;

pub mod dtos {
    pub use crate::event::dtos::*;
    pub use crate::pet::dtos::*;
}

pub use crate::event::api::*;
pub use crate::pet::api::*;
