pub mod entity;
pub mod form;
pub mod period;
pub mod recurrence;
