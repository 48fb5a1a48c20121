pub mod fake_api;
pub mod setup;
pub mod utils;
