//! Entity shapes and filter structs shared by the repository and API layers.

mod appointment;
mod doctor;
mod filters;
mod patient;

pub use appointment::*;
pub use doctor::*;
pub use filters::*;
pub use patient::*;
