//! API endpoint handlers, one module per entity.

pub mod appointments;
pub mod doctors;
pub mod patients;
