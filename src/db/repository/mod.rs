//! Repository layer — entity-scoped store operations.
//!
//! Every mutating operation runs inside a single transaction; an error
//! before commit rolls the whole request back.

mod appointments;
mod doctors;
mod patients;

pub use appointments::*;
pub use doctors::*;
pub use patients::*;
