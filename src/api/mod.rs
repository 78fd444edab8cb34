//! HTTP surface: one handler per endpoint, a shared store context,
//! and error-to-status mapping.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::clinic_router;
pub use types::ApiContext;
