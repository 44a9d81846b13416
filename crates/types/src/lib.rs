//! Shared data model for the Anmeldung registration service.
//!
//! Every other crate in the workspace speaks in terms of [`RegistrationRecord`],
//! the persisted shape of a single student registration.

pub mod field;
pub mod record;
pub mod school;

pub use field::{RecordField, UnknownField};
pub use record::{RegistrationRecord, scalar_to_string};
pub use school::{InvalidSchoolType, SchoolType};
