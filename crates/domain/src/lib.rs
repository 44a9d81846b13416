//! Registration intake: body parsing, validation and the registration service.

pub mod body;
pub mod error;
pub mod service;
pub mod validator;

pub use body::{ParsedBody, Submission, parse_body};
pub use error::{IntakeError, Result};
pub use service::RegistrationService;
pub use validator::{CleanedRegistration, IntakeValidator, MAX_FIELD_CHARS};
