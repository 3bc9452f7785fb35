use thiserror::Error;

use crate::validation::FieldErrors;

/// Failure of the outbound signup call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("Signup request failed: {0}")]
    Network(String),
    #[error("Signup request timed out")]
    Timeout,
    #[error("Signup endpoint answered with status {status}")]
    Status { status: u16, body: String },
}

/// Crate-level failures. Transport failures are logged by the form service
/// rather than returned, so they have no variant here.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SignupError {
    #[error("Signup validation error: {0}")]
    Validation(FieldErrors),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
    #[error("Invalid signup configuration: {0}")]
    Config(String),
}

impl From<FieldErrors> for SignupError {
    fn from(errors: FieldErrors) -> Self {
        SignupError::Validation(errors)
    }
}
