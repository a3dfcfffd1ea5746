use thiserror::Error;

/// Why a gate check did not pass.
///
/// A missing server-side secret is a deployment problem and is kept apart
/// from a caller presenting the wrong credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("{0}")]
    NotConfigured(&'static str),
    #[error("Unauthorized")]
    Unauthorized,
}

impl From<GateError> for crate::errors::ServiceError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::NotConfigured(msg) => Self::NotConfigured(msg.to_string()),
            GateError::Unauthorized => Self::Unauthorized("Unauthorized".to_string()),
        }
    }
}
