//! Generation broker: provider routing plus the structured-output
//! validation and repair loop

pub mod phrases;
pub mod repair;
pub mod service;

pub use phrases::{strip_code_fences, validate_phrases, ValidationError, PHRASE_FIELDS};
pub use repair::{build_repair_prompt, ensure_phrases, REPAIR_TEMPERATURE};
pub use service::GenerationService;

use crate::protocol::RequestError;
use crate::providers::ProviderError;
use thiserror::Error;

/// Status reported when a failure carries no upstream status of its own
pub const SERVER_ERROR_STATUS: u16 = 500;
/// Status reported for requests rejected at ingress
pub const UNPROCESSABLE_STATUS: u16 = 422;

/// Failure of a generation request as seen by the caller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("{0}")]
    InvalidRequest(#[from] RequestError),

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl GenerationError {
    /// HTTP status for the caller: the upstream status when the router saw
    /// one, otherwise a generic server error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => UNPROCESSABLE_STATUS,
            Self::Provider(err) => err.status_code.unwrap_or(SERVER_ERROR_STATUS),
            Self::Validation(_) => SERVER_ERROR_STATUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GenerationError::from(ProviderError::upstream(401, "bad key")).status_code(),
            401
        );
        assert_eq!(
            GenerationError::from(ProviderError::configuration("missing")).status_code(),
            500
        );
        assert_eq!(
            GenerationError::from(ProviderError::no_providers()).status_code(),
            500
        );
        assert_eq!(
            GenerationError::from(ValidationError::NotAnArray).status_code(),
            500
        );
        assert_eq!(
            GenerationError::from(RequestError::EmptyPrompt).status_code(),
            422
        );
    }

    #[test]
    fn test_message_is_passed_through() {
        let err = GenerationError::from(ProviderError::upstream(503, "overloaded"));
        assert_eq!(err.to_string(), "overloaded");
        assert_eq!(
            GenerationError::from(ValidationError::NotAnArray).to_string(),
            "Expected a JSON array"
        );
    }
}
