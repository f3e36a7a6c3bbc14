use crate::actor_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum VoiceActorError {
    #[error("Voice actor not found: {0}")]
    NotFound(String),
    #[error("Voice actor validation error: {0}")]
    ValidationError(String),
    #[error("Only administrators can manage voice actors")]
    Forbidden,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for VoiceActorError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => VoiceActorError::NotFound(id),
            FrameworkError::Rejected(msg) => VoiceActorError::ValidationError(msg),
            other => VoiceActorError::ActorCommunicationError(other.to_string()),
        }
    }
}
