use crate::actor_framework::FrameworkError;
use crate::order_form::FormErrors;
use crate::payment::PaymentError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid voice actor: {0}")]
    InvalidVoiceActor(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error(transparent)]
    InvalidForm(#[from] FormErrors),
    #[error("Order rejected: {0}")]
    Rejected(String),
    #[error("Not allowed: {0}")]
    Forbidden(String),
    #[error("A submission is already in progress")]
    AlreadyPending,
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Rejected(msg) => OrderError::Rejected(msg),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
