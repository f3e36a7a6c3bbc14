use thiserror::Error;
use crate::genai::GenAiError;
use crate::order_actor::OrderError;
use crate::payment::PaymentError;
use crate::user_actor::UserError;
use crate::voice_actor::VoiceActorError;

/// Top-level error: whatever a request flow can surface to the user.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    VoiceActor(#[from] VoiceActorError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    GenAi(#[from] GenAiError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
