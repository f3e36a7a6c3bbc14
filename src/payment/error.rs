use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("Payment API key is not configured")]
    MissingCredential,
    #[error("Charge amount must be positive")]
    InvalidAmount,
    #[error("Payment request failed: {0}")]
    Transport(String),
    #[error("Payment provider error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Malformed payment response: {0}")]
    MalformedResponse(String),
    #[error("Payment response is missing `{0}`")]
    MissingField(String),
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        PaymentError::Transport(err.to_string())
    }
}
