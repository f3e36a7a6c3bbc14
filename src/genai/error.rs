use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenAiError {
    #[error("Generation API key is not configured")]
    MissingCredential,
    #[error("Generation request failed: {0}")]
    Transport(String),
    #[error("Generation API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),
    #[error("The model returned no text")]
    EmptyText,
    #[error("The model returned no audio")]
    MissingAudio,
    #[error("Audio encoding failed: {0}")]
    AudioEncoding(String),
}

impl From<reqwest::Error> for GenAiError {
    fn from(err: reqwest::Error) -> Self {
        GenAiError::Transport(err.to_string())
    }
}
