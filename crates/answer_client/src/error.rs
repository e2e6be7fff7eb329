use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed answer payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl AnswerError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, AnswerError>;
