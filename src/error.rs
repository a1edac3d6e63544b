// Error taxonomy shared by sources, the sampler and actions.

use thiserror::Error;

/// Failure of a single GET-and-decode round trip.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("transport: {0}")]
    Transport(String),
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Transport(e.to_string()),
        }
    }
}

/// Why an action did not render its success markup.
#[derive(Debug, Error)]
pub enum ActionError {
    /// User input rejected before any request was made.
    #[error("invalid input: {0}")]
    Invalid(&'static str),
    /// The collaborator answered, but had nothing for this request.
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The response decoded but lacked an expected field.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl ActionError {
    /// Message shown to the user; fetch and shape failures collapse into `failure`.
    pub fn user_message(&self, failure: &'static str) -> &'static str {
        match self {
            ActionError::Invalid(msg) | ActionError::NotFound(msg) => *msg,
            ActionError::Fetch(_) | ActionError::Shape(_) => failure,
        }
    }
}
