use thiserror::Error;

/// Errors that can occur when using the codemyth-client library.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A required input was missing or empty. Never retried.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The connection failed, the initial response status was non-success,
    /// or the stream closed before a terminal frame arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend reported a failure inside the stream (a `status: "error"` frame).
    #[error("Backend error: {0}")]
    Backend(String),

    /// The GitHub API rejected a request.
    #[error("GitHub API error ({status}): {message}")]
    Github { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Streaming error: {0}")]
    Streaming(String),
}

impl Error {
    pub fn auth(message: impl Into<String>) -> Self {
        Error::Auth(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Error::Precondition(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport(message.into())
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Error::Backend(message.into())
    }

    pub fn github(status: u16, message: impl Into<String>) -> Self {
        Error::Github {
            status,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn streaming(message: impl Into<String>) -> Self {
        Error::Streaming(message.into())
    }
}
