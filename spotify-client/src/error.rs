//! Error types for the Web API client

use thiserror::Error;

/// Errors that can occur while talking to the Spotify Web API
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Network or HTTP transport error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("JSON parsing error: {0}")]
    Parse(String),

    /// Error object returned by the service
    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// No usable access token
    #[error("Authorization error: {0}")]
    Auth(String),
}

impl SpotifyError {
    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            SpotifyError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Type alias for results that can return a SpotifyError
pub type Result<T> = std::result::Result<T, SpotifyError>;
