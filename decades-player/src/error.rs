use spotify_client::SpotifyError;
use thiserror::Error;

/// Errors raised while resolving the device or controlling playback
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The service reports no devices at all
    #[error("No active devices")]
    NoActiveDevice,

    /// None of the reported devices has the requested name
    #[error("No active device named {name}. Available devices:\n{available}")]
    DeviceNotFound { name: String, available: String },

    /// The label has no playlist
    #[error("Invalid decade: {0}")]
    UnknownLabel(String),

    /// The playlist table itself is malformed
    #[error("Invalid playlist table: {0}")]
    InvalidPlaylists(String),

    /// Any failure surfaced by the streaming service
    #[error("Spotify error: {0}")]
    Service(#[from] SpotifyError),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
