//! Remote playback service seam

use spotify_client::{Device, SpotifyClient, SpotifyError};

/// The three remote calls the player needs
///
/// Implemented by [`SpotifyClient`]; tests substitute a recording mock.
pub trait PlaybackService {
    /// Devices currently available to the account
    fn devices(&self) -> Result<Vec<Device>, SpotifyError>;

    /// Start playing `context_uri` on `device_id`
    fn start_playback(&self, device_id: &str, context_uri: &str) -> Result<(), SpotifyError>;

    /// Set the volume of `device_id`
    fn set_volume(&self, device_id: &str, level: i64) -> Result<(), SpotifyError>;
}

impl PlaybackService for SpotifyClient {
    fn devices(&self) -> Result<Vec<Device>, SpotifyError> {
        SpotifyClient::devices(self)
    }

    fn start_playback(&self, device_id: &str, context_uri: &str) -> Result<(), SpotifyError> {
        SpotifyClient::start_playback(self, device_id, context_uri)
    }

    fn set_volume(&self, device_id: &str, level: i64) -> Result<(), SpotifyError> {
        SpotifyClient::set_volume(self, level, device_id)
    }
}
