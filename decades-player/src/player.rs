use tracing::{debug, info};

use crate::error::{PlayerError, Result};
use crate::playlists::PlaylistTable;
use crate::selection::find_device_id;
use crate::service::PlaybackService;

/// Plays decade playlists on one named device
///
/// The device is resolved once, at construction, and kept for the lifetime
/// of the player. Nothing is retried: a failed remote call is returned to
/// the caller as is.
///
/// # Example
///
/// ```rust,no_run
/// use decades_player::{DecadesPlayer, PlaylistTable};
/// use spotify_client::SpotifyClient;
///
/// let client = SpotifyClient::from_env()?;
/// let player = DecadesPlayer::new(client, PlaylistTable::decades(), "Brandon's Raspberry Pi")?;
///
/// player.play_music("1970s")?;
/// player.change_volume(60)?;
/// # Ok::<(), decades_player::PlayerError>(())
/// ```
#[derive(Debug)]
pub struct DecadesPlayer<S: PlaybackService> {
    service: S,
    playlists: PlaylistTable,
    device_id: String,
}

impl<S: PlaybackService> DecadesPlayer<S> {
    /// Resolve `device_name` on `service` and create the player
    pub fn new(service: S, playlists: PlaylistTable, device_name: &str) -> Result<Self> {
        let devices = service.devices()?;
        let device_id = find_device_id(&devices, device_name)?;
        info!(device = device_name, device_id = %device_id, "Resolved playback device");

        Ok(Self {
            service,
            playlists,
            device_id,
        })
    }

    /// Start the playlist for `label` on the device
    pub fn play_music(&self, label: &str) -> Result<()> {
        let uri = self
            .playlists
            .get(label)
            .ok_or_else(|| PlayerError::UnknownLabel(label.to_string()))?;

        debug!(label, uri, "Playing decade");
        self.service.start_playback(&self.device_id, uri)?;
        info!("Now playing the {}", label);
        Ok(())
    }

    /// Set the device volume; the service decides whether `level` is valid
    pub fn change_volume(&self, level: i64) -> Result<()> {
        self.service.set_volume(&self.device_id, level)?;
        info!(level, "Volume changed");
        Ok(())
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn playlists(&self) -> &PlaylistTable {
        &self.playlists
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
