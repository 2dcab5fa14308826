//! # Decades Player
//!
//! Plays a curated playlist for a decade on a named Spotify device.
//!
//! ```text
//! decades-player (DecadesPlayer, PlaylistTable)
//!     ↓
//! PlaybackService (devices / start_playback / set_volume)
//!     ↓
//! spotify-client (blocking Web API calls)
//! ```
//!
//! The playlist table is plain configuration handed to the player; the
//! built-in [`PlaylistTable::decades`] covers the 1920s through the 2010s.

pub use error::{PlayerError, Result};
pub use player::DecadesPlayer;
pub use playlists::{PlaylistEntry, PlaylistTable};
pub use selection::{find_device_id, format_device_list};
pub use service::PlaybackService;

pub use spotify_client::{Device, SpotifyClient, SpotifyError};

mod error;
mod player;
mod playlists;
mod selection;
mod service;
