//! Private Spotify Web API client for the radio
//!
//! This crate provides a minimal blocking client for the handful of player
//! endpoints the radio needs: listing the account's devices, starting a
//! playlist on a device and setting a device's volume.

mod auth;
mod error;

pub use auth::{
    CachedToken, ClientCredentials, StaticToken, TokenInfo, TokenProvider, DEFAULT_CACHE_PATH,
    SCOPE, TOKEN_URL,
};
pub use error::{Result, SpotifyError};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Base URL of the Web API
pub const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// A playback device as reported by `GET /me/player/devices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier; restricted devices may report none
    pub id: Option<String>,
    /// Human-readable device name
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(rename = "type", default)]
    pub device_type: String,
    #[serde(default)]
    pub volume_percent: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DevicesResponse {
    devices: Vec<Device>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorObject,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    message: String,
}

/// A minimal blocking client for the Spotify Web API
#[derive(Clone)]
pub struct SpotifyClient {
    agent: ureq::Agent,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl SpotifyClient {
    /// Create a client that authorizes requests with `tokens`
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            agent: default_agent(),
            base_url: API_BASE_URL.to_string(),
            tokens,
        }
    }

    /// Create a client from the environment
    ///
    /// Uses `SPOTIFY_ACCESS_TOKEN` when set; otherwise loads the token cache
    /// at `SPOTIPY_CACHE_PATH` (default `.cache`) and refreshes it with
    /// `SPOTIPY_CLIENT_ID` / `SPOTIPY_CLIENT_SECRET` when it has expired.
    pub fn from_env() -> Result<Self> {
        if let Ok(token) = std::env::var("SPOTIFY_ACCESS_TOKEN") {
            debug!("Using access token from SPOTIFY_ACCESS_TOKEN");
            return Ok(Self::new(Arc::new(StaticToken::new(token))));
        }

        let cache_path = std::env::var("SPOTIPY_CACHE_PATH")
            .unwrap_or_else(|_| DEFAULT_CACHE_PATH.to_string());
        let cached = CachedToken::open(cache_path, ClientCredentials::from_env(), default_agent())?;
        Ok(Self::new(Arc::new(cached)))
    }

    /// Send requests to a different API root (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// List the devices currently available to the account
    pub fn devices(&self) -> Result<Vec<Device>> {
        let response = self
            .request("GET", "/me/player/devices")?
            .call()
            .map_err(map_ureq_error)?;

        let body: DevicesResponse = response
            .into_json()
            .map_err(|e| SpotifyError::Parse(e.to_string()))?;

        debug!("Spotify reported {} device(s)", body.devices.len());
        Ok(body.devices)
    }

    /// Start playback of `context_uri` (album, artist or playlist) on a device
    pub fn start_playback(&self, device_id: &str, context_uri: &str) -> Result<()> {
        debug!(device_id, context_uri, "Starting playback");
        self.request("PUT", "/me/player/play")?
            .query("device_id", device_id)
            .send_json(serde_json::json!({ "context_uri": context_uri }))
            .map_err(map_ureq_error)?;
        Ok(())
    }

    /// Set the volume of a device
    ///
    /// The value is passed through unchecked; the service rejects anything
    /// outside 0-100.
    pub fn set_volume(&self, volume_percent: i64, device_id: &str) -> Result<()> {
        debug!(device_id, volume_percent, "Setting volume");
        self.request("PUT", "/me/player/volume")?
            .query("volume_percent", &volume_percent.to_string())
            .query("device_id", device_id)
            .send_string("")
            .map_err(map_ureq_error)?;
        Ok(())
    }

    fn request(&self, method: &str, path: &str) -> Result<ureq::Request> {
        let token = self.tokens.access_token()?;
        let url = format!("{}{}", self.base_url, path);
        Ok(self
            .agent
            .request(method, &url)
            .set("Authorization", &format!("Bearer {}", token)))
    }
}

impl fmt::Debug for SpotifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn default_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(5))
        .timeout_read(Duration::from_secs(10))
        .build()
}

fn map_ureq_error(error: ureq::Error) -> SpotifyError {
    match error {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            let message = error_message(&body).unwrap_or(body);
            SpotifyError::Api { status, message }
        }
        ureq::Error::Transport(transport) => SpotifyError::Network(transport.to_string()),
    }
}

/// Extract the message from a `{"error": {"status", "message"}}` body
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_api_error_object() {
        let body = r#"{"error": {"status": 400, "message": "Invalid volume_percent"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("Invalid volume_percent"));
    }

    #[test]
    fn test_error_message_from_unexpected_body() {
        assert_eq!(error_message("Bad Gateway"), None);
        assert_eq!(error_message(r#"{"error": "invalid_grant"}"#), None);
    }

    #[test]
    fn test_device_without_id_deserializes() {
        let json = r#"{"id": null, "is_active": false, "is_restricted": true,
            "name": "Kitchen", "type": "Speaker", "volume_percent": null}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.id, None);
        assert_eq!(device.name, "Kitchen");
        assert_eq!(device.device_type, "Speaker");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = SpotifyClient::new(Arc::new(StaticToken::new("t")))
            .with_base_url("http://127.0.0.1:1234/");
        assert_eq!(client.base_url, "http://127.0.0.1:1234");
    }
}
