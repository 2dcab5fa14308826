//! Access token sources for the Web API client
//!
//! The authorization-code flow happens out of band and leaves a JSON token
//! cache on disk, in the layout `spotipy` writes.
//! This module reads that cache, refreshes the access token with the stored
//! refresh token when it expires, and writes the refreshed token back.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SpotifyError};

/// Scopes the radio needs: read devices and control playback
pub const SCOPE: &str = "user-read-private user-read-playback-state user-modify-playback-state";

/// Accounts service endpoint used for refresh-token grants
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Default location of the token cache, relative to the working directory
pub const DEFAULT_CACHE_PATH: &str = ".cache";

// Refresh a little before the service would reject the token.
const EXPIRY_MARGIN_SECS: u64 = 60;

/// Something that can hand out a bearer token for the next request
pub trait TokenProvider: Send + Sync {
    /// Return a currently valid access token
    fn access_token(&self) -> Result<String>;
}

/// A fixed token, e.g. from `SPOTIFY_ACCESS_TOKEN` or in tests
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> Result<String> {
        if self.0.is_empty() {
            return Err(SpotifyError::Auth("access token is empty".to_string()));
        }
        Ok(self.0.clone())
    }
}

/// Token cache entry as written by the out-of-band authorization step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    /// Unix timestamp (seconds) after which the access token is invalid
    #[serde(default)]
    pub expires_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenInfo {
    /// Whether the token should be refreshed at `now` (unix seconds)
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at <= now.saturating_add(EXPIRY_MARGIN_SECS)
    }

    /// Read a token cache file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SpotifyError::Auth(format!("cannot read token cache {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            SpotifyError::Parse(format!("invalid token cache {}: {}", path.display(), e))
        })
    }

    /// Write the token back to the cache file
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string(self).map_err(|e| SpotifyError::Parse(e.to_string()))?;
        std::fs::write(path, text).map_err(|e| {
            SpotifyError::Auth(format!("cannot write token cache {}: {}", path.display(), e))
        })
    }
}

/// Application credentials needed for refresh-token grants
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    /// Read `SPOTIPY_CLIENT_ID` and `SPOTIPY_CLIENT_SECRET`
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("SPOTIPY_CLIENT_ID").ok()?;
        let client_secret = std::env::var("SPOTIPY_CLIENT_SECRET").ok()?;
        Some(Self {
            client_id,
            client_secret,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    expires_in: u64,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// Token backed by an on-disk cache, refreshed on expiry
pub struct CachedToken {
    cache_path: PathBuf,
    credentials: Option<ClientCredentials>,
    token_url: String,
    agent: ureq::Agent,
    token: Mutex<TokenInfo>,
}

impl CachedToken {
    /// Load the cache at `cache_path`
    ///
    /// Fails if the cache is missing or unreadable; creating it is part of
    /// the out-of-band authorization setup.
    pub fn open(
        cache_path: impl Into<PathBuf>,
        credentials: Option<ClientCredentials>,
        agent: ureq::Agent,
    ) -> Result<Self> {
        let cache_path = cache_path.into();
        let token = TokenInfo::load(&cache_path)?;
        debug!(path = %cache_path.display(), expires_at = token.expires_at, "Loaded token cache");

        Ok(Self {
            cache_path,
            credentials,
            token_url: TOKEN_URL.to_string(),
            agent,
            token: Mutex::new(token),
        })
    }

    /// Point refresh requests at a different accounts endpoint
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    fn refresh(&self, current: &TokenInfo) -> Result<TokenInfo> {
        let refresh_token = current.refresh_token.as_deref().ok_or_else(|| {
            SpotifyError::Auth("access token expired and no refresh token is cached".to_string())
        })?;
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            SpotifyError::Auth(
                "access token expired; set SPOTIPY_CLIENT_ID and SPOTIPY_CLIENT_SECRET to refresh it"
                    .to_string(),
            )
        })?;

        info!("Refreshing Spotify access token");
        let response = self
            .agent
            .post(&self.token_url)
            .send_form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
            ])
            .map_err(|e| match e {
                ureq::Error::Status(status, response) => SpotifyError::Auth(format!(
                    "token refresh rejected with HTTP {}: {}",
                    status,
                    response.into_string().unwrap_or_default()
                )),
                ureq::Error::Transport(transport) => SpotifyError::Network(transport.to_string()),
            })?;

        let refreshed: RefreshResponse = response
            .into_json()
            .map_err(|e| SpotifyError::Parse(e.to_string()))?;

        Ok(TokenInfo {
            access_token: refreshed.access_token,
            token_type: refreshed.token_type,
            expires_in: refreshed.expires_in,
            expires_at: unix_now().saturating_add(refreshed.expires_in),
            refresh_token: refreshed
                .refresh_token
                .or_else(|| current.refresh_token.clone()),
            scope: refreshed.scope.unwrap_or_else(|| current.scope.clone()),
        })
    }
}

impl TokenProvider for CachedToken {
    fn access_token(&self) -> Result<String> {
        let mut token = self
            .token
            .lock()
            .map_err(|_| SpotifyError::Auth("token cache lock poisoned".to_string()))?;

        if !token.is_expired_at(unix_now()) {
            return Ok(token.access_token.clone());
        }

        let refreshed = self.refresh(&token)?;
        if let Err(e) = refreshed.save(&self.cache_path) {
            warn!("Refreshed token could not be cached: {}", e);
        }
        *token = refreshed;
        Ok(token.access_token.clone())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
