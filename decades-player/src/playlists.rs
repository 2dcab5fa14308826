//! Decade label to playlist URI table

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, Result};

const DECADE_PLAYLISTS: [(&str, &str); 10] = [
    ("1920s", "spotify:playlist:7olpTqGzGrYuI76ZBlCLgs"),
    ("1930s", "spotify:playlist:6yY2tBY8976eFqsOIlBA0b"),
    ("1940s", "spotify:playlist:245g9upOJ2BLTCcKeFyRDf"),
    ("1950s", "spotify:playlist:5TLQjeDvm4igfsJgi6FaF7"),
    ("1960s", "spotify:playlist:37i9dQZF1DXaKIA8E7WcJj"),
    ("1970s", "spotify:playlist:37i9dQZF1DWTJ7xPn4vNaz"),
    ("1980s", "spotify:playlist:37i9dQZF1DX4UtSsGT1Sbe"),
    ("1990s", "spotify:playlist:37i9dQZF1DXbTxeAdrVG2l"),
    ("2000s", "spotify:playlist:2f6tXtN0XesjONxicAzMIw"),
    ("2010s", "spotify:playlist:3FeewjLi5LMzIpV4h35QEz"),
];

/// One row of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub label: String,
    pub uri: String,
}

/// Ordered, immutable mapping from decade label to playlist URI
///
/// The order is the dial order: the first entry is the lowest dial position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistTable {
    entries: Vec<PlaylistEntry>,
}

impl PlaylistTable {
    /// Build a table from `(label, uri)` pairs; labels must be unique
    pub fn new<I, L, U>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, U)>,
        L: Into<String>,
        U: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(label, uri)| PlaylistEntry {
                label: label.into(),
                uri: uri.into(),
            })
            .collect();
        Self::from_entries(entries)
    }

    /// The ten curated decade playlists, 1920s through 2010s
    pub fn decades() -> Self {
        Self {
            entries: DECADE_PLAYLISTS
                .iter()
                .map(|(label, uri)| PlaylistEntry {
                    label: label.to_string(),
                    uri: uri.to_string(),
                })
                .collect(),
        }
    }

    /// Parse a JSON array of `{"label": ..., "uri": ...}` objects
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<PlaylistEntry> =
            serde_json::from_str(json).map_err(|e| PlayerError::InvalidPlaylists(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Load a JSON playlist table from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            PlayerError::InvalidPlaylists(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    fn from_entries(entries: Vec<PlaylistEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(PlayerError::InvalidPlaylists("table is empty".to_string()));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|earlier| earlier.label == entry.label) {
                return Err(PlayerError::InvalidPlaylists(format!(
                    "duplicate label {}",
                    entry.label
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Playlist URI for `label`, if there is one
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.uri.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Labels in dial order
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PlaylistTable {
    fn default() -> Self {
        Self::decades()
    }
}
