//! Command line arguments and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use decades_player::PlaylistTable;
use radio_controls::{ShutdownCommand, DEFAULT_HOLD_TIME};
use tracing::info;

/// Device played on when no name is given
pub const DEFAULT_DEVICE_NAME: &str = "Brandon's Raspberry Pi";

/// Time Travel Radio
///
/// Resolves a Spotify device by name, then loops asking whether to change
/// the decade or the volume.
#[derive(Parser, Debug)]
#[command(name = "time-travel-radio")]
#[command(about = "Play a decade of music on a Spotify device")]
#[command(version)]
pub struct Args {
    /// Name of device
    #[arg(default_value = DEFAULT_DEVICE_NAME)]
    pub device_name: String,
}

/// Configuration derived from the command line and environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub device_name: String,
    pub log_level: String,
    pub playlists_path: Option<PathBuf>,
    pub power_button_pin: Option<u8>,
    pub shutdown_hold: Duration,
    pub shutdown_command: ShutdownCommand,
}

impl Config {
    /// Parse the command line and apply environment overrides
    pub fn from_env() -> Result<Self> {
        Self::from_parts(Args::parse(), |key| std::env::var(key).ok())
    }

    /// Build the configuration from parsed arguments and an environment lookup
    pub fn from_parts<F>(args: Args, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = env("RADIO_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        match log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                    log_level
                ));
            }
        }

        let power_button_pin = env("RADIO_POWER_BUTTON_PIN")
            .map(|pin| pin.parse::<u8>())
            .transpose()
            .context("Invalid RADIO_POWER_BUTTON_PIN environment variable")?;

        let shutdown_hold = match env("RADIO_SHUTDOWN_HOLD_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .context("Invalid RADIO_SHUTDOWN_HOLD_SECS environment variable")?,
            ),
            None => DEFAULT_HOLD_TIME,
        };

        let shutdown_command = match env("RADIO_SHUTDOWN_COMMAND") {
            Some(line) => ShutdownCommand::parse(&line)
                .context("RADIO_SHUTDOWN_COMMAND must not be empty")?,
            None => ShutdownCommand::default(),
        };

        Ok(Self {
            device_name: args.device_name,
            log_level,
            playlists_path: env("RADIO_PLAYLISTS").map(PathBuf::from),
            power_button_pin,
            shutdown_hold,
            shutdown_command,
        })
    }

    /// The playlist table: `RADIO_PLAYLISTS` if set, otherwise the built-in decades
    pub fn playlists(&self) -> Result<PlaylistTable> {
        match &self.playlists_path {
            Some(path) => PlaylistTable::load(path)
                .with_context(|| format!("Failed to load playlists from {}", path.display())),
            None => Ok(PlaylistTable::decades()),
        }
    }

    /// Log the configuration summary
    pub fn print_summary(&self) {
        info!("Configuration:");
        info!("  Device name: {}", self.device_name);
        info!("  Log level: {}", self.log_level);
        match &self.playlists_path {
            Some(path) => info!("  Playlists: {}", path.display()),
            None => info!("  Playlists: built-in decades"),
        }
        match self.power_button_pin {
            Some(pin) => info!(
                "  Power button: GPIO {} (hold {}s)",
                pin,
                self.shutdown_hold.as_secs()
            ),
            None => info!("  Power button: disabled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(args: &[&str], vars: &[(&str, &str)]) -> Result<Config> {
        let args = Args::try_parse_from(args)?;
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_parts(args, |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&["time-travel-radio"], &[]).unwrap();
        assert_eq!(config.device_name, "Brandon's Raspberry Pi");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.power_button_pin, None);
        assert_eq!(config.shutdown_hold, Duration::from_secs(5));
        assert_eq!(config.shutdown_command, ShutdownCommand::default());
        assert_eq!(config.playlists().unwrap(), PlaylistTable::decades());
    }

    #[test]
    fn test_positional_device_name() {
        let config = config(&["time-travel-radio", "Living Room"], &[]).unwrap();
        assert_eq!(config.device_name, "Living Room");
    }

    #[test]
    fn test_environment_overrides() {
        let config = config(
            &["time-travel-radio"],
            &[
                ("RADIO_LOG_LEVEL", "debug"),
                ("RADIO_POWER_BUTTON_PIN", "3"),
                ("RADIO_SHUTDOWN_HOLD_SECS", "2"),
                ("RADIO_SHUTDOWN_COMMAND", "systemctl poweroff"),
            ],
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.power_button_pin, Some(3));
        assert_eq!(config.shutdown_hold, Duration::from_secs(2));
        assert_eq!(config.shutdown_command.program(), "systemctl");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config(&["time-travel-radio"], &[("RADIO_LOG_LEVEL", "loud")]).is_err());
        assert!(config(&["time-travel-radio"], &[("RADIO_POWER_BUTTON_PIN", "x")]).is_err());
        assert!(config(&["time-travel-radio"], &[("RADIO_SHUTDOWN_COMMAND", " ")]).is_err());
    }

    #[test]
    fn test_flags_are_not_accepted() {
        assert!(Args::try_parse_from(["time-travel-radio", "--volume", "5"]).is_err());
    }

    #[test]
    fn test_missing_playlist_file_is_reported() {
        let config = config(
            &["time-travel-radio"],
            &[("RADIO_PLAYLISTS", "/nonexistent/playlists.json")],
        )
        .unwrap();
        let error = config.playlists().unwrap_err();
        assert!(error.to_string().contains("/nonexistent/playlists.json"));
    }
}
