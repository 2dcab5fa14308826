use std::io;

use anyhow::{Context, Result};
use decades_player::{DecadesPlayer, SpotifyClient};
use radio_controls::PowerButton;
use time_travel_radio::config::Config;
use time_travel_radio::{control, init_tracing};
use tracing::{info, warn};

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_level);
    config.print_summary();

    // Watcher runs until the process exits
    let _power_button = match config.power_button_pin {
        Some(pin) => Some(
            PowerButton::watch(pin, config.shutdown_hold, config.shutdown_command.clone())
                .with_context(|| format!("Failed to arm power button on GPIO {}", pin))?,
        ),
        None => None,
    };

    let playlists = config.playlists()?;
    let client = SpotifyClient::from_env().context("Failed to authorize with Spotify")?;
    let player = DecadesPlayer::new(client, playlists, &config.device_name)
        .with_context(|| format!("Failed to find device '{}'", config.device_name))?;
    info!("Ready to play on '{}'", config.device_name);

    let result = control::run(&player, &mut io::stdin().lock(), &mut io::stdout());
    if let Err(e) = &result {
        warn!("Control loop ended: {:#}", e);
    }
    result
}
