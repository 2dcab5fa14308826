//! Play whatever decade the dial is turned to
//!
//! Resolves the device the same way the interactive radio does, then polls
//! the dial and starts the matching playlist each time it moves to a new
//! decade.
//!
//! ```bash
//! cargo run -p time-travel-radio --example dial_player -- "Living Room"
//! ```

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use decades_player::{DecadesPlayer, SpotifyClient};
use radio_controls::{Ads7830, DEFAULT_BUS};
use time_travel_radio::config::Config;
use time_travel_radio::init_tracing;
use time_travel_radio::tuner::DialTuner;

const DIAL_POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_level);

    let client = SpotifyClient::from_env().context("Failed to authorize with Spotify")?;
    let player = DecadesPlayer::new(client, config.playlists()?, &config.device_name)
        .with_context(|| format!("Failed to find device '{}'", config.device_name))?;

    let adc = Ads7830::open(DEFAULT_BUS).context("Failed to open the ADC")?;
    let mut tuner = DialTuner::new(adc, &player)?;

    loop {
        if let Some(decade) = tuner.tune(&player)? {
            println!("Now playing the {}", decade);
        }
        thread::sleep(DIAL_POLL_INTERVAL);
    }
}
