//! Print the decade the dial points at, once a second
//!
//! The dial positions are the labels of the configured playlist table
//! (`RADIO_PLAYLISTS`, or the built-in decades).
//!
//! ```bash
//! cargo run -p time-travel-radio --example read_dial
//! ```

use std::thread;
use std::time::Duration;

use anyhow::Result;
use radio_controls::{Ads7830, DecadesDial, DEFAULT_BUS};
use time_travel_radio::config::Config;
use time_travel_radio::init_tracing;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_level);

    let playlists = config.playlists()?;
    let mut dial = DecadesDial::new(Ads7830::open(DEFAULT_BUS)?, playlists.labels())?;

    loop {
        println!("Dial is on the {}", dial.read_decade()?);
        thread::sleep(Duration::from_secs(1));
    }
}
