//! Arm the power button and wait
//!
//! Holding the button for five seconds runs `sudo shutdown -h now`. Pass a
//! BCM pin number as the first argument (default 3).
//!
//! ```bash
//! cargo run -p time-travel-radio-controls --example power_button -- 3
//! ```

use std::thread;

use radio_controls::{PowerButton, ShutdownCommand, DEFAULT_HOLD_TIME};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let pin: u8 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 3,
    };

    let _button = PowerButton::watch(pin, DEFAULT_HOLD_TIME, ShutdownCommand::default())?;
    println!("Hold the button on GPIO {} for {:?} to shut down", pin, DEFAULT_HOLD_TIME);

    loop {
        thread::park();
    }
}
