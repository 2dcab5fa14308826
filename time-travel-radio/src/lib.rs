//! # Time Travel Radio
//!
//! Glue between the hardware controls and the decade player:
//!
//! - [`config`]: command line and `RADIO_*` environment configuration
//! - [`control`]: the interactive decade/volume loop
//! - [`tuner`]: playback that follows the decade dial

pub mod config;
pub mod control;
pub mod tuner;

#[cfg(test)]
mod testing;

/// Initialize tracing; `RUST_LOG` takes precedence over `log_level`
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.to_lowercase())),
        )
        .with_writer(std::io::stderr)
        .init();
}
