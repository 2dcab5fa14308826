//! Hardware controls for the time travel radio
//!
//! Two independent pieces of hardware hang off the Raspberry Pi:
//!
//! - a potentiometer on channel 0 of an ADS7830 I2C ADC, read as a decade
//!   label by [`DecadesDial`]
//! - a push button on a GPIO pin that shuts the Pi down when held, see
//!   [`PowerButton`]
//!
//! # Quick Start
//!
//! ```no_run
//! use radio_controls::{Ads7830, DecadesDial, DEFAULT_BUS};
//!
//! let adc = Ads7830::open(DEFAULT_BUS)?;
//! let mut dial = DecadesDial::new(adc, ["1950s", "1960s", "1970s"])?;
//! println!("Dial is on the {}", dial.read_decade()?);
//! # Ok::<(), radio_controls::ControlError>(())
//! ```
//!
//! The bus is released when the reader is closed or dropped, whichever
//! comes first.

mod adc;
mod bus;
mod button;
mod dial;
mod error;

pub use adc::{
    channel_selector, command_byte, Ads7830, AnalogReader, CHANNELS, COMMAND, DEFAULT_ADDRESS,
    VALUE_RANGE,
};
pub use bus::{BusHandle, I2cBus, SmbusDevice, DEFAULT_BUS};
pub use button::{
    ButtonState, HoldDetector, PowerButton, ShutdownAction, ShutdownCommand, DEFAULT_HOLD_TIME,
    POLL_INTERVAL,
};
pub use dial::{DecadeBins, DecadesDial, DIAL_CHANNEL};
pub use error::{ControlError, Result};
