//! ADS7830 8-bit, 8-channel analog-to-digital converter
//!
//! Reference: Texas Instruments ADS7830 datasheet (SBAS302), Table 2.

use tracing::debug;

use crate::bus::{BusHandle, I2cBus, SmbusDevice};
use crate::error::{ControlError, Result};

/// Default 7-bit address of the ADS7830 module (A1 = A0 = high)
pub const DEFAULT_ADDRESS: u8 = 0x4b;

/// Single-ended inputs, internal reference off, A/D converter on
pub const COMMAND: u8 = 0x84;

/// Number of input channels
pub const CHANNELS: u8 = 8;

/// Largest sample the 8-bit converter produces
pub const VALUE_RANGE: u8 = u8::MAX;

/// Channel-select bits (C2 C1 C0, bits 6..4) for a single-ended channel.
///
/// The chip numbers its single-ended inputs in the order
/// CH0, CH2, CH4, CH6, CH1, CH3, CH5, CH7, so the channel index is
/// bit-reordered before being shifted into place.
pub const fn channel_selector(channel: u8) -> u8 {
    (((channel << 2) | (channel >> 1)) & 0x07) << 4
}

/// Full command byte for reading `channel`
pub const fn command_byte(channel: u8) -> u8 {
    COMMAND | channel_selector(channel)
}

/// Anything that can sample an analog channel
pub trait AnalogReader {
    /// Take one sample from `channel`
    fn read_channel(&mut self, channel: u8) -> Result<u8>;

    /// Largest value `read_channel` can return
    fn value_range(&self) -> u8;
}

/// ADS7830 reader that owns its bus handle
#[derive(Debug)]
pub struct Ads7830<B: SmbusDevice> {
    bus: BusHandle<B>,
    address: u8,
}

impl Ads7830<I2cBus> {
    /// Open I2C bus `bus` and talk to the chip at its default address
    pub fn open(bus: u8) -> Result<Self> {
        Ok(Self::new(I2cBus::open(bus)?))
    }
}

impl<B: SmbusDevice> Ads7830<B> {
    pub fn new(device: B) -> Self {
        Self {
            bus: BusHandle::new(device),
            address: DEFAULT_ADDRESS,
        }
    }

    /// Use a non-default address (A1/A0 strapped differently)
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus; safe to call more than once
    pub fn close(&mut self) {
        self.bus.close();
    }

    pub fn is_open(&self) -> bool {
        self.bus.is_open()
    }
}

impl<B: SmbusDevice> AnalogReader for Ads7830<B> {
    fn read_channel(&mut self, channel: u8) -> Result<u8> {
        if channel >= CHANNELS {
            return Err(ControlError::InvalidChannel(channel));
        }
        let value = self.bus.read_byte_data(self.address, command_byte(channel))?;
        debug!(channel, value, "ADS7830 sample");
        Ok(value)
    }

    fn value_range(&self) -> u8 {
        VALUE_RANGE
    }
}
