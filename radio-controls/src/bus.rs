//! I2C bus access
//!
//! [`BusHandle`] owns the open bus and guarantees it is released exactly
//! once: either by an explicit [`BusHandle::close`] or when the handle is
//! dropped.

use rppal::i2c::I2c;
use tracing::{debug, trace};

use crate::error::{ControlError, Result};

/// Bus number of the user-facing I2C bus on a Raspberry Pi (`/dev/i2c-1`)
pub const DEFAULT_BUS: u8 = 1;

/// The one SMBus transaction the ADC needs
pub trait SmbusDevice {
    /// Write `command` to the device at `address` and read back one byte
    fn read_byte_data(&mut self, address: u8, command: u8) -> Result<u8>;
}

/// Linux I2C bus backed by `rppal`
#[derive(Debug)]
pub struct I2cBus {
    i2c: I2c,
    slave_address: Option<u8>,
}

impl I2cBus {
    /// Open `/dev/i2c-<bus>`
    pub fn open(bus: u8) -> Result<Self> {
        let i2c = I2c::with_bus(bus)?;
        debug!(bus, "Opened I2C bus");
        Ok(Self {
            i2c,
            slave_address: None,
        })
    }
}

impl SmbusDevice for I2cBus {
    fn read_byte_data(&mut self, address: u8, command: u8) -> Result<u8> {
        if self.slave_address != Some(address) {
            self.i2c.set_slave_address(u16::from(address))?;
            self.slave_address = Some(address);
        }
        let value = self.i2c.smbus_read_byte(command)?;
        trace!(address, command, value, "SMBus read byte data");
        Ok(value)
    }
}

/// Exclusive, closeable owner of an open bus
#[derive(Debug)]
pub struct BusHandle<B: SmbusDevice> {
    device: Option<B>,
}

impl<B: SmbusDevice> BusHandle<B> {
    pub fn new(device: B) -> Self {
        Self {
            device: Some(device),
        }
    }

    /// Issue one read transaction; fails with `BusClosed` after `close()`
    pub fn read_byte_data(&mut self, address: u8, command: u8) -> Result<u8> {
        self.device
            .as_mut()
            .ok_or(ControlError::BusClosed)?
            .read_byte_data(address, command)
    }

    /// Release the bus. Further calls do nothing.
    pub fn close(&mut self) {
        if let Some(device) = self.device.take() {
            drop(device);
            debug!("Closed I2C bus");
        }
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }
}

impl<B: SmbusDevice> Drop for BusHandle<B> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingBus {
        releases: Rc<Cell<usize>>,
    }

    impl SmbusDevice for CountingBus {
        fn read_byte_data(&mut self, _address: u8, command: u8) -> Result<u8> {
            Ok(command)
        }
    }

    impl Drop for CountingBus {
        fn drop(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    fn handle() -> (BusHandle<CountingBus>, Rc<Cell<usize>>) {
        let releases = Rc::new(Cell::new(0));
        let bus = CountingBus {
            releases: Rc::clone(&releases),
        };
        (BusHandle::new(bus), releases)
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut bus, releases) = handle();
        assert!(bus.is_open());

        bus.close();
        bus.close();
        bus.close();

        assert!(!bus.is_open());
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_drop_releases_bus() {
        let (bus, releases) = handle();
        drop(bus);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_drop_after_close_does_not_release_twice() {
        let (mut bus, releases) = handle();
        bus.close();
        drop(bus);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_read_after_close_fails() {
        let (mut bus, _releases) = handle();
        assert_eq!(bus.read_byte_data(0x4b, 0x84).unwrap(), 0x84);

        bus.close();
        assert!(matches!(
            bus.read_byte_data(0x4b, 0x84),
            Err(ControlError::BusClosed)
        ));
    }
}
