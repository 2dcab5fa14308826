//! Error types for the hardware controls

use thiserror::Error;

/// Errors raised by the bus, the ADC, the dial and the power button
#[derive(Debug, Error)]
pub enum ControlError {
    /// An I2C transaction failed. This is a hardware fault and is never retried.
    #[error("I2C bus error: {0}")]
    Bus(String),

    /// The bus handle was used after `close()`
    #[error("I2C bus is closed")]
    BusClosed,

    /// ADS7830 channels are 0 through 7
    #[error("Invalid ADC channel {0} (expected 0-7)")]
    InvalidChannel(u8),

    /// A dial needs at least one label
    #[error("At least one decade label is required")]
    NoLabels,

    /// The reader reported a value range of zero
    #[error("ADC value range must be positive")]
    EmptyRange,

    /// GPIO access failed
    #[error("GPIO error: {0}")]
    Gpio(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rppal::i2c::Error> for ControlError {
    fn from(error: rppal::i2c::Error) -> Self {
        ControlError::Bus(error.to_string())
    }
}

impl From<rppal::gpio::Error> for ControlError {
    fn from(error: rppal::gpio::Error) -> Self {
        ControlError::Gpio(error.to_string())
    }
}

/// Type alias for results that can return a ControlError
pub type Result<T> = std::result::Result<T, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ControlError::InvalidChannel(9).to_string(),
            "Invalid ADC channel 9 (expected 0-7)"
        );
        assert_eq!(
            ControlError::Bus("Remote I/O error".to_string()).to_string(),
            "I2C bus error: Remote I/O error"
        );
        assert_eq!(ControlError::BusClosed.to_string(), "I2C bus is closed");
    }
}
