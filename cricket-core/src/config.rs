//! Bus configuration types
//!
//! Which pin carries the bus and how the bit delay is calibrated are
//! decided at build time. These types carry those values into the driver
//! and reject nonsense before anything is driven.

use crate::timing::BusTiming;

/// Errors in the bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Bit delay outside 1-10 us
    InvalidBitDelay,
    /// Core clock of zero
    InvalidCoreClock,
}

/// Build-time bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// GPIO number carrying the bus line (checked against the chip by its HAL)
    pub pin: u8,
    /// Frame timing
    pub timing: BusTiming,
}

impl BusConfig {
    /// Configuration with an explicit bit delay
    pub fn new(pin: u8, bit_delay_us: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            pin,
            timing: BusTiming::with_bit_delay(bit_delay_us)?,
        })
    }

    /// Configuration calibrated for the given core clock
    pub fn for_core_clock(pin: u8, mhz: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            pin,
            timing: BusTiming::for_core_clock_mhz(mhz)?,
        })
    }
}
