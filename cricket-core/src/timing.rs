//! Cricket bus bit timing
//!
//! The receiver has no clock of its own; it times everything from edges:
//!
//! ```text
//! idle ‾‾‾‾|______________|‾‾‾‾|b0|b1|b2|b3|b4|b5|b6|b7|C/D|‾‾‾‾ idle
//!          | pre-start    |start|  8 data bits, LSB first |flag|
//!          |   100 us     |10us |    10 us each          |10us|
//! ```
//!
//! The flag bit is low for a command byte and high for a data byte.
//!
//! # Calibration
//!
//! Each bit is visible for the busy-wait *plus* whatever the bit loop itself
//! costs. On a 16 MHz AVR that loop is close to a microsecond, so the wait
//! has to be 9 us to get 10 us on the wire; at 8 MHz it is 8 us. Above
//! 32 MHz the overhead rounds to zero and the bus value is used as-is.
//! [`BusTiming::for_core_clock_mhz`] applies that rule; anything that needs
//! finer tuning should measure the line and use
//! [`BusTiming::with_bit_delay`].

use crate::config::ConfigError;

/// Low time that announces a frame
pub const PRE_START_US: u32 = 100;

/// High time between pre-start and the first data bit
pub const START_US: u32 = 10;

/// Time each bit must be visible on the line
pub const BIT_US: u32 = 10;

/// Shortest bit delay that still leaves the loop any time budget
pub const MIN_BIT_DELAY_US: u32 = 1;

/// Bits held for the bit interval per frame (8 data + 1 flag)
pub const BITS_PER_FRAME: u32 = 9;

/// Cost of one pass of the bit loop at 1 MHz, in microseconds
///
/// Measured as "most of a microsecond" at 16 MHz.
const LOOP_OVERHEAD_US_AT_1MHZ: u32 = 16;

/// Busy-wait durations used when transmitting a frame
///
/// Only [`BusTiming::NOMINAL`] and the validating constructors produce
/// values, so the bit delay is always within `MIN_BIT_DELAY_US..=BIT_US`.
///
/// ```compile_fail
/// use cricket_core::BusTiming;
///
/// let stalled = BusTiming {
///     pre_start_us: 100,
///     start_us: 10,
///     bit_delay_us: 0,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTiming {
    pre_start_us: u32,
    start_us: u32,
    bit_delay_us: u32,
}

impl BusTiming {
    /// Nominal bus timings, correct for cores where the bit loop is free
    pub const NOMINAL: Self = Self {
        pre_start_us: PRE_START_US,
        start_us: START_US,
        bit_delay_us: BIT_US,
    };

    /// Bus timings with an explicitly calibrated bit delay
    ///
    /// The delay must lie in `MIN_BIT_DELAY_US..=BIT_US`: a longer wait can
    /// never produce a 10 us bit.
    pub fn with_bit_delay(bit_delay_us: u32) -> Result<Self, ConfigError> {
        if !(MIN_BIT_DELAY_US..=BIT_US).contains(&bit_delay_us) {
            return Err(ConfigError::InvalidBitDelay);
        }

        Ok(Self {
            bit_delay_us,
            ..Self::NOMINAL
        })
    }

    /// Bus timings for a core running at `mhz`
    pub fn for_core_clock_mhz(mhz: u32) -> Result<Self, ConfigError> {
        if mhz == 0 {
            return Err(ConfigError::InvalidCoreClock);
        }

        // Round to the nearest whole microsecond
        let overhead = (LOOP_OVERHEAD_US_AT_1MHZ + mhz / 2) / mhz;
        let bit_delay = BIT_US.saturating_sub(overhead).max(MIN_BIT_DELAY_US);

        Self::with_bit_delay(bit_delay)
    }

    /// Low time before the start bit
    pub const fn pre_start_us(&self) -> u32 {
        self.pre_start_us
    }

    /// High time of the start bit
    pub const fn start_us(&self) -> u32 {
        self.start_us
    }

    /// Calibrated wait per data/flag bit
    pub const fn bit_delay_us(&self) -> u32 {
        self.bit_delay_us
    }

    /// Total busy-wait time of one frame
    pub const fn frame_us(&self) -> u32 {
        self.pre_start_us
            .saturating_add(self.start_us)
            .saturating_add(BITS_PER_FRAME.saturating_mul(self.bit_delay_us))
    }
}

impl Default for BusTiming {
    fn default() -> Self {
        Self::NOMINAL
    }
}
