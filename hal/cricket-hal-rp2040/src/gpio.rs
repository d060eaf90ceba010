//! Bus line GPIO for the RP2040
//!
//! Checks that the configured bus pin exists and is free on the board,
//! then wraps it as the Cricket bus line.

use embassy_rp::gpio::{Level, Output, Pin, SlewRate};
use embassy_rp::Peri;

/// GPIO pins on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pins the Raspberry Pi Pico wires to on-board functions
/// (SMPS mode, VBUS sense, LED, VSYS sense)
pub const BOARD_RESERVED: [u8; 4] = [23, 24, 25, 29];

/// Error when selecting the bus pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin is used by the board itself
    Reserved,
}

/// Check that `pin` can carry the bus
pub fn check_bus_pin(pin: u8) -> Result<u8, PinError> {
    if pin >= GPIO_COUNT {
        return Err(PinError::InvalidPin);
    }
    if BOARD_RESERVED.contains(&pin) {
        return Err(PinError::Reserved);
    }
    Ok(pin)
}

/// The Cricket bus line on an RP2040 GPIO
pub struct BusPin<'d> {
    output: Output<'d>,
}

impl<'d> BusPin<'d> {
    /// Configure `pin` as a push-pull output, starting idle high
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        let mut output = Output::new(pin, Level::High);
        output.set_slew_rate(SlewRate::Fast);
        Self { output }
    }
}

impl cricket_hal::OutputPin for BusPin<'_> {
    fn set_high(&mut self) {
        self.output.set_high();
    }

    fn set_low(&mut self) {
        self.output.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.output.is_set_high()
    }
}
