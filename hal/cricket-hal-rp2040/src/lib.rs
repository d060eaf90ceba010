//! RP2040-specific HAL for the Cricket bus driver
//!
//! - [`gpio::BusPin`]: an `embassy-rp` output implementing
//!   [`cricket_hal::OutputPin`]
//! - Bus pin validation against the RP2040 pin map and the Pico board
//!
//! Interrupt masking needs no chip-specific code here:
//! [`cricket_hal::CriticalSection`] uses the `critical-section`
//! implementation `embassy-rp` provides, which also holds off the other core.

#![no_std]

pub mod gpio;

pub use cricket_hal::{CriticalSection, InterruptControl, OutputPin};
pub use gpio::{check_bus_pin, BusPin, PinError};
