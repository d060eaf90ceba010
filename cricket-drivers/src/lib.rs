//! Cricket bus drivers
//!
//! - [`bus::CricketBus`]: bit-banged transport, one byte plus command flag
//!   per frame, sent with interrupts masked
//! - [`led::CricketLed`]: LED display commands built on any [`FrameSink`]

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod led;

#[cfg(test)]
mod sim;

pub use bus::{CricketBus, FrameSink};
pub use led::CricketLed;
