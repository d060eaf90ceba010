//! Board-agnostic core of the Cricket bus driver
//!
//! Everything in here is pure data and arithmetic, so it can be tested on the
//! host without any hardware:
//!
//! - Device codes, frames and LED command sequences
//! - Bit timing and its calibration for a given core clock
//! - Bus configuration types and their validation
//! - Seven-segment glyphs for pattern commands
//! - The demonstration cycle run by the firmware

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod demo;
pub mod protocol;
pub mod segments;
pub mod timing;

pub use config::{BusConfig, ConfigError};
pub use protocol::{CommandSequence, DeviceId, Frame, FrameKind, LedCommand};
pub use timing::BusTiming;
