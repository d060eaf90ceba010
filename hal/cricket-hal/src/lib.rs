//! Cricket Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the Cricket bus driver
//! needs from a chip: one output line and a way to keep everything else on
//! the processor from running while a frame is on the wire. Chip-specific
//! crates implement these traits so the driver runs unchanged on any target.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (cricket-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cricket-drivers (bus + LED encoder)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cricket-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ cricket-hal-rp2040│
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - The bus line
//! - [`interrupt::InterruptControl`] - Masking preemption during a frame
//!
//! Blocking delays use `embedded_hal::delay::DelayNs` directly.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod interrupt;

pub use gpio::{Level, OutputPin};
pub use interrupt::{CriticalSection, InterruptControl};
