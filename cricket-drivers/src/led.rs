//! Cricket LED display driver
//!
//! Turns display operations into command sequences (see
//! [`cricket_core::protocol`]) and hands each frame to a [`FrameSink`],
//! normally a [`CricketBus`](crate::CricketBus).
//!
//! Nothing is confirmed by the display; every call is fire-and-forget.

use cricket_core::{DeviceId, LedCommand};

use crate::bus::FrameSink;

/// 4-digit Cricket LED display
pub struct CricketLed<S> {
    bus: S,
}

impl<S: FrameSink> CricketLed<S> {
    pub fn new(bus: S) -> Self {
        Self { bus }
    }

    /// Show `value` in decimal
    pub fn display_decimal(&mut self, value: u16, id: DeviceId) {
        self.execute(&LedCommand::Decimal { value, id });
    }

    /// Show `value` in hex
    pub fn display_hex(&mut self, value: u16, id: DeviceId) {
        self.execute(&LedCommand::Hex { value, id });
    }

    /// Set brightness 0-7. Higher values wrap (only the low 3 bits are sent).
    pub fn set_brightness(&mut self, level: u8, id: DeviceId) {
        self.execute(&LedCommand::Brightness { level, id });
    }

    /// Light raw segments, leftmost digit first.
    /// See [`cricket_core::segments`] for the bit layout.
    pub fn set_pattern(&mut self, digits: [u8; 4], id: DeviceId) {
        self.execute(&LedCommand::Pattern { digits, id });
    }

    /// Send the whole sequence for `command`, in order
    pub fn execute(&mut self, command: &LedCommand) {
        let sequence = command.sequence();

        #[cfg(feature = "defmt")]
        defmt::debug!("Cricket LED {}: {}", command, sequence);

        for frame in &sequence {
            self.bus.send_frame(*frame);
        }
    }

    pub fn bus(&self) -> &S {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut S {
        &mut self.bus
    }

    /// Give back the underlying sink
    pub fn release(self) -> S {
        self.bus
    }
}
