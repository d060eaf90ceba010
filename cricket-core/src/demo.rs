//! Demonstration cycle for a Cricket LED display
//!
//! An endless stream of [`DemoStep`]s that exercises every LED command:
//!
//! 1. Brightness 4 (once, at start)
//! 2. 64 counts in decimal, 100 ms apart, then a 1 s pause
//! 3. 64 counts in hex, 100 ms apart, then a 1 s pause
//! 4. 64 brightness steps cycling 0-7, 100 ms apart
//! 5. Brightness back to 4
//! 6. 4 rounds of walking one segment through all 8 positions, 200 ms per
//!    position and 100 ms between rounds, then a 1 s pause
//! 7. Back to 2
//!
//! The counter starts at 1025 and keeps running across the decimal and hex
//! phases and across cycles.

use crate::protocol::{DeviceId, LedCommand};
use crate::segments;

/// Counter value shown first
pub const FIRST_NUMBER: u16 = 1025;

/// Brightness used outside the brightness phase
pub const DEMO_BRIGHTNESS: u8 = 4;

/// Commands per counting/brightness phase
pub const STEPS_PER_PHASE: u16 = 16 * 4;

/// Walks through the segments per cycle
pub const PATTERN_ROUNDS: u16 = 4;

pub const STEP_MS: u32 = 100;
pub const PATTERN_STEP_MS: u32 = 200;
pub const PAUSE_MS: u32 = 1000;

/// One thing for the demo driver to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DemoStep {
    /// Send a command to the display
    Show(LedCommand),
    /// Wait before the next step
    Wait { ms: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DemoPhase {
    Start,
    Decimal,
    AfterDecimal,
    Hex,
    AfterHex,
    Brightness,
    RestoreBrightness,
    Patterns,
    AfterPatterns,
}

impl DemoPhase {
    /// Number of steps in this phase
    const fn len(self) -> u16 {
        match self {
            DemoPhase::Decimal | DemoPhase::Hex | DemoPhase::Brightness => STEPS_PER_PHASE * 2,
            // Per round: (wait, show) for each bit, then one wait
            DemoPhase::Patterns => PATTERN_ROUNDS * (8 * 2 + 1),
            _ => 1,
        }
    }

    const fn next(self) -> Self {
        match self {
            DemoPhase::Start => DemoPhase::Decimal,
            DemoPhase::Decimal => DemoPhase::AfterDecimal,
            DemoPhase::AfterDecimal => DemoPhase::Hex,
            DemoPhase::Hex => DemoPhase::AfterHex,
            DemoPhase::AfterHex => DemoPhase::Brightness,
            DemoPhase::Brightness => DemoPhase::RestoreBrightness,
            DemoPhase::RestoreBrightness => DemoPhase::Patterns,
            DemoPhase::Patterns => DemoPhase::AfterPatterns,
            DemoPhase::AfterPatterns => DemoPhase::Decimal,
        }
    }
}

/// Steps that show `value` in hex through raw segments, then pause
///
/// Used as a boot splash, before the cycle starts.
pub fn splash(value: u16, id: DeviceId) -> [DemoStep; 2] {
    [
        DemoStep::Show(LedCommand::Pattern {
            digits: segments::hex_digits(value),
            id,
        }),
        DemoStep::Wait { ms: PAUSE_MS },
    ]
}

/// Endless iterator over the demonstration steps
#[derive(Debug, Clone)]
pub struct DemoCycle {
    id: DeviceId,
    number: u16,
    phase: DemoPhase,
    index: u16,
}

impl DemoCycle {
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            number: FIRST_NUMBER,
            phase: DemoPhase::Start,
            index: 0,
        }
    }

    /// Phase the next step belongs to
    pub fn phase(&self) -> DemoPhase {
        self.phase
    }

    /// Counter value the next decimal/hex command will show
    pub fn number(&self) -> u16 {
        self.number
    }

    fn step(&mut self) -> DemoStep {
        let id = self.id;
        let index = self.index;
        let show = index % 2 == 0;

        match self.phase {
            DemoPhase::Start | DemoPhase::RestoreBrightness => {
                DemoStep::Show(LedCommand::Brightness {
                    level: DEMO_BRIGHTNESS,
                    id,
                })
            }
            DemoPhase::AfterDecimal | DemoPhase::AfterHex | DemoPhase::AfterPatterns => {
                DemoStep::Wait { ms: PAUSE_MS }
            }
            DemoPhase::Decimal if show => DemoStep::Show(LedCommand::Decimal {
                value: self.number,
                id,
            }),
            DemoPhase::Hex if show => DemoStep::Show(LedCommand::Hex {
                value: self.number,
                id,
            }),
            DemoPhase::Decimal | DemoPhase::Hex => {
                self.number = self.number.wrapping_add(1);
                DemoStep::Wait { ms: STEP_MS }
            }
            DemoPhase::Brightness if show => DemoStep::Show(LedCommand::Brightness {
                level: ((index / 2) & 0x07) as u8,
                id,
            }),
            DemoPhase::Brightness => DemoStep::Wait { ms: STEP_MS },
            DemoPhase::Patterns => {
                let within = index % (8 * 2 + 1);
                if within == 8 * 2 {
                    DemoStep::Wait { ms: STEP_MS }
                } else if within % 2 == 0 {
                    DemoStep::Wait {
                        ms: PATTERN_STEP_MS,
                    }
                } else {
                    let segment = 1u8 << (within / 2);
                    DemoStep::Show(LedCommand::Pattern {
                        digits: segments::all_digits(segment),
                        id,
                    })
                }
            }
        }
    }
}

impl DemoCycle {
    /// Take the next step along with the phase it belongs to
    pub fn next_step(&mut self) -> (DemoPhase, DemoStep) {
        let phase = self.phase;
        let step = self.step();

        self.index += 1;
        if self.index >= phase.len() {
            self.phase = phase.next();
            self.index = 0;
        }

        (phase, step)
    }
}

impl Iterator for DemoCycle {
    type Item = DemoStep;

    fn next(&mut self) -> Option<DemoStep> {
        Some(self.next_step().1)
    }
}
