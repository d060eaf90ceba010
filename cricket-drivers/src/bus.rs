//! Cricket bus transport
//!
//! Bit-bangs frames onto a single output line. See [`cricket_core::timing`]
//! for the waveform.
//!
//! There is no acknowledgement on the bus, so nothing here can fail once the
//! line has been configured. A frame that gets stretched by an interrupt is
//! simply misread by the receiver, which is why every frame is sent inside
//! [`InterruptControl::free`].

use cricket_core::{BusTiming, Frame};
use cricket_hal::{InterruptControl, Level, OutputPin};
use embedded_hal::delay::DelayNs;

/// Anything that can put a byte and its command flag on the bus
pub trait FrameSink {
    /// Send one byte, flagged as a command (`true`) or data (`false`)
    fn send(&mut self, byte: u8, command: bool);

    /// Send a [`Frame`]
    fn send_frame(&mut self, frame: Frame) {
        self.send(frame.byte, frame.is_command());
    }
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn send(&mut self, byte: u8, command: bool) {
        (**self).send(byte, command);
    }
}

/// Owner of the Cricket bus line
///
/// - `P`: the bus line, already configured as an output
/// - `D`: blocking delay; must busy-wait, since interrupts are off
/// - `I`: masks preemption for the duration of a frame
pub struct CricketBus<P, D, I> {
    line: P,
    delay: D,
    interrupts: I,
    timing: BusTiming,
}

impl<P: OutputPin, D: DelayNs, I: InterruptControl> CricketBus<P, D, I> {
    /// Take ownership of the bus line and put it in the idle (high) state
    pub fn new(mut line: P, delay: D, interrupts: I, timing: BusTiming) -> Self {
        line.set_high();

        Self {
            line,
            delay,
            interrupts,
            timing,
        }
    }

    /// Active frame timing
    pub fn timing(&self) -> BusTiming {
        self.timing
    }

    /// Swap in a new calibration
    pub fn set_timing(&mut self, timing: BusTiming) {
        self.timing = timing;
    }

    /// Give back the line, delay and interrupt control
    pub fn release(self) -> (P, D, I) {
        (self.line, self.delay, self.interrupts)
    }

    /// Send one frame.
    ///
    /// Assumes the line is idle (high) on entry and leaves it idle on return.
    /// Blocks for [`BusTiming::frame_us`] plus loop overhead, all of it with
    /// interrupts masked.
    pub fn send(&mut self, byte: u8, command: bool) {
        let Self {
            line,
            delay,
            interrupts,
            timing,
        } = self;
        let timing = *timing;

        interrupts.free(|| {
            line.set_low();
            delay.delay_us(timing.pre_start_us());
            line.set_high();
            delay.delay_us(timing.start_us());

            // LSB first
            let mut bits = byte;
            for _ in 0..8 {
                line.set_level(Level::from(bits & 0x01 != 0));
                bits >>= 1;
                delay.delay_us(timing.bit_delay_us());
            }

            // Flag: low = command, high = data
            line.set_level(Level::from(!command));
            delay.delay_us(timing.bit_delay_us());

            line.set_high();
        });
    }
}

impl<P: OutputPin, D: DelayNs, I: InterruptControl> FrameSink for CricketBus<P, D, I> {
    fn send(&mut self, byte: u8, command: bool) {
        CricketBus::send(self, byte, command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Event, NoMask, Sim, SimDelay, SimInterrupts, SimLine};
    use core::cell::RefCell;

    type SimBus<'a> = CricketBus<SimLine<'a>, SimDelay<'a>, SimInterrupts<'a>>;

    fn bus(sim: &RefCell<Sim>, timing: BusTiming) -> SimBus<'_> {
        let bus = CricketBus::new(SimLine(sim), SimDelay(sim), SimInterrupts(sim), timing);
        sim.borrow_mut().clear_events();
        bus
    }

    /// Expected (level, held-for) pairs of one frame, idle high excluded
    fn expected_waveform(byte: u8, command: bool, timing: BusTiming) -> [(bool, u32); 11] {
        let mut out = [(true, timing.bit_delay_us()); 11];
        out[0] = (false, timing.pre_start_us());
        out[1] = (true, timing.start_us());
        for bit in 0..8 {
            out[2 + bit] = (byte & (1 << bit) != 0, timing.bit_delay_us());
        }
        out[10] = (!command, timing.bit_delay_us());
        out
    }

    #[test]
    fn test_new_drives_line_idle() {
        let sim = RefCell::new(Sim::new());
        sim.borrow_mut().level = false;

        let _bus = bus(&sim, BusTiming::NOMINAL);
        assert!(sim.borrow().level);
    }

    #[test]
    fn test_every_byte_and_flag_waveform() {
        for timing in [BusTiming::NOMINAL, BusTiming::with_bit_delay(9).unwrap()] {
            for byte in 0..=u8::MAX {
                for command in [true, false] {
                    let sim = RefCell::new(Sim::new());
                    let mut bus = bus(&sim, timing);

                    bus.send(byte, command);

                    let sim = sim.borrow();
                    let segments = sim.line_segments();
                    let expected = expected_waveform(byte, command, timing);

                    // 11 timed levels, then the return to idle
                    assert_eq!(segments.len(), 12, "byte {byte:#04x} cmd {command}");
                    assert_eq!(
                        &segments[..11],
                        &expected[..],
                        "byte {byte:#04x} cmd {command}"
                    );
                    assert!(segments[11].0, "line must end idle high");
                    assert!(sim.level);
                    assert_eq!(sim.now_us, timing.frame_us());
                }
            }
        }
    }

    #[test]
    fn test_command_flag_is_low() {
        let sim = RefCell::new(Sim::new());
        let mut bus = bus(&sim, BusTiming::NOMINAL);

        bus.send(0xFF, true);
        assert_eq!(sim.borrow().line_segments()[10], (false, 10));

        sim.borrow_mut().clear_events();
        bus.send(0xFF, false);
        assert_eq!(sim.borrow().line_segments()[10], (true, 10));
    }

    #[test]
    fn test_line_idle_after_send() {
        let sim = RefCell::new(Sim::new());
        let mut bus = bus(&sim, BusTiming::NOMINAL);

        for byte in [0x00, 0x01, 0x80, 0xFF] {
            bus.send(byte, byte & 1 == 0);
            assert!(sim.borrow().level);
        }
    }

    #[test]
    fn test_frame_runs_with_interrupts_masked() {
        let sim = RefCell::new(Sim::with_interrupt_every(7));
        let mut bus = bus(&sim, BusTiming::NOMINAL);

        bus.send(0xA5, true);

        let sim = sim.borrow();
        let events = sim.events.as_slice();

        // Everything on the line happens between mask and unmask
        assert_eq!(events.first(), Some(&Event::Masked));
        let unmask = events
            .iter()
            .position(|e| *e == Event::Unmasked)
            .expect("interrupts re-enabled");
        assert!(events[1..unmask]
            .iter()
            .all(|e| matches!(e, Event::Line { .. })));

        // Interrupts raised during the frame are held off, then delivered
        let delivered = events[unmask + 1..]
            .iter()
            .filter(|e| matches!(e, Event::Interrupt { .. }))
            .count();
        assert_eq!(delivered as u32, 200 / 7);
        assert_eq!(sim.preemptions, 0);
    }

    #[test]
    fn test_unmasked_interrupts_would_be_seen() {
        // Check the simulation itself catches a transport without masking
        let sim = RefCell::new(Sim::with_interrupt_every(7));
        let mut bus = CricketBus::new(SimLine(&sim), SimDelay(&sim), NoMask, BusTiming::NOMINAL);
        sim.borrow_mut().clear_events();

        bus.send(0xA5, true);

        assert!(sim.borrow().preemptions > 0);
    }

    #[test]
    fn test_back_to_back_frames_each_masked() {
        let sim = RefCell::new(Sim::with_interrupt_every(50));
        let mut bus = bus(&sim, BusTiming::NOMINAL);

        bus.send(0x10, true);
        bus.send(0x00, false);

        let sim = sim.borrow();
        let masks = sim.events.iter().filter(|e| **e == Event::Masked).count();
        let unmasks = sim.events.iter().filter(|e| **e == Event::Unmasked).count();
        assert_eq!(masks, 2);
        assert_eq!(unmasks, 2);
        assert_eq!(sim.now_us, 400);
        assert_eq!(sim.preemptions, 0);
    }

    #[test]
    fn test_send_frame_and_release() {
        let sim = RefCell::new(Sim::new());
        let mut bus = bus(&sim, BusTiming::NOMINAL);

        bus.send_frame(Frame::data(0x3C));
        assert_eq!(sim.borrow().decode_frames().as_slice(), &[Frame::data(0x3C)]);

        let (line, _, _) = bus.release();
        assert!(line.is_set_high());
    }

    #[test]
    fn test_every_calibration_keeps_bits_on_the_wire() {
        for mhz in 1..=200 {
            let timing = BusTiming::for_core_clock_mhz(mhz).unwrap();
            let sim = RefCell::new(Sim::new());
            let mut bus = bus(&sim, BusTiming::NOMINAL);
            bus.set_timing(timing);

            bus.send(0xA5, true);

            let sim = sim.borrow();
            let segments = sim.line_segments();
            assert_eq!(segments.len(), 12);
            assert!(segments[2..11].iter().all(|&(_, held)| held >= 1));
            assert_eq!(&segments[..11], &expected_waveform(0xA5, true, timing)[..]);
            assert_eq!(sim.now_us, timing.frame_us());
        }
    }

    #[test]
    fn test_recalibration() {
        let sim = RefCell::new(Sim::new());
        let mut bus = bus(&sim, BusTiming::NOMINAL);

        let slow = BusTiming::with_bit_delay(8).unwrap();
        bus.set_timing(slow);
        assert_eq!(bus.timing(), slow);

        bus.send(0x00, false);
        assert_eq!(sim.borrow().now_us, slow.frame_us());
    }
}
