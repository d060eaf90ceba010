//! Simulated bus hardware for host tests
//!
//! One [`Sim`] holds a microsecond clock, the line level, an optional
//! periodic interrupt source and a log of everything that happened. The
//! line, delay and interrupt mocks all borrow the same `RefCell<Sim>`.

use core::cell::RefCell;

use cricket_core::timing::{BIT_US, PRE_START_US, START_US};
use cricket_core::Frame;
use cricket_hal::{InterruptControl, OutputPin};
use embedded_hal::delay::DelayNs;
use heapless::Vec;

/// Line writes per frame: pre-start, start, 8 bits, flag, idle
const EDGES_PER_FRAME: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Masked,
    Unmasked,
    Line { high: bool, at: u32 },
    Interrupt { at: u32 },
}

pub struct Sim {
    pub now_us: u32,
    pub level: bool,
    pub masked: bool,
    pub events: Vec<Event, 512>,
    /// Interrupt handlers that ran in the middle of a frame
    pub preemptions: u32,
    interrupt_every_us: Option<u32>,
    pending: u32,
    frame_edges: u8,
}

impl Sim {
    pub fn new() -> Self {
        Self {
            now_us: 0,
            level: true,
            masked: false,
            events: Vec::new(),
            preemptions: 0,
            interrupt_every_us: None,
            pending: 0,
            frame_edges: 0,
        }
    }

    /// Sim with a timer interrupt firing every `period_us`
    pub fn with_interrupt_every(period_us: u32) -> Self {
        Self {
            interrupt_every_us: Some(period_us),
            ..Self::new()
        }
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn log(&mut self, event: Event) {
        self.events.push(event).expect("sim event log full");
    }

    fn set_line(&mut self, high: bool) {
        self.level = high;
        let at = self.now_us;
        self.log(Event::Line { high, at });

        if self.frame_edges > 0 {
            self.frame_edges += 1;
            if self.frame_edges == EDGES_PER_FRAME {
                self.frame_edges = 0;
            }
        } else if !high {
            self.frame_edges = 1;
        }
    }

    fn service_interrupt(&mut self) {
        if self.frame_edges > 0 {
            self.preemptions += 1;
        }
        let at = self.now_us;
        self.log(Event::Interrupt { at });
    }

    fn advance(&mut self, us: u32) {
        for _ in 0..us {
            self.now_us += 1;
            let Some(period) = self.interrupt_every_us else {
                continue;
            };
            if self.now_us % period == 0 {
                if self.masked {
                    self.pending += 1;
                } else {
                    self.service_interrupt();
                }
            }
        }
    }

    fn mask(&mut self) {
        self.masked = true;
        self.log(Event::Masked);
    }

    fn unmask(&mut self) {
        self.masked = false;
        self.log(Event::Unmasked);
        for _ in 0..core::mem::take(&mut self.pending) {
            self.service_interrupt();
        }
    }

    fn edges(&self) -> Vec<(bool, u32), 512> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                Event::Line { high, at } => Some((high, at)),
                _ => None,
            })
            .collect()
    }

    /// Line writes as (level, time until next write); the last one is 0
    pub fn line_segments(&self) -> Vec<(bool, u32), 512> {
        let edges = self.edges();
        edges
            .iter()
            .enumerate()
            .map(|(i, &(high, at))| {
                let held = edges.get(i + 1).map_or(0, |&(_, next)| next - at);
                (high, held)
            })
            .collect()
    }

    fn level_at(edges: &[(bool, u32)], t: u32) -> bool {
        edges
            .iter()
            .take_while(|&&(_, at)| at <= t)
            .last()
            .map_or(true, |&(high, _)| high)
    }

    /// Decode the line the way a receiver running at nominal speed would
    pub fn decode_frames(&self) -> Vec<Frame, 16> {
        let edges = self.edges();
        let mut frames = Vec::new();

        for pair in edges.windows(2) {
            let [(was_high, fall), (now_high, rise)] = [pair[0], pair[1]];
            if was_high || !now_high || rise - fall < PRE_START_US {
                continue;
            }

            let first_bit = rise + START_US;
            let sample = |bit: u32| Self::level_at(&edges, first_bit + bit * BIT_US + BIT_US / 2);
            let byte = (0..8).fold(0u8, |acc, bit| acc | (u8::from(sample(bit)) << bit));
            let frame = if sample(8) {
                Frame::data(byte)
            } else {
                Frame::command(byte)
            };
            frames.push(frame).expect("too many frames");
        }

        frames
    }
}

pub struct SimLine<'a>(pub &'a RefCell<Sim>);

impl OutputPin for SimLine<'_> {
    fn set_high(&mut self) {
        self.0.borrow_mut().set_line(true);
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().set_line(false);
    }

    fn is_set_high(&self) -> bool {
        self.0.borrow().level
    }
}

pub struct SimDelay<'a>(pub &'a RefCell<Sim>);

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().advance(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().advance(us);
    }
}

pub struct SimInterrupts<'a>(pub &'a RefCell<Sim>);

impl InterruptControl for SimInterrupts<'_> {
    fn free<R>(&mut self, f: impl FnOnce() -> R) -> R {
        self.0.borrow_mut().mask();
        let result = f();
        self.0.borrow_mut().unmask();
        result
    }
}

/// Interrupt control that does nothing
pub struct NoMask;

impl InterruptControl for NoMask {
    fn free<R>(&mut self, f: impl FnOnce() -> R) -> R {
        f()
    }
}
