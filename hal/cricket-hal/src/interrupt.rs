//! Interrupt and preemption control
//!
//! The Cricket receiver recovers timing purely from edges on the line, so a
//! frame must go out without any interrupt handler or task stretching a bit.
//! Drivers wrap each frame in [`InterruptControl::free`].

/// Ability to run a closure with all preemption sources masked
pub trait InterruptControl {
    /// Run `f` with interrupts disabled, restoring the previous state after.
    fn free<R>(&mut self, f: impl FnOnce() -> R) -> R;
}

impl<I: InterruptControl + ?Sized> InterruptControl for &mut I {
    fn free<R>(&mut self, f: impl FnOnce() -> R) -> R {
        (**self).free(f)
    }
}

/// [`InterruptControl`] backed by the global `critical-section` implementation
///
/// On single-core targets this masks interrupts. On RP2040 the
/// `embassy-rp` implementation additionally takes a hardware spinlock, which
/// keeps the second core out as well.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CriticalSection;

impl InterruptControl for CriticalSection {
    fn free<R>(&mut self, f: impl FnOnce() -> R) -> R {
        critical_section::with(|_| f())
    }
}
