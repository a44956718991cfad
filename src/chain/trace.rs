//! Recording line collaborator.
//!
//! A [`Trace`] stands in for both the GPIO lines and the delay provider and
//! records every call, in order, into a fixed-capacity log. Because `&Trace`
//! implements [`LineDriver`] as well as [`DelayNs`], a single trace sees the
//! line writes and the sleeps interleaved exactly as the driver issued them.

use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;

use crate::chain::{lines::LineDriver, types::PinState};

/// One recorded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<L> {
    Configure(L),
    Set(L, PinState),
    SleepMs(u32),
    SleepNs(u32),
}

/// The trace log is full; the event was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceFull;

/// Fixed-capacity recorder of line and delay events.
///
/// `CAP` bounds the number of events kept. Line writes past capacity fail
/// with [`TraceFull`]; sleeps past capacity only set the
/// [`overflowed`](Trace::overflowed) flag, since delays cannot report errors.
pub struct Trace<L, const CAP: usize> {
    events: RefCell<heapless::Vec<Event<L>, CAP>>,
    overflowed: Cell<bool>,
}

impl<L: Copy + PartialEq, const CAP: usize> Trace<L, CAP> {
    pub const fn new() -> Self {
        Self {
            events: RefCell::new(heapless::Vec::new()),
            overflowed: Cell::new(false),
        }
    }

    fn record(&self, event: Event<L>) -> Result<(), TraceFull> {
        self.events.borrow_mut().push(event).map_err(|_| {
            self.overflowed.set(true);
            TraceFull
        })
    }

    /// Runs `f` over the recorded events.
    pub fn with_events<R>(&self, f: impl FnOnce(&[Event<L>]) -> R) -> R {
        f(&self.events.borrow())
    }

    /// Copy of the recorded events.
    pub fn snapshot(&self) -> heapless::Vec<Event<L>, CAP> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Forgets all events and the overflow flag.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
        self.overflowed.set(false);
    }

    /// True if any event was dropped since the last [`clear`](Trace::clear).
    pub fn overflowed(&self) -> bool {
        self.overflowed.get()
    }

    /// Number of rising edges driven on `clock`.
    pub fn clock_pulses(&self, clock: L) -> usize {
        self.with_events(|events| {
            events
                .iter()
                .filter(|e| **e == Event::Set(clock, PinState::High))
                .count()
        })
    }

    /// Total milliseconds slept, saturating at `u32::MAX`.
    pub fn slept_ms(&self) -> u32 {
        self.with_events(|events| {
            events
                .iter()
                .filter_map(|e| match e {
                    Event::SleepMs(ms) => Some(*ms),
                    _ => None,
                })
                .fold(0u32, u32::saturating_add)
        })
    }
}

impl<L: Copy + PartialEq, const CAP: usize> Default for Trace<L, CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, const CAP: usize> core::fmt::Debug for Trace<L, CAP> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Trace")
            .field("len", &self.events.borrow().len())
            .field("overflowed", &self.overflowed.get())
            .finish_non_exhaustive()
    }
}

impl<L, const CAP: usize> LineDriver for &Trace<L, CAP>
where
    L: Copy + PartialEq + core::fmt::Debug,
{
    type Line = L;
    type Error = TraceFull;

    fn configure_output(&mut self, line: L) -> Result<(), TraceFull> {
        self.record(Event::Configure(line))
    }

    fn set_level(&mut self, line: L, level: PinState) -> Result<(), TraceFull> {
        self.record(Event::Set(line, level))
    }
}

impl<L: Copy + PartialEq, const CAP: usize> DelayNs for &Trace<L, CAP> {
    // Delays cannot fail; a dropped sleep only sets the overflow flag.
    fn delay_ns(&mut self, ns: u32) {
        self.record(Event::SleepNs(ns)).ok();
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(Event::SleepMs(ms)).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let trace: Trace<u8, 8> = Trace::new();
        let mut lines = &trace;
        let mut delay = &trace;

        lines.configure_output(1).unwrap();
        lines.set_level(1, PinState::High).unwrap();
        delay.delay_ms(3);
        delay.delay_ns(250);
        lines.set_level(1, PinState::Low).unwrap();

        assert_eq!(
            trace.snapshot().as_slice(),
            &[
                Event::Configure(1),
                Event::Set(1, PinState::High),
                Event::SleepMs(3),
                Event::SleepNs(250),
                Event::Set(1, PinState::Low),
            ]
        );
        assert_eq!(trace.clock_pulses(1), 1);
        assert_eq!(trace.slept_ms(), 3);
    }

    #[test]
    fn full_trace_reports_and_flags_overflow() {
        let trace: Trace<u8, 2> = Trace::new();
        let mut lines = &trace;
        let mut delay = &trace;

        lines.set_level(0, PinState::High).unwrap();
        delay.delay_ms(1);
        assert!(!trace.overflowed());

        assert_eq!(lines.set_level(0, PinState::Low), Err(TraceFull));
        assert!(trace.overflowed());
        delay.delay_ms(1);
        assert_eq!(trace.len(), 2);

        trace.clear();
        assert!(trace.is_empty());
        assert!(!trace.overflowed());
    }

    #[test]
    fn dropped_sleep_only_flags_overflow() {
        let trace: Trace<u8, 1> = Trace::new();
        let mut delay = &trace;

        delay.delay_ms(5);
        delay.delay_ns(10);
        assert!(trace.overflowed());
        assert_eq!(trace.snapshot().as_slice(), &[Event::SleepMs(5)]);
        assert_eq!(trace.slept_ms(), 5);
    }

    #[test]
    fn slept_ms_saturates() {
        let trace: Trace<u8, 4> = Trace::new();
        let mut delay = &trace;

        delay.delay_ms(u32::MAX);
        delay.delay_ms(u32::MAX);
        delay.delay_ms(7);
        assert_eq!(trace.slept_ms(), u32::MAX);
    }
}
