//! Test support utilities - only compiled in test builds.

use crate::chain::{
    config::ChainConfig,
    driver::ChainDriver,
    trace::{Event, Trace},
    types::{BitOrder, PinState},
};

/// Lines of the test wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Data,
    Latch,
    Clock,
    Enable,
    Reset,
}

impl Line {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        self as usize
    }
}

/// Standard test trace: large enough for bring-up plus several writes on
/// a few chips.
pub type TestTrace = Trace<Line, 2048>;

pub type TestChain<'a, const N: usize> = ChainDriver<&'a TestTrace, &'a TestTrace, N>;

/// Data, latch and clock only.
pub fn three_wire() -> ChainConfig<Line> {
    ChainConfig::new(Line::Data, Line::Latch, Line::Clock)
}

/// Three-wire plus `/OE` and `/MR`.
pub fn five_wire() -> ChainConfig<Line> {
    three_wire()
        .with_output_enable(Line::Enable)
        .with_reset(Line::Reset)
}

/// Helper to create a driver that records into `trace`.
pub fn test_chain<const N: usize>(
    trace: &TestTrace,
    config: ChainConfig<Line>,
) -> TestChain<'_, N> {
    ChainDriver::new(config, trace, trace).unwrap()
}

const HISTORY: usize = 256;

/// Behavioral model of `N` chained 74HC595 chips.
///
/// Replays a trace: rising clock edges shift the data level in, rising
/// latch edges copy the last `N * 8` shifted bits to the outputs, `/MR` low
/// empties the shift stage, `/OE` low enables the outputs. Decoded patterns
/// are reported in the order the bits were sent, so byte `c` bit `i` is the
/// `c * 8 + i`-th bit of the frame (for LSB-first).
pub struct ChainSim<const N: usize> {
    levels: [PinState; Line::COUNT],
    shifted: heapless::Vec<bool, HISTORY>,
    latched: heapless::Vec<bool, HISTORY>,
}

impl<const N: usize> ChainSim<N> {
    pub fn replay(events: &[Event<Line>]) -> Self {
        assert!(N * 8 <= HISTORY, "simulated chain too long");

        let mut sim = ChainSim {
            // Power-on: outputs enabled, not in reset.
            levels: [
                PinState::Low,
                PinState::Low,
                PinState::Low,
                PinState::Low,
                PinState::High,
            ],
            shifted: heapless::Vec::new(),
            latched: heapless::Vec::new(),
        };
        for event in events {
            if let Event::Set(line, level) = event {
                sim.set(*line, *level);
            }
        }
        sim
    }

    fn set(&mut self, line: Line, level: PinState) {
        let rising = self.levels[line.index()] == PinState::Low && level == PinState::High;
        self.levels[line.index()] = level;

        match line {
            Line::Clock if rising => {
                if self.shifted.is_full() {
                    self.shifted.remove(0);
                }
                let bit = self.levels[Line::Data.index()] == PinState::High;
                self.shifted.push(bit).unwrap();
            }
            Line::Latch if rising => {
                self.latched = self.shifted.clone();
            }
            Line::Reset if level == PinState::Low => {
                self.shifted.clear();
            }
            _ => {}
        }
    }

    pub fn outputs_enabled(&self) -> bool {
        self.levels[Line::Enable.index()] == PinState::Low
    }

    /// Pattern on the outputs.
    pub fn latched(&self, order: BitOrder) -> [u8; N] {
        Self::decode(&self.latched, order)
    }

    /// Pattern sitting in the shift stage, latched or not.
    pub fn shifted(&self, order: BitOrder) -> [u8; N] {
        Self::decode(&self.shifted, order)
    }

    fn decode(history: &[bool], order: BitOrder) -> [u8; N] {
        let total = N * 8;
        let mut frame = [false; HISTORY];
        // Cells never clocked since reset hold zero.
        let take = history.len().min(total);
        let start = total - take;
        frame[start..total].copy_from_slice(&history[history.len() - take..]);

        let mut bytes = [0u8; N];
        for (chip, byte) in bytes.iter_mut().enumerate() {
            for step in 0..8 {
                if frame[chip * 8 + step] {
                    *byte |= 1 << order.bit_index(step);
                }
            }
        }
        bytes
    }
}

#[test]
fn sim_keeps_last_frame_only() {
    let mut events: heapless::Vec<Event<Line>, 64> = heapless::Vec::new();
    // Nine bits into a one-chip chain: the first one falls off the end.
    for step in 0..9 {
        let level = PinState::from(step == 0 || step == 8);
        events.push(Event::Set(Line::Data, level)).unwrap();
        events.push(Event::Set(Line::Clock, PinState::High)).unwrap();
        events.push(Event::Set(Line::Clock, PinState::Low)).unwrap();
    }
    events.push(Event::Set(Line::Latch, PinState::High)).unwrap();

    let sim = ChainSim::<1>::replay(&events);
    assert_eq!(sim.latched(BitOrder::LsbFirst), [0b1000_0000]);
    assert!(sim.outputs_enabled());
}
