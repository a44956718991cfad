use embedded_hal::delay::DelayNs;

use crate::chain::{
    ChainError,
    config::{ChainConfig, Timing},
    driver::ChainDriver,
    lines::LineDriver,
};

// Builder states
pub struct NeedData;
pub struct NeedLatch<L> {
    data: L,
}
pub struct NeedClock<L> {
    data: L,
    latch: L,
}
pub struct NeedChips<L> {
    config: ChainConfig<L>,
}
pub struct Ready<L, const N: usize> {
    config: ChainConfig<L>,
}

/// Type-state builder for a [`ChainDriver`].
///
/// Data, latch and clock must be given in that order, then the chain length.
/// Output-enable, reset and timing are optional and can be set any time
/// after the clock line.
pub struct ChainBuilder<State> {
    state: State,
}

// Start the builder
impl ChainBuilder<NeedData> {
    pub fn new() -> Self {
        ChainBuilder { state: NeedData }
    }

    pub fn data<L>(self, line: L) -> ChainBuilder<NeedLatch<L>> {
        ChainBuilder {
            state: NeedLatch { data: line },
        }
    }
}

impl Default for ChainBuilder<NeedData> {
    fn default() -> Self {
        Self::new()
    }
}

// Set latch line
impl<L> ChainBuilder<NeedLatch<L>> {
    pub fn latch(self, line: L) -> ChainBuilder<NeedClock<L>> {
        ChainBuilder {
            state: NeedClock {
                data: self.state.data,
                latch: line,
            },
        }
    }
}

// Set clock line
impl<L> ChainBuilder<NeedClock<L>> {
    pub fn clock(self, line: L) -> ChainBuilder<NeedChips<L>> {
        let NeedClock { data, latch } = self.state;
        ChainBuilder {
            state: NeedChips {
                config: ChainConfig::new(data, latch, line),
            },
        }
    }
}

// Optional lines and chain length
impl<L> ChainBuilder<NeedChips<L>> {
    /// Start from complete wiring, e.g. one loaded from board settings.
    pub fn from_config(config: ChainConfig<L>) -> Self {
        ChainBuilder {
            state: NeedChips { config },
        }
    }

    /// Wire the active-low output enable.
    pub fn output_enable(mut self, line: L) -> Self {
        self.state.config.output_enable = Some(line);
        self
    }

    /// Wire the active-low master reset.
    pub fn reset(mut self, line: L) -> Self {
        self.state.config.reset = Some(line);
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.state.config.timing = timing;
        self
    }

    /// Set the number of chained chips.
    ///
    /// `N` = 0 is rejected by [`build`](ChainBuilder::build).
    pub fn chips<const N: usize>(self) -> ChainBuilder<Ready<L, N>> {
        ChainBuilder {
            state: Ready {
                config: self.state.config,
            },
        }
    }
}

// Build the final driver
impl<L, const N: usize> ChainBuilder<Ready<L, N>> {
    pub fn output_enable(mut self, line: L) -> Self {
        self.state.config.output_enable = Some(line);
        self
    }

    pub fn reset(mut self, line: L) -> Self {
        self.state.config.reset = Some(line);
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.state.config.timing = timing;
        self
    }

    /// The wiring collected so far.
    pub fn config(&self) -> &ChainConfig<L> {
        &self.state.config
    }

    /// Build the driver. No line is touched until
    /// [`initialize`](ChainDriver::initialize).
    pub fn build<G, D>(
        self,
        lines: G,
        delay: D,
    ) -> Result<ChainDriver<G, D, N>, ChainError<G::Error>>
    where
        G: LineDriver<Line = L>,
        D: DelayNs,
    {
        ChainDriver::new(self.state.config, lines, delay)
    }
}
