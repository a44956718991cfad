/// Delays used by the bit-bang protocol, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Clock-high hold for block writes and clears.
    pub settle_ms: u32,
    /// Each phase of the reset pulse during bring-up.
    pub reset_pulse_ms: u32,
}

impl Timing {
    pub const DEFAULT_SETTLE_MS: u32 = 1;
    pub const DEFAULT_RESET_PULSE_MS: u32 = 10;

    pub const fn new(settle_ms: u32, reset_pulse_ms: u32) -> Self {
        Self {
            settle_ms,
            reset_pulse_ms,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SETTLE_MS, Self::DEFAULT_RESET_PULSE_MS)
    }
}

/// Wiring of a chain: which lines carry data, clock and latch, and which
/// optional control lines are connected.
///
/// `L` is the line identifier understood by the
/// [`LineDriver`](crate::chain::LineDriver). Fixed for the lifetime of a
/// driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig<L> {
    pub data: L,
    pub latch: L,
    pub clock: L,
    /// Active-low output enable (`/OE`). `None` if tied to ground.
    pub output_enable: Option<L>,
    /// Active-low master reset (`/MR`). `None` if tied to Vcc.
    pub reset: Option<L>,
    pub timing: Timing,
}

impl<L> ChainConfig<L> {
    /// Three-wire configuration with default timing.
    pub fn new(data: L, latch: L, clock: L) -> Self {
        Self {
            data,
            latch,
            clock,
            output_enable: None,
            reset: None,
            timing: Timing::default(),
        }
    }

    pub fn with_output_enable(mut self, line: L) -> Self {
        self.output_enable = Some(line);
        self
    }

    pub fn with_reset(mut self, line: L) -> Self {
        self.reset = Some(line);
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_three_wire_with_default_timing() {
        let config = ChainConfig::new(4u8, 5, 6);
        assert_eq!(config.output_enable, None);
        assert_eq!(config.reset, None);
        assert_eq!(config.timing, Timing::new(1, 10));
    }

    #[test]
    fn optional_lines_are_set() {
        let config = ChainConfig::new(4u8, 5, 6)
            .with_output_enable(7)
            .with_reset(8)
            .with_timing(Timing::new(0, 2));
        assert_eq!(config.output_enable, Some(7));
        assert_eq!(config.reset, Some(8));
        assert_eq!(config.timing.reset_pulse_ms, 2);
    }
}
