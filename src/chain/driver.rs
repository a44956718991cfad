use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::chain::{
    ChainError,
    config::ChainConfig,
    helpers::{PINS_PER_CHIP, pin_address, pin_count},
    image::ChainImage,
    lines::LineDriver,
    types::{BitOrder, PinState, Update},
};

/// Bit-bang driver for `N` daisy-chained 74HC595 chips.
///
/// Keeps a shadow of the pattern last latched onto the outputs: after any
/// successful write the shadow equals the hardware, and a failed operation
/// leaves it untouched (the latch is only raised once the whole stream is
/// out).
///
/// # Const Generics
/// - `N`: number of chips in the chain, at least 1
///
/// # Type Parameters
/// - `G`: line collaborator driving data, clock, latch and control lines
/// - `D`: blocking delay provider
pub struct ChainDriver<G, D, const N: usize>
where
    G: LineDriver,
    D: DelayNs,
{
    config: ChainConfig<G::Line>,
    lines: G,
    delay: D,
    shadow: [u8; N],
}

impl<G, D, const N: usize> core::fmt::Debug for ChainDriver<G, D, N>
where
    G: LineDriver,
    D: DelayNs,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChainDriver")
            .field("config", &self.config)
            .field("shadow", &self.shadow)
            .finish_non_exhaustive()
    }
}

impl<G, D, const N: usize> ChainDriver<G, D, N>
where
    G: LineDriver,
    D: DelayNs,
{
    /// Creates a driver with an all-zero shadow. Touches no lines.
    ///
    /// Fails with [`ChainError::EmptyChain`] if `N` is 0.
    pub fn new(
        config: ChainConfig<G::Line>,
        lines: G,
        delay: D,
    ) -> Result<Self, ChainError<G::Error>> {
        if N == 0 {
            warn!("hc595: refusing to build an empty chain");
            return Err(ChainError::EmptyChain);
        }

        Ok(Self {
            config,
            lines,
            delay,
            shadow: [0; N],
        })
    }

    /// Brings the chain up with every output at zero.
    ///
    /// Outputs stay disabled (when `/OE` is wired) until the chain has been
    /// cleared, so no stale pattern shows during startup. When `/MR` is wired
    /// it is pulsed HIGH, LOW, HIGH first.
    pub fn initialize(&mut self) -> Result<(), ChainError<G::Error>> {
        let ChainConfig {
            data,
            latch,
            clock,
            output_enable,
            reset,
            timing,
        } = self.config;

        debug!("hc595: initializing {} chip(s)", N);

        for line in [data, latch, clock] {
            self.configure(line)?;
            self.set(line, PinState::Low)?;
        }

        if let Some(oe) = output_enable {
            self.configure(oe)?;
            self.set(oe, PinState::High)?;
        }

        if let Some(mr) = reset {
            self.configure(mr)?;
            self.set(mr, PinState::High)?;
            self.delay.delay_ms(timing.reset_pulse_ms);
            self.set(mr, PinState::Low)?;
            self.delay.delay_ms(timing.reset_pulse_ms);
            self.set(mr, PinState::High)?;
        }

        self.all_off(true)?;

        if let Some(oe) = output_enable {
            self.set(oe, PinState::Low)?;
        }

        Ok(())
    }

    /// Shifts one byte per chip into the chain and latches it.
    ///
    /// `values[0]` is shifted first. Each byte goes out in `order`, with a
    /// settle delay while the clock is high.
    ///
    /// Fails with [`ChainError::InvalidLength`] before touching any line if
    /// `values` does not hold exactly `N` bytes.
    pub fn write(&mut self, values: &[u8], order: BitOrder) -> Result<(), ChainError<G::Error>> {
        if values.len() != N {
            warn!("hc595: write of {} bytes to {} chip(s)", values.len(), N);
            return Err(ChainError::InvalidLength {
                expected: N,
                actual: values.len(),
            });
        }

        debug!("hc595: write {:02x?} {:?}", values, order);

        let mut next = [0u8; N];
        self.set(self.config.latch, PinState::Low)?;
        for (part, value) in values.iter().enumerate() {
            for step in 0..PINS_PER_CHIP {
                let level = order.level(*value, step);
                self.shift_bit(level, true)?;
                if level == PinState::High {
                    next[part] |= 1 << order.bit_index(step);
                }
            }
        }
        self.set(self.config.latch, PinState::High)?;

        self.shadow = next;
        Ok(())
    }

    /// Switches a single output, keeping every other output as it is.
    ///
    /// The chips have no random access, so the whole chain is re-shifted
    /// from the shadow with only `pin` changed. Within each chip, bit 0 goes
    /// out first regardless of the order used by [`write`](Self::write).
    ///
    /// Fails with [`ChainError::OutOfRange`] before touching any line if
    /// `pin` is not below `N * 8`.
    pub fn write_pin(&mut self, pin: usize, on: bool) -> Result<(), ChainError<G::Error>> {
        let Some((chip, bit)) = pin_address(pin, N) else {
            let pins = pin_count(N);
            warn!("hc595: pin {} out of range for {} outputs", pin, pins);
            return Err(ChainError::OutOfRange { pin, pins });
        };

        trace!("hc595: pin {} (chip {} bit {}) -> {}", pin, chip, bit, on);

        let mut next = self.shadow;
        if on {
            next[chip] |= 1 << bit;
        } else {
            next[chip] &= !(1 << bit);
        }

        self.shift_frame(&next)?;
        self.shadow = next;
        Ok(())
    }

    /// Shifts `N * 8` zeros into the chain.
    ///
    /// With `latch` set, the zeros are latched and the shadow cleared. Without
    /// it, the latch line is left alone and so are the outputs and the shadow.
    ///
    /// Returns the current shadow.
    pub fn all_off(&mut self, latch: bool) -> Result<&[u8; N], ChainError<G::Error>> {
        debug!("hc595: all off (latch: {})", latch);

        if latch {
            self.set(self.config.latch, PinState::Low)?;
        }
        for _ in 0..pin_count(N) {
            self.shift_bit(PinState::Low, true)?;
        }
        if latch {
            self.set(self.config.latch, PinState::High)?;
            self.shadow = [0; N];
        }

        Ok(&self.shadow)
    }

    /// Pattern last latched onto the outputs. No line activity.
    #[inline]
    pub fn state(&self) -> &[u8; N] {
        &self.shadow
    }

    /// Edits many outputs and shifts the result once.
    ///
    /// The closure works on a copy of the shadow. Returning
    /// [`Update::Latch`] shifts the edited image (same wire order as
    /// [`write_pin`](Self::write_pin)) unless it equals the current shadow;
    /// [`Update::Discard`] drops the edits without any line activity.
    ///
    /// ```
    /// use hc595_chain::prelude::*;
    ///
    /// let trace: Trace<u8, 256> = Trace::new();
    /// let mut chain: ChainDriver<_, _, 2> =
    ///     ChainDriver::new(ChainConfig::new(0, 1, 2), &trace, &trace).unwrap();
    ///
    /// let on = chain
    ///     .update(|image| {
    ///         image.set_pin(1, true);
    ///         image.set_pin(14, true);
    ///         Update::Latch(image.count_on())
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(on, 2);
    /// assert_eq!(chain.state(), &[0b0000_0010, 0b0100_0000]);
    /// assert_eq!(trace.clock_pulses(2), 16);
    /// ```
    pub fn update<R>(
        &mut self,
        f: impl FnOnce(&mut ChainImage<N>) -> Update<R>,
    ) -> Result<R, ChainError<G::Error>> {
        let mut image = ChainImage::from_chips(self.shadow);
        let result = f(&mut image);

        if !result.is_latch() {
            trace!("hc595: update discarded");
            return Ok(result.into_inner());
        }

        let next = *image.as_chips();
        if next == self.shadow {
            trace!("hc595: update unchanged, nothing to shift");
            return Ok(result.into_inner());
        }

        debug!("hc595: update {:02x?}", next);
        self.shift_frame(&next)?;
        self.shadow = next;
        Ok(result.into_inner())
    }

    /// Enables or disables the outputs through the active-low `/OE` line.
    ///
    /// Fails with [`ChainError::NotConnected`] if `/OE` is not wired. The
    /// shadow is unaffected: the latched pattern reappears once re-enabled.
    pub fn set_output_enabled(&mut self, enabled: bool) -> Result<(), ChainError<G::Error>> {
        let oe = self.config.output_enable.ok_or(ChainError::NotConnected)?;
        let state = if enabled { "enabled" } else { "disabled" };
        debug!("hc595: outputs {}", state);
        self.set(oe, PinState::from(!enabled))
    }

    /// Reads one output from the shadow.
    pub fn pin(&self, pin: usize) -> Result<bool, ChainError<G::Error>> {
        ChainImage::from_chips(self.shadow)
            .pin(pin)
            .ok_or(ChainError::OutOfRange {
                pin,
                pins: pin_count(N),
            })
    }

    /// Number of outputs currently on.
    pub fn count_on(&self) -> usize {
        ChainImage::from_chips(self.shadow).count_on()
    }

    pub const fn chain_len(&self) -> usize {
        N
    }

    pub const fn pin_count(&self) -> usize {
        pin_count(N)
    }

    pub fn config(&self) -> &ChainConfig<G::Line> {
        &self.config
    }

    /// Gives the collaborators back.
    pub fn release(self) -> (G, D) {
        (self.lines, self.delay)
    }

    /// Latch LOW, every bit of `frame` with bit 0 of each chip first and no
    /// settle delay, latch HIGH.
    fn shift_frame(&mut self, frame: &[u8; N]) -> Result<(), ChainError<G::Error>> {
        self.set(self.config.latch, PinState::Low)?;
        for byte in frame {
            for step in 0..PINS_PER_CHIP {
                self.shift_bit(BitOrder::LsbFirst.level(*byte, step), false)?;
            }
        }
        self.set(self.config.latch, PinState::High)
    }

    /// Data to `level`, clock HIGH, optional settle, clock LOW.
    fn shift_bit(&mut self, level: PinState, settle: bool) -> Result<(), ChainError<G::Error>> {
        let ChainConfig { data, clock, .. } = self.config;
        self.set(data, level)?;
        self.set(clock, PinState::High)?;
        if settle {
            self.delay.delay_ms(self.config.timing.settle_ms);
        }
        self.set(clock, PinState::Low)
    }

    #[inline]
    fn configure(&mut self, line: G::Line) -> Result<(), ChainError<G::Error>> {
        self.lines.configure_output(line).map_err(ChainError::Line)
    }

    #[inline]
    fn set(&mut self, line: G::Line, level: PinState) -> Result<(), ChainError<G::Error>> {
        self.lines.set_level(line, level).map_err(ChainError::Line)
    }
}
