pub use embedded_hal::digital::PinState;

/// Order in which the bits of each chip's byte go out on the data line.
///
/// The order applies per byte: every chip's byte is shifted independently
/// with the same convention, never as one wide value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitOrder {
    /// Bit 0 first, bit 7 last.
    LsbFirst,
    /// Bit 7 first, bit 0 last.
    MsbFirst,
}

impl BitOrder {
    /// Position within the byte of the `step`-th bit sent (`step` in `0..8`).
    #[inline]
    pub const fn bit_index(self, step: usize) -> usize {
        match self {
            BitOrder::LsbFirst => step,
            BitOrder::MsbFirst => 7 - step,
        }
    }

    /// Level of the `step`-th bit sent for `byte`.
    #[inline]
    pub fn level(self, byte: u8, step: usize) -> PinState {
        PinState::from(byte & (1 << self.bit_index(step)) != 0)
    }
}

/// Result of a batched update indicating whether to shift the edited image.
///
/// Used as the return type for [`ChainDriver::update`](crate::chain::ChainDriver::update)
/// closures to clearly indicate intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update<R> {
    /// Shift and latch the edited image, then return the result.
    Latch(R),
    /// Throw the edits away; return the result.
    Discard(R),
}

impl<R> Update<R> {
    /// Returns true if this result asks for the image to be latched.
    #[inline]
    pub fn is_latch(&self) -> bool {
        matches!(self, Update::Latch(_))
    }

    /// Unwraps the inner value regardless of the decision.
    #[inline]
    pub fn into_inner(self) -> R {
        match self {
            Update::Latch(r) | Update::Discard(r) => r,
        }
    }
}
