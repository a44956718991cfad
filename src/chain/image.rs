use bitmaps::Bitmap;

use crate::chain::helpers::{PINS_PER_CHIP, pin_address, pin_count, pin_index};

/// Editable copy of a chain's output pattern.
///
/// Handed to [`ChainDriver::update`](crate::chain::ChainDriver::update)
/// closures. Edits only reach the hardware if the closure returns
/// [`Update::Latch`](crate::chain::Update::Latch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainImage<const N: usize> {
    chips: [u8; N],
}

impl<const N: usize> ChainImage<N> {
    /// All outputs off.
    pub const fn new() -> Self {
        Self { chips: [0; N] }
    }

    pub const fn from_chips(chips: [u8; N]) -> Self {
        Self { chips }
    }

    pub const fn as_chips(&self) -> &[u8; N] {
        &self.chips
    }

    /// Reads one output. Returns `None` if `pin` is out of range.
    pub fn pin(&self, pin: usize) -> Option<bool> {
        let (chip, bit) = pin_address(pin, N)?;
        Some(Self::bits(self.chips[chip]).get(bit))
    }

    /// Sets one output, returning its previous value.
    ///
    /// Returns `None` and changes nothing if `pin` is out of range.
    pub fn set_pin(&mut self, pin: usize, on: bool) -> Option<bool> {
        let (chip, bit) = pin_address(pin, N)?;
        let mut bits = Self::bits(self.chips[chip]);
        let prev = bits.set(bit, on);
        self.chips[chip] = bits.into_value();
        Some(prev)
    }

    /// Reads one chip's byte.
    pub fn chip(&self, chip: usize) -> Option<u8> {
        self.chips.get(chip).copied()
    }

    /// Replaces one chip's byte, returning the previous one.
    pub fn set_chip(&mut self, chip: usize, byte: u8) -> Option<u8> {
        let slot = self.chips.get_mut(chip)?;
        Some(core::mem::replace(slot, byte))
    }

    /// Turns every output off.
    pub fn clear(&mut self) {
        self.chips = [0; N];
    }

    /// Number of outputs that are on.
    pub fn count_on(&self) -> usize {
        self.chips.iter().map(|byte| Self::bits(*byte).len()).sum()
    }

    /// Indices of the outputs that are on, in ascending order.
    pub fn iter_on(&self) -> impl Iterator<Item = usize> + '_ {
        self.chips.iter().enumerate().flat_map(|(chip, byte)| {
            let bits = Self::bits(*byte);
            let first = bits.first_index();
            core::iter::successors(first, move |bit| bits.next_index(*bit))
                .map(move |bit| pin_index(chip, bit))
        })
    }

    pub const fn pin_count(&self) -> usize {
        pin_count(N)
    }

    #[inline]
    fn bits(byte: u8) -> Bitmap<PINS_PER_CHIP> {
        Bitmap::from_value(byte)
    }
}

impl<const N: usize> Default for ChainImage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> From<[u8; N]> for ChainImage<N> {
    fn from(chips: [u8; N]) -> Self {
        Self::from_chips(chips)
    }
}
