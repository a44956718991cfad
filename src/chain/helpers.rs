//! Utility functions for pin addressing across a chain.
//!
//! Pin `p` of a chain lives on chip `p / 8` at bit `p % 8` of that chip's
//! shadow byte. These helpers are useful when mapping application outputs
//! (relays, LEDs) onto chain pins.

/// Number of outputs per chip.
pub const PINS_PER_CHIP: usize = 8;

/// Total number of addressable outputs for a chain of `chips` chips.
#[inline]
pub const fn pin_count(chips: usize) -> usize {
    chips * PINS_PER_CHIP
}

/// Splits a pin index into `(chip, bit)`.
///
/// Returns `None` if `pin` is not below `pin_count(chips)`.
///
/// # Example
/// ```
/// use hc595_chain::chain::helpers::pin_address;
///
/// // Three chips: pins 0..24
/// assert_eq!(pin_address(0, 3), Some((0, 0)));
/// assert_eq!(pin_address(8, 3), Some((1, 0)));
/// assert_eq!(pin_address(23, 3), Some((2, 7)));
/// assert_eq!(pin_address(24, 3), None);
/// ```
#[inline]
pub const fn pin_address(pin: usize, chips: usize) -> Option<(usize, usize)> {
    if pin >= pin_count(chips) {
        return None;
    }
    Some((pin / PINS_PER_CHIP, pin % PINS_PER_CHIP))
}

/// Joins a `(chip, bit)` pair back into a pin index.
///
/// # Example
/// ```
/// use hc595_chain::chain::helpers::pin_index;
///
/// assert_eq!(pin_index(2, 5), 21);
/// ```
#[inline]
pub const fn pin_index(chip: usize, bit: usize) -> usize {
    chip * PINS_PER_CHIP + bit
}

#[test]
fn pin_address_edge_cases() {
    // Single chip
    assert_eq!(pin_address(7, 1), Some((0, 7)));
    assert_eq!(pin_address(8, 1), None);

    // Empty chain has no pins
    assert_eq!(pin_address(0, 0), None);

    // Round trip across chip boundaries
    for pin in 0..pin_count(4) {
        let (chip, bit) = pin_address(pin, 4).unwrap();
        assert_eq!(pin_index(chip, bit), pin);
    }
}
