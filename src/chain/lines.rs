use embedded_hal::digital::OutputPin;

use crate::chain::types::PinState;

/// Drives the digital lines a chain is wired to.
///
/// This is the whole hardware contract of the driver: lines are named by an
/// opaque [`Line`](LineDriver::Line) identifier, configured once as outputs,
/// then set HIGH or LOW.
pub trait LineDriver {
    /// Identifier of one digital line.
    type Line: Copy + PartialEq + core::fmt::Debug;
    /// Error reported when a line cannot be configured or driven.
    type Error: core::fmt::Debug;

    /// Configures `line` as a push-pull output. Must be idempotent.
    fn configure_output(&mut self, line: Self::Line) -> Result<(), Self::Error>;

    /// Drives `line` to `level`.
    fn set_level(&mut self, line: Self::Line, level: PinState) -> Result<(), Self::Error>;
}

impl<T: LineDriver + ?Sized> LineDriver for &mut T {
    type Line = T::Line;
    type Error = T::Error;

    #[inline]
    fn configure_output(&mut self, line: Self::Line) -> Result<(), Self::Error> {
        T::configure_output(self, line)
    }

    #[inline]
    fn set_level(&mut self, line: Self::Line, level: PinState) -> Result<(), Self::Error> {
        T::set_level(self, line, level)
    }
}

/// Errors from a [`PinBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankError<E> {
    /// Line index is not below the bank size.
    UnknownLine(usize),
    /// The underlying pin failed.
    Pin(E),
}

/// [`LineDriver`] over a fixed set of `embedded-hal` output pins.
///
/// Lines are identified by their index in the bank. Pins handed out by a HAL
/// are already outputs, so configuring a line only checks that it exists.
///
/// ```
/// use core::convert::Infallible;
/// use embedded_hal::digital::{ErrorType, OutputPin};
/// use hc595_chain::prelude::*;
///
/// struct Pin(bool);
///
/// impl ErrorType for Pin {
///     type Error = Infallible;
/// }
///
/// impl OutputPin for Pin {
///     fn set_low(&mut self) -> Result<(), Infallible> {
///         self.0 = false;
///         Ok(())
///     }
///     fn set_high(&mut self) -> Result<(), Infallible> {
///         self.0 = true;
///         Ok(())
///     }
/// }
///
/// let mut bank = PinBank::new([Pin(false), Pin(false), Pin(false)]);
/// bank.set_level(1, PinState::High).unwrap();
/// assert_eq!(bank.set_level(3, PinState::High), Err(BankError::UnknownLine(3)));
///
/// let [_, latch, _] = bank.release();
/// assert!(latch.0);
/// ```
#[derive(Debug)]
pub struct PinBank<P, const K: usize> {
    pins: [P; K],
}

impl<P: OutputPin, const K: usize> PinBank<P, K> {
    pub fn new(pins: [P; K]) -> Self {
        Self { pins }
    }

    /// Gives the pins back.
    pub fn release(self) -> [P; K] {
        self.pins
    }
}

impl<P: OutputPin, const K: usize> LineDriver for PinBank<P, K> {
    type Line = usize;
    type Error = BankError<P::Error>;

    fn configure_output(&mut self, line: usize) -> Result<(), Self::Error> {
        if line >= K {
            return Err(BankError::UnknownLine(line));
        }
        Ok(())
    }

    fn set_level(&mut self, line: usize, level: PinState) -> Result<(), Self::Error> {
        self.pins
            .get_mut(line)
            .ok_or(BankError::UnknownLine(line))?
            .set_state(level)
            .map_err(BankError::Pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Pin that fails every write once `broken` is set.
    struct MockPin {
        high: bool,
        broken: bool,
    }

    impl MockPin {
        fn new() -> Self {
            MockPin {
                high: false,
                broken: false,
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn set_level_drives_indexed_pin() {
        let mut bank = PinBank::new([MockPin::new(), MockPin::new()]);
        bank.configure_output(1).unwrap();
        bank.set_level(1, PinState::High).unwrap();
        bank.set_level(0, PinState::Low).unwrap();

        let [a, b] = bank.release();
        assert!(!a.high);
        assert!(b.high);
    }

    #[test]
    fn unknown_line_is_rejected() {
        let mut bank = PinBank::new([MockPin::new()]);
        assert_eq!(bank.configure_output(1), Err(BankError::UnknownLine(1)));
        assert_eq!(
            bank.set_level(5, PinState::Low),
            Err(BankError::UnknownLine(5))
        );
    }

    #[test]
    fn pin_errors_propagate() {
        let mut broken = MockPin::new();
        broken.broken = true;
        let mut bank = PinBank::new([MockPin::new(), broken]);

        assert_eq!(
            bank.set_level(1, PinState::High),
            Err(BankError::Pin(ErrorKind::Other))
        );
        bank.set_level(0, PinState::High).unwrap();
    }

    #[test]
    fn mut_ref_forwards() {
        let mut bank = PinBank::new([MockPin::new()]);
        {
            let mut by_ref = &mut bank;
            LineDriver::set_level(&mut by_ref, 0, PinState::High).unwrap();
        }
        assert!(bank.release()[0].high);
    }
}
