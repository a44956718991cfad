use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::delay::DelayNs;

use crate::chain::{driver::ChainDriver, lines::LineDriver};

/// A [`ChainDriver`] that can be reached from both main-line code and
/// interrupt handlers.
///
/// Each [`with`](SharedChain::with) call holds a critical section for its
/// whole duration, so a shift sequence is never interleaved with another.
/// Keep closures short: a full-chain write sleeps a millisecond per bit.
pub struct SharedChain<G, D, const N: usize>
where
    G: LineDriver,
    D: DelayNs,
{
    inner: Mutex<RefCell<ChainDriver<G, D, N>>>,
}

impl<G, D, const N: usize> core::fmt::Debug for SharedChain<G, D, N>
where
    G: LineDriver,
    D: DelayNs,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedChain").finish_non_exhaustive()
    }
}

impl<G, D, const N: usize> SharedChain<G, D, N>
where
    G: LineDriver,
    D: DelayNs,
{
    pub const fn new(driver: ChainDriver<G, D, N>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(driver)),
        }
    }

    /// Runs `f` with exclusive access to the driver inside a critical section.
    ///
    /// # Panics
    /// Panics if called re-entrantly from within `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut ChainDriver<G, D, N>) -> R) -> R {
        critical_section::with(|cs| {
            let mut driver = self.inner.borrow_ref_mut(cs);
            f(&mut driver)
        })
    }

    /// Copy of the shadow state.
    pub fn state(&self) -> [u8; N] {
        self.with(|driver| *driver.state())
    }

    pub fn into_inner(self) -> ChainDriver<G, D, N> {
        self.inner.into_inner().into_inner()
    }
}
