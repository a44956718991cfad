pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod helpers;
pub mod image;
pub mod lines;
pub mod shared;
pub mod trace;
pub mod types;

#[cfg(test)]
mod test_support;

pub use builder::ChainBuilder;
pub use config::{ChainConfig, Timing};
pub use driver::ChainDriver;
pub use error::ChainError;
pub use image::ChainImage;
pub use lines::{BankError, LineDriver, PinBank};
pub use shared::SharedChain;
pub use trace::{Event, Trace, TraceFull};
pub use types::{BitOrder, PinState, Update};

pub mod prelude {
    pub use super::{
        BankError, BitOrder, ChainBuilder, ChainConfig, ChainDriver, ChainError, ChainImage, Event,
        LineDriver, PinBank, PinState, SharedChain, Timing, Trace, TraceFull, Update,
    };
}
