//! A `no_std`, no-alloc driver for daisy-chained 74HC595 shift registers.
//!
//! This crate bit-bangs a serial stream over three (or five) digital output
//! lines to drive one or more chained serial-in/parallel-out latch chips,
//! making `N * 8` outputs addressable individually or as a block.
//!
//! # Features
//!
//! - **Shadow state** - the driver keeps a copy of the last latched outputs,
//!   since the chips offer no read-back
//! - **Single-pin writes** - change one output, re-shift the whole chain
//! - **Batched updates** - edit many outputs, shift once
//! - **Pluggable lines** - any [`LineDriver`](crate::chain::LineDriver), with
//!   an adapter for `embedded-hal` output pins
//! - **Protocol tracing** - record every line event for verification
//!
//! # Wiring
//!
//! ```text
//!            ┌────────┐   QH'  ┌────────┐   QH'  ┌────────┐
//!  data  ───▶│ chip 0 │───────▶│ chip 1 │───────▶│ chip 2 │
//!  clock ───▶│        │        │        │        │        │
//!  latch ───▶│        │        │        │        │        │
//!  /OE   ───▶│        │        │        │        │        │  (optional)
//!  /MR   ───▶│        │        │        │        │        │  (optional)
//!            └────────┘        └────────┘        └────────┘
//! ```
//!
//! Every operation frames the bit stream with latch LOW before and latch
//! HIGH after, so the chips commit the new pattern all at once.
//!
//! # Example
//!
//! ```rust
//! use hc595_chain::prelude::*;
//!
//! // Record line activity instead of driving real pins.
//! let trace: Trace<u8, 512> = Trace::new();
//!
//! let mut chain = ChainBuilder::new()
//!     .data(0)
//!     .latch(1)
//!     .clock(2)
//!     .chips::<2>()
//!     .build(&trace, &trace)
//!     .unwrap();
//!
//! chain.initialize().unwrap();
//! chain.write(&[0b1010_0000, 0x0F], BitOrder::MsbFirst).unwrap();
//! chain.write_pin(9, false).unwrap();
//!
//! assert_eq!(chain.state(), &[0b1010_0000, 0x0D]);
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod chain;

pub mod prelude {
    pub use crate::chain::prelude::*;
}
