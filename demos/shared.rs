//! Shared chain example: main loop and ISR driving the same chain
//!
//! This example demonstrates:
//! - A `SharedChain` in a static, reachable from both contexts
//! - Real `OutputPin`s wired through a `PinBank`
//! - Main loop rewriting one chip with `update`
//! - Simulated ISR toggling a heartbeat output with `write_pin`
//! - Every shift sequence running inside one critical section

use std::convert::Infallible;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use hc595_chain::prelude::*;

const HEARTBEAT: usize = 15;

/// GPIO stand-in that counts its rising edges.
struct EdgePin {
    high: bool,
    rising_edges: &'static AtomicU32,
}

impl EdgePin {
    const fn new(rising_edges: &'static AtomicU32) -> Self {
        Self {
            high: false,
            rising_edges,
        }
    }
}

impl ErrorType for EdgePin {
    type Error = Infallible;
}

impl OutputPin for EdgePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.high {
            self.rising_edges.fetch_add(1, Ordering::Relaxed);
        }
        self.high = true;
        Ok(())
    }
}

struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns.into()));
    }
}

type Chain = SharedChain<PinBank<EdgePin, 3>, StdDelay, 2>;

static DATA_EDGES: AtomicU32 = AtomicU32::new(0);
static LATCH_EDGES: AtomicU32 = AtomicU32::new(0);
static CLOCK_EDGES: AtomicU32 = AtomicU32::new(0);

// Would be a plain static initialized in main on a device
static CHAIN: OnceLock<Chain> = OnceLock::new();

// Simulate an interrupt flag
static INTERRUPT_PENDING: AtomicBool = AtomicBool::new(false);

fn chain() -> &'static Chain {
    CHAIN.get_or_init(|| {
        let pins = [
            EdgePin::new(&DATA_EDGES),
            EdgePin::new(&LATCH_EDGES),
            EdgePin::new(&CLOCK_EDGES),
        ];
        let mut driver = ChainBuilder::new()
            .data(0)
            .latch(1)
            .clock(2)
            .chips::<2>()
            .timing(Timing::new(0, 0))
            .build(PinBank::new(pins), StdDelay)
            .unwrap();
        driver.initialize().unwrap();
        SharedChain::new(driver)
    })
}

pub fn main() {
    println!("=== Shared Chain Example ===\n");

    let chain = chain();

    // Spawn ISR simulator thread
    let isr_thread = thread::spawn(|| {
        println!("ISR simulator: Started");

        for _ in 0..20 {
            if INTERRUPT_PENDING.load(Ordering::Acquire) {
                handle_interrupt();
                INTERRUPT_PENDING.store(false, Ordering::Release);
            }
            thread::sleep(Duration::from_millis(10));
        }

        println!("ISR simulator: Stopped");
    });

    println!("Main loop: Starting\n");

    for cycle in 0..5 {
        println!("Main loop: Cycle {cycle}");

        // Only chip 0 is rewritten, the heartbeat on chip 1 survives
        chain
            .with(|driver| {
                driver.update(|image| {
                    image.set_chip(0, 1 << cycle);
                    Update::Latch(())
                })
            })
            .unwrap();
        println!("  Outputs: {:02X?}", chain.state());

        // Trigger "interrupt"
        INTERRUPT_PENDING.store(true, Ordering::Release);

        thread::sleep(Duration::from_millis(40));
    }

    isr_thread.join().unwrap();

    let state = chain.state();
    assert_eq!(state[0], 1 << 4);
    println!("\nFinal outputs: {:02X?}", state);
    println!(
        "Latch edges: {}, clock edges: {}",
        LATCH_EDGES.load(Ordering::Relaxed),
        CLOCK_EDGES.load(Ordering::Relaxed)
    );
}

// Simulates ISR handler
fn handle_interrupt() {
    println!("\n>>> ISR: Toggling heartbeat");

    chain()
        .with(|driver| {
            let on = driver.pin(HEARTBEAT)?;
            driver.write_pin(HEARTBEAT, !on)
        })
        .unwrap();

    println!("<<< ISR: Complete\n");
}
