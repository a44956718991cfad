//! Chaser example: one lit output running up and down a three-chip chain
//!
//! This example demonstrates:
//! - Wiring taken from a `ChainConfig` instead of hard-coded lines
//! - Building a driver with `ChainBuilder::from_config`
//! - Switching single outputs with `write_pin`
//! - Recording line activity and sleeps with a `Trace`

use embedded_hal::delay::DelayNs;
use hc595_chain::prelude::*;

// GPIO numbers of data, latch, clock, /OE and /MR
fn board_wiring() -> ChainConfig<u8> {
    ChainConfig::new(8, 6, 5)
        .with_output_enable(7)
        .with_reset(3)
}

fn render(state: &[u8]) -> String {
    let mut bar = String::new();
    for byte in state {
        for bit in 0..8 {
            bar.push(if byte & (1 << bit) != 0 { '#' } else { '.' });
        }
    }
    bar
}

pub fn main() {
    println!("=== Chaser Example ===\n");

    let config = board_wiring();
    println!("Wiring: {:?}\n", config);

    // Two write_pin calls per step, 24 steps each way
    let trace: Trace<u8, 8192> = Trace::new();
    let mut chain = ChainBuilder::from_config(config)
        .chips::<3>()
        .build(&trace, &trace)
        .unwrap();
    chain.initialize().unwrap();

    // Stands in for the speed potentiometer
    let speed_ms = 40;
    let mut delay = &trace;

    println!("Up:");
    for pin in 0..chain.pin_count() {
        chain.write_pin(pin, true).unwrap();
        println!("  {:2} {}", pin, render(chain.state()));
        delay.delay_ms(speed_ms);
        chain.write_pin(pin, false).unwrap();
    }

    println!("Down:");
    for pin in (0..chain.pin_count()).rev() {
        chain.write_pin(pin, true).unwrap();
        println!("  {:2} {}", pin, render(chain.state()));
        delay.delay_ms(speed_ms / 2);
        chain.write_pin(pin, false).unwrap();
    }

    assert_eq!(chain.state(), &[0; 3]);
    assert!(!trace.overflowed());

    println!(
        "\n{} clock pulses, {} ms slept",
        trace.clock_pulses(config.clock),
        trace.slept_ms()
    );
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_chaser_example() {
        super::main();
    }
}
