//! Bus task
//!
//! Owns the Cricket LED encoder and sends queued commands one whole
//! sequence at a time. Each frame masks interrupts for about 200 us, so
//! this task never awaits while a sequence is on the wire.

use defmt::*;
use embassy_time::Delay;

use cricket_core::LedCommand;
use cricket_drivers::{CricketBus, CricketLed};
use cricket_hal_rp2040::{BusPin, CriticalSection};

use crate::channels::LED_COMMANDS;

/// The LED display on the firmware's bus
pub type Display = CricketLed<CricketBus<BusPin<'static>, Delay, CriticalSection>>;

/// Bus task - executes LED commands from [`LED_COMMANDS`]
#[embassy_executor::task]
pub async fn bus_task(mut display: Display) {
    info!(
        "Bus task started (bit delay {} us)",
        display.bus().timing().bit_delay_us()
    );

    loop {
        let command = LED_COMMANDS.receive().await;
        display.execute(&command);
        echo(&command);
    }
}

/// Log what the display should now be showing
fn echo(command: &LedCommand) {
    match *command {
        LedCommand::Decimal { value, id } => info!("Display dec {} (id {})", value, id.0),
        LedCommand::Hex { value, id } => info!("Display hex {:04x} (id {})", value, id.0),
        LedCommand::Brightness { level, id } => info!("Brightness {} (id {})", level, id.0),
        LedCommand::Pattern { digits, id } => info!(
            "Pattern {:02x} {:02x} {:02x} {:02x} (id {})",
            digits[0], digits[1], digits[2], digits[3], id.0
        ),
    }
}
