//! Cricket - LED display demo firmware
//!
//! Drives a Cricket LED display over the single-wire Cricket bus from an
//! RP2040 and runs the demonstration cycle on it. The bus pin and bit delay
//! come from cricket.toml at build time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use cricket_core::DeviceId;
use cricket_drivers::{CricketBus, CricketLed};
use cricket_hal_rp2040::{check_bus_pin, BusPin, CriticalSection};

#[macro_use]
mod config;
mod channels;
mod tasks;

/// Display the demo talks to
const DEMO_DISPLAY: DeviceId = DeviceId::ANY;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Cricket firmware starting...");

    let p = embassy_rp::init(Default::default());

    let bus_config = unwrap!(config::bus_config());
    let pin = unwrap!(check_bus_pin(bus_config.pin));
    info!(
        "Cricket bus on gpio{}, bit delay {} us",
        pin, bus_config.timing.bit_delay_us()
    );

    let line = BusPin::new(take_bus_pin!(p));
    let bus = CricketBus::new(line, Delay, CriticalSection, bus_config.timing);
    let display: tasks::Display = CricketLed::new(bus);

    spawner.spawn(unwrap!(tasks::bus_task(display)));
    spawner.spawn(unwrap!(tasks::demo_task(DEMO_DISPLAY, pin)));

    info!("Cricket firmware running");
}
