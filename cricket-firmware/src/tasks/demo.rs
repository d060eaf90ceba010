//! Demo task
//!
//! Shows the bus pin number as a splash, then drives the display through
//! the demonstration cycle forever.

use defmt::*;
use embassy_time::Timer;

use cricket_core::demo::{self, DemoCycle, DemoPhase, DemoStep};
use cricket_core::DeviceId;

use crate::channels::LED_COMMANDS;

/// Demo task - feeds the demonstration cycle to the bus task
#[embassy_executor::task]
pub async fn demo_task(id: DeviceId, bus_pin: u8) {
    info!("Demo task started for display {}", id.0);

    for step in demo::splash(u16::from(bus_pin), id) {
        run(step).await;
    }

    let mut cycle = DemoCycle::new(id);
    let mut current: Option<DemoPhase> = None;

    loop {
        let (phase, step) = cycle.next_step();

        if current != Some(phase) {
            current = Some(phase);
            debug!("Demo phase {}", phase);
        }

        run(step).await;
    }
}

async fn run(step: DemoStep) {
    match step {
        DemoStep::Show(command) => LED_COMMANDS.send(command).await,
        DemoStep::Wait { ms } => Timer::after_millis(u64::from(ms)).await,
    }
}
