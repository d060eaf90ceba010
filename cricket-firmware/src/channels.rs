//! Inter-task communication channels
//!
//! The bus task is the only owner of the display encoder. Everything else
//! hands it whole commands, so command sequences never interleave on the
//! wire.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use cricket_core::LedCommand;

/// Channel capacity for queued LED commands
const LED_CHANNEL_SIZE: usize = 4;

/// LED display commands waiting to go out on the bus
pub static LED_COMMANDS: Channel<CriticalSectionRawMutex, LedCommand, LED_CHANNEL_SIZE> =
    Channel::new();
