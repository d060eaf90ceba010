//! Bus configuration baked in from cricket.toml
//!
//! The build script validates cricket.toml and generates the constants and
//! the `take_bus_pin!` macro included here.

use cricket_core::{BusConfig, ConfigError};

include!(concat!(env!("OUT_DIR"), "/bus_config.rs"));

/// Re-validate the baked-in values and build the bus configuration
pub fn bus_config() -> Result<BusConfig, ConfigError> {
    BusConfig::new(BUS_PIN, BIT_DELAY_US)
}
