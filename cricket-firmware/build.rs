//! Build script for cricket-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates cricket.toml and turns it into `bus_config.rs` constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIO pins on the RP2040
const GPIO_COUNT: i64 = 30;

/// Pins the Pico wires to on-board functions
const BOARD_RESERVED: [i64; 4] = [23, 24, 25, 29];

fn main() {
    setup_linker();
    let (pin, bit_delay_us) = validate_config();
    write_bus_config(pin, bit_delay_us);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Panic with a boxed list of problems
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate cricket.toml at compile time
///
/// Returns the bus pin number and bit delay.
fn validate_config() -> (u8, u32) {
    println!("cargo:rerun-if-changed=cricket.toml");

    let config_path = Path::new("cricket.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(
            "Failed to read cricket.toml",
            &[
                e.to_string(),
                "Create one next to Cargo.toml with a [bus] section".into(),
            ],
        ),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail("Invalid TOML syntax in cricket.toml", &lines(&e.to_string())),
    };

    let bus = match config.get("bus") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => fail("Invalid cricket.toml", &["[bus] must be a table".into()]),
        None => fail("Invalid cricket.toml", &["Missing [bus] section".into()]),
    };

    let mut errors = Vec::new();

    let pin = match bus.get("pin").map(parse_pin) {
        Some(Ok(n)) => Some(n),
        Some(Err(e)) => {
            errors.push(e);
            None
        }
        None => {
            errors.push("[bus] missing 'pin'".to_string());
            None
        }
    };

    if let Some(n) = pin {
        if !(0..GPIO_COUNT).contains(&n) {
            errors.push(format!("[bus] pin must be gpio0-gpio{}", GPIO_COUNT - 1));
        } else if BOARD_RESERVED.contains(&n) {
            errors.push(format!("[bus] gpio{} is used by the board", n));
        }
    }

    let bit_delay = match bus.get("bit_delay_us") {
        Some(toml::Value::Integer(us)) => {
            if !(1..=10).contains(us) {
                errors.push("[bus] bit_delay_us must be 1-10".to_string());
            }
            *us
        }
        Some(_) => {
            errors.push("[bus] bit_delay_us must be an integer".to_string());
            0
        }
        None => 10,
    };

    if !errors.is_empty() {
        fail("Invalid bus configuration in cricket.toml", &errors);
    }

    let pin = pin.unwrap_or_default() as u8;
    println!(
        "cargo:warning=cricket.toml validated: bus on gpio{}, bit delay {} us",
        pin, bit_delay
    );
    (pin, bit_delay as u32)
}

/// Pin as "gpio7" (Klipper style) or a bare number
fn parse_pin(value: &toml::Value) -> Result<i64, String> {
    match value {
        toml::Value::String(s) => {
            let number = s.trim().strip_prefix("gpio").unwrap_or_default();
            number
                .parse()
                .map_err(|_| format!("[bus] pin '{}' must look like \"gpio7\"", s))
        }
        toml::Value::Integer(n) => Ok(*n),
        _ => Err("[bus] pin must be a string or integer".to_string()),
    }
}

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Emit the validated configuration as Rust source
fn write_bus_config(pin: u8, bit_delay_us: u32) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let source = format!(
        "/// GPIO carrying the Cricket bus\n\
         pub const BUS_PIN: u8 = {pin};\n\
         \n\
         /// Calibrated busy-wait per bit, in microseconds\n\
         pub const BIT_DELAY_US: u32 = {bit_delay_us};\n\
         \n\
         /// Take the configured bus pin out of the peripherals\n\
         macro_rules! take_bus_pin {{\n    \
             ($p:expr) => {{\n        \
                 $p.PIN_{pin}\n    \
             }};\n\
         }}\n"
    );

    fs::write(out_dir.join("bus_config.rs"), source).unwrap();
}
