//! Build script for orionseye-firmware
//!
//! - Passes the esp-hal and defmt linker scripts
//! - Validates device.toml at compile time

use std::fs;
use std::path::Path;

use orionseye_core::config::{parse_config, ParseError};

fn main() {
    setup_linker();
    validate_config();
}

/// Linker scripts provided by esp-hal (linkall.x) and defmt (defmt.x)
fn setup_linker() {
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml so a broken config fails the build instead of
/// silently falling back to defaults on the device
///
/// The file must be valid TOML and must also load through the same
/// `parse_config` the firmware runs at boot.
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(&format!("cannot read device.toml: {e}")),
    };

    if let Err(e) = toml::from_str::<toml::Value>(&content) {
        fail(&format!("invalid TOML syntax in device.toml:\n{e}"));
    }

    if let Err(e) = parse_config(&content) {
        fail(describe(e));
    }
}

fn describe(error: ParseError) -> &'static str {
    match error {
        ParseError::InvalidSection => {
            "unknown section (allowed: [console], [idle], [device], [mqtt])"
        }
        ParseError::InvalidLine => "line is neither a [section] header nor `key = value`",
        ParseError::InvalidValue => {
            "value out of range: baud must fit in u32, data_bits is 7 or 8, \
             stop_bits is 1 or 2, parity is none/even/odd, topic_prefix is a \
             single non-empty segment, nothing may follow a quoted string"
        }
        ParseError::ValueTooLong => {
            "string too long: banner is limited to 64 bytes, name to 32, \
             model/firmware/topic_prefix to 16"
        }
        ParseError::ZeroBaudrate => "[console] baud must be positive",
        ParseError::ZeroIdlePeriod => "[idle] period_ms must be positive",
        ParseError::EmptyBanner => "[console] banner must not be empty",
    }
}

fn fail(message: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: device.toml validation failed                            ║\n\
        ╚══════════════════════════════════════════════════════════════════╝\n\
        {message}\n"
    );
}
