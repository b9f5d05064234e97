//! Configuration loading
//!
//! The configuration is compiled into the firmware from `device.toml`.
//! build.rs already rejects malformed files, so a runtime parse failure
//! means the parser and the validator disagree.

use defmt::*;

use orionseye_core::config::{parse_config, FirmwareConfig};

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> FirmwareConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            FirmwareConfig::default()
        }
    }
}
