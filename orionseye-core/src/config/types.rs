//! Configuration type definitions

use heapless::String;
use orionseye_hal::ConsoleConfig;

/// Maximum banner length in bytes
pub const MAX_BANNER_LEN: usize = 64;

/// Maximum short label length (model, firmware version, topic prefix)
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum device display name length
pub const MAX_NAME_LEN: usize = 32;

/// Startup line printed once the console is open
pub const DEFAULT_BANNER: &str = "ESP32 backend starting...";

/// Delay between opening the console and printing the banner
pub const DEFAULT_SETTLE_MS: u32 = 100;

/// Period of the idle hook
pub const DEFAULT_IDLE_PERIOD_MS: u32 = 1000;

/// Hardware model reported to the backend
pub const DEFAULT_MODEL: &str = "ESP32-CAM";

/// Firmware version reported to the backend
pub const DEFAULT_FIRMWARE_VERSION: &str = "1.0.0";

/// Root segment of every MQTT topic
pub const DEFAULT_TOPIC_PREFIX: &str = "orionseye";

/// Copy `s` into a fixed-capacity string, truncating at a char boundary
pub(crate) fn fixed<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Device metadata
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Hardware model
    pub model: String<MAX_LABEL_LEN>,
    /// Firmware version string
    pub firmware: String<MAX_LABEL_LEN>,
    /// Display name override; derived from the device id when absent
    pub name: Option<String<MAX_NAME_LEN>>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            model: fixed(DEFAULT_MODEL),
            firmware: fixed(DEFAULT_FIRMWARE_VERSION),
            name: None,
        }
    }
}

/// MQTT topic settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MqttConfig {
    /// First topic segment
    pub topic_prefix: String<MAX_LABEL_LEN>,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            topic_prefix: fixed(DEFAULT_TOPIC_PREFIX),
        }
    }
}

/// Complete firmware configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareConfig {
    /// Serial console line settings
    pub console: ConsoleConfig,
    /// Delay after opening the console, before the banner
    pub settle_ms: u32,
    /// Startup banner
    pub banner: String<MAX_BANNER_LEN>,
    /// Idle hook period
    pub idle_period_ms: u32,
    /// Device metadata
    pub device: DeviceConfig,
    /// MQTT topic settings
    pub mqtt: MqttConfig,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            settle_ms: DEFAULT_SETTLE_MS,
            banner: fixed(DEFAULT_BANNER),
            idle_period_ms: DEFAULT_IDLE_PERIOD_MS,
            device: DeviceConfig::default(),
            mqtt: MqttConfig::default(),
        }
    }
}

impl FirmwareConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = FirmwareConfig::new();
        assert_eq!(cfg.console.baudrate, 115_200);
        assert_eq!(cfg.settle_ms, 100);
        assert_eq!(cfg.banner.as_str(), "ESP32 backend starting...");
        assert_eq!(cfg.idle_period_ms, 1000);
        assert_eq!(cfg.device.model.as_str(), "ESP32-CAM");
        assert_eq!(cfg.mqtt.topic_prefix.as_str(), "orionseye");
    }

    #[test]
    fn test_fixed_truncates() {
        let s: String<4> = fixed("abcdef");
        assert_eq!(s.as_str(), "abcd");

        // Multi-byte char that would straddle the limit is dropped
        let s: String<4> = fixed("abcé");
        assert_eq!(s.as_str(), "abc");
    }
}
