//! Minimal TOML parser for the embedded device configuration
//!
//! Handles only the subset `device.toml` uses. It does NOT support the full
//! TOML spec.
//!
//! Supported features:
//! - [section] headers
//! - Key = value pairs (string, integer, boolean)
//! - Comments (# ...), including trailing comments after a value
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line or escaped strings
//! - Dotted keys

use heapless::String;
use orionseye_hal::console::{DataBits, Parity, StopBits};

use super::types::{fixed, FirmwareConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String value exceeds its fixed capacity
    ValueTooLong,
    /// Baud rate is zero
    ZeroBaudrate,
    /// Idle period is zero
    ZeroIdlePeriod,
    /// Banner is empty
    EmptyBanner,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Console,
    Idle,
    Device,
    Mqtt,
}

/// Parse TOML configuration into a [`FirmwareConfig`]
///
/// Keys that are absent keep their default value. Unknown keys are ignored
/// so newer config files still load on older firmware.
pub fn parse_config(input: &str) -> Result<FirmwareConfig, ParseError> {
    let mut config = FirmwareConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, raw) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
        let key = key.trim();
        let value = strip_comment(raw.trim())?;

        apply(&mut config, section, key, value)?;
    }

    validate(&config)?;
    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let inner = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match inner.trim() {
        "console" => Ok(Section::Console),
        "idle" => Ok(Section::Idle),
        "device" => Ok(Section::Device),
        "mqtt" => Ok(Section::Mqtt),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply(
    config: &mut FirmwareConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Console, "baud") => config.console.baudrate = parse_int(value)?,
        (Section::Console, "settle_ms") => config.settle_ms = parse_int(value)?,
        (Section::Console, "banner") => config.banner = parse_fixed(value)?,
        (Section::Console, "data_bits") => {
            config.console.data_bits = match parse_int::<u8>(value)? {
                7 => DataBits::Seven,
                8 => DataBits::Eight,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        (Section::Console, "parity") => {
            config.console.parity = match parse_string(value)? {
                "none" => Parity::None,
                "even" => Parity::Even,
                "odd" => Parity::Odd,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        (Section::Console, "stop_bits") => {
            config.console.stop_bits = match parse_int::<u8>(value)? {
                1 => StopBits::One,
                2 => StopBits::Two,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        (Section::Idle, "period_ms") => config.idle_period_ms = parse_int(value)?,
        (Section::Device, "model") => config.device.model = parse_fixed(value)?,
        (Section::Device, "firmware") => config.device.firmware = parse_fixed(value)?,
        (Section::Device, "name") => {
            let name = parse_string(value)?;
            config.device.name = if name.is_empty() {
                None
            } else {
                Some(parse_fixed(value)?)
            };
        }
        (Section::Mqtt, "topic_prefix") => {
            let prefix = parse_string(value)?;
            if prefix.is_empty() || prefix.contains('/') {
                return Err(ParseError::InvalidValue);
            }
            config.mqtt.topic_prefix = parse_fixed(value)?;
        }
        // Unknown keys are ignored
        _ => {}
    }
    Ok(())
}

fn validate(config: &FirmwareConfig) -> Result<(), ParseError> {
    if config.console.baudrate == 0 {
        return Err(ParseError::ZeroBaudrate);
    }
    if config.idle_period_ms == 0 {
        return Err(ParseError::ZeroIdlePeriod);
    }
    if config.banner.is_empty() {
        return Err(ParseError::EmptyBanner);
    }
    Ok(())
}

/// Drop a trailing `# comment`, ignoring `#` inside a quoted string
///
/// Only a comment may follow the closing quote of a string.
fn strip_comment(value: &str) -> Result<&str, ParseError> {
    if let Some(rest) = value.strip_prefix('"') {
        return match rest.find('"') {
            Some(end) => {
                let trailing = rest[end + 1..].trim_start();
                if trailing.is_empty() || trailing.starts_with('#') {
                    Ok(&value[..end + 2])
                } else {
                    Err(ParseError::InvalidValue)
                }
            }
            None => Ok(value),
        };
    }
    Ok(match value.find('#') {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    })
}

/// Parse a string value (quotes optional)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') {
        if value.len() >= 2 && value.ends_with('"') {
            Ok(&value[1..value.len() - 1])
        } else {
            Err(ParseError::InvalidValue)
        }
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse a string value into a fixed-capacity string
fn parse_fixed<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let s = parse_string(value)?;
    if s.len() > N {
        return Err(ParseError::ValueTooLong);
    }
    Ok(fixed(s))
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: String<24> = String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}
