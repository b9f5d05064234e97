//! Device identity
//!
//! The backend registers each board as an IoT thing named by its device
//! id, so the id must be stable across reboots and reflashes. It is derived
//! from the factory MAC address.

use core::fmt::Write;

use heapless::String;
use orionseye_hal::{DeviceIdentity, MacAddress};

use crate::config::{DeviceConfig, MAX_LABEL_LEN, MAX_NAME_LEN};

/// Length of a device id in characters
pub const DEVICE_ID_LEN: usize = 12;

/// Number of id characters used in the derived display name
const NAME_ID_CHARS: usize = 8;

/// Prefix of the derived display name
const NAME_PREFIX: &str = "Orion's Eye ";

/// Device id: the MAC address as 12 lowercase hex digits
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId(String<DEVICE_ID_LEN>);

impl DeviceId {
    /// Build an id from a raw MAC address
    pub fn from_mac(mac: MacAddress) -> Self {
        let mut id = String::new();
        for byte in mac {
            // 6 bytes * 2 digits always fits
            let _ = write!(id, "{:02x}", byte);
        }
        Self(id)
    }

    /// Read the id from a hardware identity source
    pub fn read<I: DeviceIdentity>(source: &I) -> Self {
        Self::from_mac(source.mac_address())
    }

    /// The id as 12 lowercase hex characters
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl core::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and metadata the device reports about itself
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub name: String<MAX_NAME_LEN>,
    pub model: String<MAX_LABEL_LEN>,
    pub firmware: String<MAX_LABEL_LEN>,
}

impl DeviceInfo {
    /// Combine the hardware id with configured metadata
    ///
    /// Without a configured name the display name is
    /// `Orion's Eye <first 8 id chars>`, matching what the backend assigns
    /// at registration.
    pub fn new(id: DeviceId, config: &DeviceConfig) -> Self {
        let name = match &config.name {
            Some(name) => name.clone(),
            None => default_name(&id),
        };
        Self {
            id,
            name,
            model: config.model.clone(),
            firmware: config.firmware.clone(),
        }
    }
}

fn default_name(id: &DeviceId) -> String<MAX_NAME_LEN> {
    let mut name = String::new();
    let short = &id.as_str()[..NAME_ID_CHARS.min(id.as_str().len())];
    // Prefix + 8 chars is well under MAX_NAME_LEN
    let _ = name.push_str(NAME_PREFIX);
    let _ = name.push_str(short);
    name
}
