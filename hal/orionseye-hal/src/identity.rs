//! Device identity
//!
//! Every board carries a factory-programmed MAC address. The cloud side
//! keys devices by an id derived from it.

/// Raw 48-bit MAC address
pub type MacAddress = [u8; 6];

/// Source of the factory device identity
pub trait DeviceIdentity {
    /// Read the base MAC address
    fn mac_address(&self) -> MacAddress;
}

/// Fixed identity, used by tests and boards without eFuse access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedIdentity(pub MacAddress);

impl DeviceIdentity for FixedIdentity {
    fn mac_address(&self) -> MacAddress {
        self.0
    }
}
