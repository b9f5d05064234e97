//! eFuse device identity

use esp_hal::efuse::Efuse;
use orionseye_hal::{DeviceIdentity, MacAddress};

/// Identity read from the factory-programmed eFuse block
#[derive(Debug, Clone, Copy, Default)]
pub struct EfuseIdentity;

impl DeviceIdentity for EfuseIdentity {
    fn mac_address(&self) -> MacAddress {
        Efuse::mac_address()
    }
}
