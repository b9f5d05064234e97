//! ESP32-specific HAL for the Orion's Eye firmware
//!
//! This crate provides ESP32 implementations of the shared `orionseye-hal`
//! traits on top of `esp-hal`:
//!
//! - UART0 console (the USB-serial bridge on ESP32-CAM boards)
//! - Factory MAC address from eFuse

#![no_std]

pub mod console;
pub mod identity;

pub use console::{open_console, Esp32Console};
pub use identity::EfuseIdentity;

// Re-export shared traits from orionseye-hal for convenience
pub use orionseye_hal::{ConsoleConfig, ConsoleTx, DeviceIdentity};
