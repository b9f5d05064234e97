//! Orion's Eye Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the board-agnostic firmware logic
//! is written against. Chip-specific crates implement them so the lifecycle
//! and identity code in `orionseye-core` can be tested on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Application (orionseye-firmware)        │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  orionseye-hal (this crate - traits)     │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌──────────────────┐
//!            │ orionseye-hal-   │
//!            │     esp32        │
//!            └──────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`console::ConsoleTx`] - Serial console output
//! - [`identity::DeviceIdentity`] - Factory-programmed device identity
//!
//! Delays use `embedded_hal::delay::DelayNs` directly rather than a
//! crate-local trait.

#![no_std]
#![deny(unsafe_code)]

pub mod console;
pub mod identity;

// Re-export key traits at crate root for convenience
pub use console::{ConsoleConfig, ConsoleTx, NullConsole};
pub use identity::{DeviceIdentity, FixedIdentity, MacAddress};
