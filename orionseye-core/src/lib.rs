//! Board-agnostic core logic for the Orion's Eye firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Lifecycle hooks (console setup, idle loop)
//! - Firmware configuration types and the embedded config parser
//! - Device identity derived from the factory MAC
//! - Spectral analysis of camera frames

#![no_std]
#![deny(unsafe_code)]

// Host tests use proptest, which needs std
#[cfg(test)]
extern crate std;

pub mod config;
pub mod device;
pub mod lifecycle;
pub mod spectrum;
