//! Orion's Eye cloud protocol
//!
//! This crate defines the MQTT contract between the device and the Orion's
//! Eye backend. Devices talk to AWS IoT Core; an IoT rule forwards uplink
//! messages to the backend by topic, and the backend publishes commands to
//! the device's command topic.
//!
//! # Topics
//! ```text
//! {prefix}/{deviceId}/image     device → cloud   spectral frame reference
//! {prefix}/{deviceId}/status    device → cloud   online/offline/busy/error
//! {prefix}/{deviceId}/data      device → cloud   auxiliary sensor data
//! {prefix}/{deviceId}/command   cloud → device   remote commands (QoS 1)
//! ```
//!
//! Payloads are JSON objects with camelCase keys.

#![no_std]
#![deny(unsafe_code)]

// Host tests use proptest, which needs std
#[cfg(test)]
extern crate std;

pub mod messages;
pub mod topic;

pub use messages::{
    CommandMessage, DeviceCommand, DeviceStatus, ImageMessage, MessageError, StatusMessage,
};
pub use topic::{Direction, Topic, TopicError, TopicKind, MAX_TOPIC_LEN};
