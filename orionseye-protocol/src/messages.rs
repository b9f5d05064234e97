//! JSON message payloads
//!
//! Uplink messages are encoded into caller-provided buffers; downlink
//! commands are decoded in place and borrow from the receive buffer.
//! Borrowed strings are the raw bytes between the quotes, so a command
//! whose strings contain JSON escapes (`\"`, `\/`, `\u00e9`) is rejected
//! with [`MessageError::Escaped`] rather than handed on half-decoded.

use serde::{Deserialize, Serialize};

/// Message encode/decode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Output buffer too small
    BufferFull,
    /// Serializer rejected the value
    Encode,
    /// Input is not a valid message
    Decode,
    /// Image message carries neither an S3 key nor inline data
    MissingImage,
    /// Command message has an empty command
    MissingCommand,
    /// A string field uses JSON escape sequences
    Escaped,
}

impl From<serde_json_core::ser::Error> for MessageError {
    fn from(e: serde_json_core::ser::Error) -> Self {
        match e {
            serde_json_core::ser::Error::BufferFull => MessageError::BufferFull,
            _ => MessageError::Encode,
        }
    }
}

impl From<serde_json_core::de::Error> for MessageError {
    fn from(_: serde_json_core::de::Error) -> Self {
        MessageError::Decode
    }
}

/// Reported device state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Busy,
    Error,
}

/// Payload of the `status` topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage<'a> {
    pub status: DeviceStatus,
    /// ISO 8601 timestamp; the backend stamps receipt time when absent
    #[serde(default, skip_serializing_if = "Option::is_none", borrow)]
    pub timestamp: Option<&'a str>,
}

impl<'a> StatusMessage<'a> {
    pub fn new(status: DeviceStatus) -> Self {
        Self {
            status,
            timestamp: None,
        }
    }

    /// Encode as JSON, returning the number of bytes written
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, MessageError> {
        Ok(serde_json_core::to_slice(self, buf)?)
    }
}

/// Payload of the `image` topic
///
/// The frame travels either inline as base64 (`imageData`) or as an object
/// key of a prior presigned upload (`imageS3Key`). The key wins when both
/// are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "camelCase")]
pub struct ImageMessage<'a> {
    #[serde(default, skip_serializing_if = "Option::is_none", borrow)]
    pub user_id: Option<&'a str>,
    #[serde(default, skip_serializing_if = "Option::is_none", borrow)]
    pub image_s3_key: Option<&'a str>,
    #[serde(default, skip_serializing_if = "Option::is_none", borrow)]
    pub image_data: Option<&'a str>,
    #[serde(default, skip_serializing_if = "Option::is_none", borrow)]
    pub timestamp: Option<&'a str>,
}

impl<'a> ImageMessage<'a> {
    /// Reference an uploaded object
    pub fn from_s3_key(key: &'a str) -> Self {
        Self {
            image_s3_key: Some(key),
            ..Self::default()
        }
    }

    /// Carry the frame inline, already base64 encoded
    pub fn inline(base64: &'a str) -> Self {
        Self {
            image_data: Some(base64),
            ..Self::default()
        }
    }

    /// Encode as JSON, returning the number of bytes written
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, MessageError> {
        let has_key = self.image_s3_key.is_some_and(|k| !k.is_empty());
        let has_data = self.image_data.is_some_and(|d| !d.is_empty());
        if !has_key && !has_data {
            return Err(MessageError::MissingImage);
        }
        Ok(serde_json_core::to_slice(self, buf)?)
    }
}

/// Commands the device understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceCommand<'a> {
    /// Take a spectral frame and publish it
    Capture,
    /// Restart the device
    Reboot,
    /// Publish a status message now
    Status,
    /// Anything else, passed through by name
    Other(&'a str),
}

impl<'a> DeviceCommand<'a> {
    pub fn from_name(name: &'a str) -> Self {
        match name {
            "capture" => DeviceCommand::Capture,
            "reboot" => DeviceCommand::Reboot,
            "status" => DeviceCommand::Status,
            other => DeviceCommand::Other(other),
        }
    }
}

/// Payload of the `command` topic
///
/// The backend also sends a `payload` object. None of the known commands
/// take arguments, so it is skipped while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "camelCase")]
pub struct CommandMessage<'a> {
    pub command: &'a str,
    #[serde(default, borrow)]
    pub timestamp: Option<&'a str>,
}

impl<'a> CommandMessage<'a> {
    /// Decode a command received on the command topic
    pub fn decode(input: &'a [u8]) -> Result<Self, MessageError> {
        let (msg, _) = serde_json_core::from_slice::<CommandMessage<'a>>(input)?;
        if msg.command.is_empty() {
            return Err(MessageError::MissingCommand);
        }
        if is_escaped(msg.command) || msg.timestamp.is_some_and(is_escaped) {
            return Err(MessageError::Escaped);
        }
        Ok(msg)
    }

    pub fn kind(&self) -> DeviceCommand<'a> {
        DeviceCommand::from_name(self.command)
    }
}

fn is_escaped(raw: &str) -> bool {
    raw.contains('\\')
}
