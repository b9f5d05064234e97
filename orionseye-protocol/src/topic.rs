//! MQTT topic construction and parsing

use core::fmt::Write;

use heapless::String;

/// Longest topic the device builds
pub const MAX_TOPIC_LEN: usize = 64;

/// Topic segment separator
const SEPARATOR: char = '/';

/// Message direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Device publishes
    Uplink,
    /// Device subscribes
    Downlink,
}

/// Last topic segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopicKind {
    /// Spectral image reference, forwarded to image processing
    Image,
    /// Device status, stored on the device record
    Status,
    /// Auxiliary sensor data
    Data,
    /// Commands from the backend
    Command,
}

impl TopicKind {
    pub const ALL: [TopicKind; 4] = [
        TopicKind::Image,
        TopicKind::Status,
        TopicKind::Data,
        TopicKind::Command,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TopicKind::Image => "image",
            TopicKind::Status => "status",
            TopicKind::Data => "data",
            TopicKind::Command => "command",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == segment)
    }

    pub fn direction(self) -> Direction {
        match self {
            TopicKind::Command => Direction::Downlink,
            TopicKind::Image | TopicKind::Status | TopicKind::Data => Direction::Uplink,
        }
    }
}

/// Topic errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopicError {
    /// First segment is not the expected prefix
    WrongPrefix,
    /// Device id segment missing or empty
    MissingDeviceId,
    /// Kind segment missing or not recognised
    UnknownKind,
    /// More than three segments
    TooManySegments,
    /// Formatted topic exceeds [`MAX_TOPIC_LEN`]
    TooLong,
}

/// A parsed or constructed topic, borrowing its segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Topic<'a> {
    pub prefix: &'a str,
    pub device_id: &'a str,
    pub kind: TopicKind,
}

impl<'a> Topic<'a> {
    pub fn new(prefix: &'a str, device_id: &'a str, kind: TopicKind) -> Self {
        Self {
            prefix,
            device_id,
            kind,
        }
    }

    /// Parse `{prefix}/{deviceId}/{kind}`
    pub fn parse(topic: &'a str, prefix: &str) -> Result<Self, TopicError> {
        let mut parts = topic.split(SEPARATOR);

        let first = parts.next().unwrap_or_default();
        if first != prefix {
            return Err(TopicError::WrongPrefix);
        }

        let device_id = match parts.next() {
            Some(id) if !id.is_empty() => id,
            _ => return Err(TopicError::MissingDeviceId),
        };

        let kind = parts
            .next()
            .and_then(TopicKind::from_segment)
            .ok_or(TopicError::UnknownKind)?;

        if parts.next().is_some() {
            return Err(TopicError::TooManySegments);
        }

        Ok(Self {
            prefix: first,
            device_id,
            kind,
        })
    }

    /// Format the full topic string
    pub fn render(&self) -> Result<String<MAX_TOPIC_LEN>, TopicError> {
        let mut out = String::new();
        write!(
            out,
            "{}{}{}{}{}",
            self.prefix,
            SEPARATOR,
            self.device_id,
            SEPARATOR,
            self.kind.as_str()
        )
        .map_err(|_| TopicError::TooLong)?;
        Ok(out)
    }
}
