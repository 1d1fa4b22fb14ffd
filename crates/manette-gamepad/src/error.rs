use std::io;

use thiserror::Error;

use crate::types::DevicePath;

/// Faults of the gamepad subsystem.
///
/// None of these escape [`EventChannel`](crate::EventChannel): they are logged,
/// mirrored as [`ControllerEvent::Error`](crate::ControllerEvent::Error) and
/// replaced by a fallback.
#[derive(Debug, Error)]
pub enum Error {
    /// The input device database could not be enumerated.
    #[error("can't enumerate input devices: {0}")]
    Enumerate(#[source] io::Error),
    /// The device node could not be opened.
    #[error("can't open device {path}: {source}")]
    Open {
        path: DevicePath,
        #[source]
        source: io::Error,
    },
    /// `EVIOCGNAME` failed.
    #[error("can't query device name: {0}")]
    NameQuery(#[source] io::Error),
    /// Reading the event node failed.
    #[error("read from event device failed: {0}")]
    Read(#[source] io::Error),
    /// The kernel returned part of a record.
    #[error("incomplete read on event device ({read} bytes read, expected {expected})")]
    ShortRead { read: usize, expected: usize },
    /// The event node reported end of stream.
    #[error("controller unplugged")]
    Removed,
    /// A vendor or product id is not four hex digits.
    #[error("invalid device identifier: {0:?}")]
    InvalidIdentity(String),
}

/// Convenient result alias for gamepad operations.
pub type Result<T> = std::result::Result<T, Error>;
