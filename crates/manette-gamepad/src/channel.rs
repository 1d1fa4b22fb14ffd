use std::io;
use std::time::Duration;

use crossbeam_channel::unbounded;

use crate::decoder::{AxisState, Decoder};
use crate::error::Error;
use crate::events::{ControllerEvent, EventReceiver, EventSender, Subscribers};
use crate::locator::locate;
use crate::record::{RawEvent, EVENT_SIZE};
use crate::source::{DeviceFile, EventSource};
use crate::types::{DeviceIdentity, DevicePath};
use crate::watch::ReadWatch;

/// Why a drain stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainEnd {
    /// No more records pending. The normal case.
    WouldBlock,
    /// The device went away. The channel is stopped.
    Removed,
    /// A read failed or returned part of a record.
    Failed,
    /// The channel has no usable handle.
    Idle,
}

/// Outcome of one readiness notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drain {
    /// Key and axis records decoded.
    pub records: usize,
    pub end: DrainEnd,
}

impl Drain {
    const IDLE: Drain = Drain {
        records: 0,
        end: DrainEnd::Idle,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    Stopped,
}

/// Owns one opened gamepad node and turns its records into
/// [`ControllerEvent`]s.
///
/// Construction never fails: when the node can't be opened the channel
/// still announces [`ControllerEvent::Connected`] and then stays silent.
/// Dropping the channel releases the readiness watch, announces
/// [`ControllerEvent::Disconnected`] and closes the handle, in that order.
pub struct EventChannel<S: EventSource = DeviceFile> {
    path: DevicePath,
    source: Option<S>,
    watch: Option<ReadWatch>,
    decoder: Decoder,
    subscribers: Subscribers,
    state: State,
}

impl EventChannel<DeviceFile> {
    /// Locates the device of `identity` and opens it.
    pub fn discover(identity: &DeviceIdentity) -> (Self, EventReceiver) {
        Self::open(locate(identity))
    }

    /// Opens the node at `path`.
    pub fn open(path: DevicePath) -> (Self, EventReceiver) {
        let (tx, rx) = unbounded();
        (Self::open_with_sender(path, tx), rx)
    }

    /// Opens the node at `path`, delivering events to `tx`.
    pub fn open_with_sender(path: DevicePath, tx: EventSender) -> Self {
        match DeviceFile::open(&path) {
            Ok(file) => Self::connect(path, Some(file), tx, None),
            Err(e) => Self::connect(path, None, tx, Some(e)),
        }
    }
}

impl<S: EventSource> EventChannel<S> {
    /// Builds a channel over an already opened source.
    pub fn with_source(path: DevicePath, source: S, tx: EventSender) -> Self {
        Self::connect(path, Some(source), tx, None)
    }

    fn connect(
        path: DevicePath,
        source: Option<S>,
        tx: EventSender,
        open_error: Option<Error>,
    ) -> Self {
        let watch = source.as_ref().and_then(S::raw_fd).map(ReadWatch::new);
        let state = if source.is_some() {
            State::Active
        } else {
            State::Stopped
        };
        let mut channel = Self {
            path,
            source,
            watch,
            decoder: Decoder::new(),
            subscribers: Subscribers::new(tx),
            state,
        };

        if let Some(e) = open_error {
            channel.report(&e);
        }
        let name = channel.device_name();
        log::info!("gamepad connected: {name}");
        channel
            .subscribers
            .broadcast(ControllerEvent::Connected(name));
        channel
    }

    fn device_name(&self) -> String {
        let queried = match &self.source {
            Some(source) => source.device_name().map_err(Error::NameQuery),
            None => Err(Error::NameQuery(io::Error::from_raw_os_error(libc::EBADF))),
        };
        queried.unwrap_or_else(|e| {
            log::debug!("{e}");
            format!("Device: {}", self.path)
        })
    }

    /// Adds a subscriber for the events that follow.
    pub fn subscribe(&mut self) -> EventReceiver {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Path chosen at construction.
    pub fn device_path(&self) -> &DevicePath {
        &self.path
    }

    /// False once the device was removed, or if it never opened.
    pub fn is_active(&self) -> bool {
        self.state == State::Active
    }

    pub fn axes(&self) -> AxisState {
        self.decoder.axes()
    }

    /// Waits up to `timeout` for the handle to become readable and drains it.
    ///
    /// Returns `Ok(None)` on timeout, and immediately when the channel has
    /// nothing to watch.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Option<Drain>> {
        let Some(watch) = &self.watch else {
            return Ok(None);
        };
        if watch.wait(timeout)? {
            Ok(Some(self.handle_readable()))
        } else {
            Ok(None)
        }
    }

    /// Reads every pending record and broadcasts the resulting changes.
    ///
    /// Call once per readiness notification.
    pub fn handle_readable(&mut self) -> Drain {
        if self.state != State::Active {
            return Drain::IDLE;
        }
        let Some(source) = self.source.as_mut() else {
            return Drain::IDLE;
        };

        let mut records = 0;
        let mut buf = [0u8; EVENT_SIZE];
        let (end, fault) = loop {
            match source.read_record(&mut buf) {
                Ok(EVENT_SIZE) => {}
                Ok(0) => break (DrainEnd::Removed, Error::Removed),
                Ok(read) => {
                    break (
                        DrainEnd::Failed,
                        Error::ShortRead {
                            read,
                            expected: EVENT_SIZE,
                        },
                    )
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    return Drain {
                        records,
                        end: DrainEnd::WouldBlock,
                    };
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                // evdev reports an unplugged device this way
                Err(e) if e.raw_os_error() == Some(libc::ENODEV) => {
                    break (DrainEnd::Removed, Error::Removed)
                }
                Err(e) => break (DrainEnd::Failed, Error::Read(e)),
            }

            let event = RawEvent::parse(&buf);
            if !event.is_relevant() {
                continue;
            }
            records += 1;
            log::debug!(
                "event type={} code={:#x} value={}",
                event.kind,
                event.code,
                event.value
            );
            for change in self.decoder.decode(event) {
                self.subscribers.broadcast(ControllerEvent::ButtonChanged {
                    button: change.button,
                    pressed: change.pressed,
                });
            }
        };

        if end == DrainEnd::Removed {
            self.state = State::Stopped;
            self.watch = None;
        }
        self.report(&fault);
        Drain { records, end }
    }

    fn report(&mut self, error: &Error) {
        match error {
            Error::Removed => log::warn!("{}: {error}", self.path),
            _ => log::error!("{}: {error}", self.path),
        }
        self.subscribers
            .broadcast(ControllerEvent::Error(error.to_string()));
    }
}

impl<S: EventSource> Drop for EventChannel<S> {
    fn drop(&mut self) {
        self.watch = None;
        self.subscribers.broadcast(ControllerEvent::Disconnected);
        drop(self.source.take());
        log::info!("gamepad disconnected: {}", self.path);
    }
}
