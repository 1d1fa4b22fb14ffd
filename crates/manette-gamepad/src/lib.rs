//! Evdev gamepad input.
//!
//! Finds one USB gamepad among the kernel input devices, opens its event node
//! and turns raw `input_event` records into logical button transitions. The
//! analog axes are folded into four directional pseudo-buttons.

mod channel;
mod consts;
mod decoder;
mod error;
mod events;
mod locator;
mod record;
mod source;
mod types;
mod watch;

pub use crate::channel::{Drain, DrainEnd, EventChannel};
pub use crate::consts::{AXIS_CENTER, DEFAULT_IDENTITY, EVENT_NODE_PREFIX};
pub use crate::decoder::{AxisState, ButtonChange, Decoder, Signals};
pub use crate::error::{Error, Result};
pub use crate::events::{ControllerEvent, EventReceiver, EventSender};
pub use crate::locator::{
    list_candidates, locate, locate_with, select_device, Candidate, DeviceEnumerator,
    UdevEnumerator,
};
pub use crate::record::{RawEvent, EVENT_SIZE};
pub use crate::source::{DeviceFile, EventSource};
pub use crate::types::{Button, ButtonMask, DeviceIdentity, DevicePath};
