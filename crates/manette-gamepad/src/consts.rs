use crate::types::DeviceIdentity;

/// The gamepad this crate is built for.
pub const DEFAULT_IDENTITY: DeviceIdentity = DeviceIdentity::new("0583", "2060");

/// Raw axis value of a stick at rest.
pub const AXIS_CENTER: i32 = 128;

/// Nodes under this prefix deliver typed evdev records.
pub const EVENT_NODE_PREFIX: &str = "/dev/input/event";

/// Buffer size for the `EVIOCGNAME` query.
pub(crate) const DEVICE_NAME_LEN: usize = 256;

// Event types
pub(crate) const EV_KEY: u16 = 0x01;
pub(crate) const EV_ABS: u16 = 0x03;

// Absolute axes
pub(crate) const ABS_X: u16 = 0x00;
pub(crate) const ABS_Y: u16 = 0x01;

// Joystick button codes reported by the pad
pub(crate) const KEY_A: u16 = 0x120;
pub(crate) const KEY_B: u16 = 0x121;
pub(crate) const KEY_X: u16 = 0x122;
pub(crate) const KEY_Y: u16 = 0x123;
pub(crate) const KEY_L: u16 = 0x124;
pub(crate) const KEY_R: u16 = 0x125;

/// `value` of a key record while the key is held down.
pub(crate) const KEY_PRESSED: i32 = 1;
