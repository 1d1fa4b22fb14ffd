use std::mem;

use crate::consts::{EV_ABS, EV_KEY};

/// Size of one kernel `struct input_event`.
pub const EVENT_SIZE: usize = mem::size_of::<libc::input_event>();

// The record starts with a `struct timeval` timestamp.
const TYPE_OFFSET: usize = mem::size_of::<libc::timeval>();
const CODE_OFFSET: usize = TYPE_OFFSET + 2;
const VALUE_OFFSET: usize = CODE_OFFSET + 2;

/// One evdev record, timestamp dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub kind: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub const fn new(kind: u16, code: u16, value: i32) -> Self {
        Self { kind, code, value }
    }

    pub const fn key(code: u16, value: i32) -> Self {
        Self::new(EV_KEY, code, value)
    }

    pub const fn abs(code: u16, value: i32) -> Self {
        Self::new(EV_ABS, code, value)
    }

    /// Decodes a record as the kernel wrote it, in native byte order.
    pub fn parse(buf: &[u8; EVENT_SIZE]) -> Self {
        let kind = u16::from_ne_bytes([buf[TYPE_OFFSET], buf[TYPE_OFFSET + 1]]);
        let code = u16::from_ne_bytes([buf[CODE_OFFSET], buf[CODE_OFFSET + 1]]);
        let value = i32::from_ne_bytes([
            buf[VALUE_OFFSET],
            buf[VALUE_OFFSET + 1],
            buf[VALUE_OFFSET + 2],
            buf[VALUE_OFFSET + 3],
        ]);
        Self { kind, code, value }
    }

    /// Encodes the record with a zero timestamp.
    pub fn to_bytes(&self) -> [u8; EVENT_SIZE] {
        let mut buf = [0u8; EVENT_SIZE];
        buf[TYPE_OFFSET..CODE_OFFSET].copy_from_slice(&self.kind.to_ne_bytes());
        buf[CODE_OFFSET..VALUE_OFFSET].copy_from_slice(&self.code.to_ne_bytes());
        buf[VALUE_OFFSET..VALUE_OFFSET + 4].copy_from_slice(&self.value.to_ne_bytes());
        buf
    }

    /// Key and absolute-axis records are the only ones the pad needs.
    pub fn is_relevant(&self) -> bool {
        self.kind == EV_KEY || self.kind == EV_ABS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_matches_kernel_layout() {
        assert_eq!(VALUE_OFFSET + 4, EVENT_SIZE);
        if cfg!(target_pointer_width = "64") {
            assert_eq!(EVENT_SIZE, 24);
        }
    }

    #[test]
    fn parse_reads_fields_after_timestamp() {
        let mut buf = [0xAAu8; EVENT_SIZE];
        buf[TYPE_OFFSET..CODE_OFFSET].copy_from_slice(&3u16.to_ne_bytes());
        buf[CODE_OFFSET..VALUE_OFFSET].copy_from_slice(&1u16.to_ne_bytes());
        buf[VALUE_OFFSET..].copy_from_slice(&(-5i32).to_ne_bytes());

        let event = RawEvent::parse(&buf);
        assert_eq!(event, RawEvent::abs(1, -5));
    }

    #[test]
    fn only_key_and_abs_are_relevant() {
        assert!(RawEvent::key(0x120, 1).is_relevant());
        assert!(RawEvent::abs(0, 128).is_relevant());
        // EV_SYN and EV_MSC
        assert!(!RawEvent::new(0x00, 0, 0).is_relevant());
        assert!(!RawEvent::new(0x04, 4, 0x90001).is_relevant());
    }
}
