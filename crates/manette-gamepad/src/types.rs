use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use manette_bit_derive::Bit;
use manette_bit_mask::Bitmask;

use crate::consts::EVENT_NODE_PREFIX;
use crate::error::{Error, Result};

/// Logical buttons of the pad.
///
/// Each variant owns one bit, in declaration order: `A = 0x1` up to
/// `Down = 0x200`. The four directions are synthesized from the stick axes.
#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    L,
    R,
    Left,
    Right,
    Up,
    Down,
}

impl Button {
    pub const ALL: [Button; 10] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::L,
        Button::R,
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Button::A => "A",
            Button::B => "B",
            Button::X => "X",
            Button::Y => "Y",
            Button::L => "L",
            Button::R => "R",
            Button::Left => "LEFT",
            Button::Right => "RIGHT",
            Button::Up => "UP",
            Button::Down => "DOWN",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of buttons held at the same time.
pub type ButtonMask = Bitmask<Button>;

/// USB vendor/product pair, as the lowercase hex strings udev reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    vendor_id: Cow<'static, str>,
    product_id: Cow<'static, str>,
}

impl DeviceIdentity {
    pub const fn new(vendor_id: &'static str, product_id: &'static str) -> Self {
        Self {
            vendor_id: Cow::Borrowed(vendor_id),
            product_id: Cow::Borrowed(product_id),
        }
    }

    /// Builds an identity from user input. Both ids must be four hex digits.
    pub fn parse(vendor_id: &str, product_id: &str) -> Result<Self> {
        Ok(Self {
            vendor_id: Cow::Owned(validate_id(vendor_id)?),
            product_id: Cow::Owned(validate_id(product_id)?),
        })
    }

    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Exact, case-sensitive match. A missing property never matches.
    pub fn matches(&self, vendor_id: Option<&str>, product_id: Option<&str>) -> bool {
        vendor_id == Some(self.vendor_id()) && product_id == Some(self.product_id())
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vendor_id, self.product_id)
    }
}

fn validate_id(id: &str) -> Result<String> {
    if id.len() == 4 && id.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(id.to_owned())
    } else {
        Err(Error::InvalidIdentity(id.to_owned()))
    }
}

/// Path of a kernel input node. The empty path means "no device found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DevicePath(PathBuf);

impl DevicePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// Whether the node follows the `/dev/input/event*` convention.
    pub fn is_event_node(&self) -> bool {
        self.0
            .to_str()
            .is_some_and(|p| p.starts_with(EVENT_NODE_PREFIX))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for DevicePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for DevicePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use manette_bit_mask::Bitable;

    use super::*;

    #[test]
    fn button_flags_keep_their_wire_values() {
        let flags: Vec<u64> = Button::ALL.iter().map(Bitable::bit).collect();
        assert_eq!(
            flags,
            [0x1, 0x2, 0x4, 0x8, 0x10, 0x20, 0x40, 0x80, 0x100, 0x200]
        );
    }

    #[test]
    fn button_mask_combines_face_and_direction() {
        let mask = ButtonMask::new(&[Button::A, Button::Down]);
        assert_eq!(mask.bits(), 0x201);
        assert!(mask.contains(Button::Down));
        assert!(!mask.contains(Button::Up));
    }

    #[test]
    fn identity_matches_only_when_both_ids_are_present() {
        let id = DeviceIdentity::new("0583", "2060");
        assert!(id.matches(Some("0583"), Some("2060")));
        assert!(!id.matches(Some("0583"), None));
        assert!(!id.matches(None, Some("2060")));
        assert!(!id.matches(Some("0583"), Some("2061")));
    }

    #[test]
    fn identity_match_is_case_sensitive() {
        let id = DeviceIdentity::new("045e", "028e");
        assert!(!id.matches(Some("045E"), Some("028E")));
    }

    #[test]
    fn identity_parse_rejects_malformed_ids() {
        assert!(DeviceIdentity::parse("0583", "2060").is_ok());
        assert!(matches!(
            DeviceIdentity::parse("583", "2060"),
            Err(Error::InvalidIdentity(id)) if id == "583"
        ));
        assert!(DeviceIdentity::parse("05g3", "2060").is_err());
        assert_eq!(
            DeviceIdentity::parse("0583", "2060").map(|id| id.to_string()).ok(),
            Some("0583:2060".to_string())
        );
    }

    #[test]
    fn device_path_classifies_event_nodes() {
        assert!(DevicePath::new("/dev/input/event7").is_event_node());
        assert!(!DevicePath::new("/dev/input/js0").is_event_node());
        assert!(!DevicePath::empty().is_event_node());
        assert!(DevicePath::empty().is_empty());
        assert!(!DevicePath::new("/dev/input/js0").is_empty());
    }
}
