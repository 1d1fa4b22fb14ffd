use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::{DeviceIdentity, DevicePath};

const INPUT_SUBSYSTEM: &str = "input";
const VENDOR_PROPERTY: &str = "ID_VENDOR_ID";
const MODEL_PROPERTY: &str = "ID_MODEL_ID";

/// One input device as seen by an enumerator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub vendor_id: Option<String>,
    pub product_id: Option<String>,
    pub devnode: Option<PathBuf>,
}

impl Candidate {
    pub fn matches(&self, identity: &DeviceIdentity) -> bool {
        identity.matches(self.vendor_id.as_deref(), self.product_id.as_deref())
    }
}

/// Source of input-class devices, in enumeration order.
pub trait DeviceEnumerator {
    /// Lists input devices. May return devices of other identities; the
    /// caller filters them.
    fn candidates(&mut self, identity: &DeviceIdentity) -> Result<Vec<Candidate>>;
}

/// Enumerates the udev `input` subsystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdevEnumerator;

impl DeviceEnumerator for UdevEnumerator {
    fn candidates(&mut self, identity: &DeviceIdentity) -> Result<Vec<Candidate>> {
        let mut enumerator = udev::Enumerator::new().map_err(Error::Enumerate)?;
        enumerator
            .match_subsystem(INPUT_SUBSYSTEM)
            .map_err(Error::Enumerate)?;
        // udev ORs property matches, so only the vendor narrows the scan here.
        enumerator
            .match_property(VENDOR_PROPERTY, identity.vendor_id())
            .map_err(Error::Enumerate)?;

        let devices = enumerator.scan_devices().map_err(Error::Enumerate)?;
        Ok(devices
            .map(|device| Candidate {
                vendor_id: property(&device, VENDOR_PROPERTY),
                product_id: property(&device, MODEL_PROPERTY),
                devnode: device.devnode().map(|p| p.to_path_buf()),
            })
            .collect())
    }
}

fn property(device: &udev::Device, key: &str) -> Option<String> {
    device
        .property_value(key)
        .map(|v| v.to_string_lossy().into_owned())
}

/// Picks the node to open among enumerated devices.
///
/// The first matching device with an event node wins. Without one, the last
/// matching device that has any node is used. No match gives the empty path.
pub fn select_device<I>(identity: &DeviceIdentity, candidates: I) -> DevicePath
where
    I: IntoIterator<Item = Candidate>,
{
    let mut fallback = None;
    for candidate in candidates {
        if !candidate.matches(identity) {
            continue;
        }
        let Some(node) = candidate.devnode else {
            continue;
        };
        log::debug!("found device node {}", node.display());

        let path = DevicePath::new(node);
        if path.is_event_node() {
            return path;
        }
        fallback = Some(path);
    }
    fallback.unwrap_or_default()
}

/// Finds the node of `identity` with the given enumerator.
///
/// Enumeration failures are logged and give the empty path.
pub fn locate_with<E: DeviceEnumerator>(enumerator: &mut E, identity: &DeviceIdentity) -> DevicePath {
    match enumerator.candidates(identity) {
        Ok(candidates) => {
            let path = select_device(identity, candidates);
            if path.is_empty() {
                log::warn!("no input device matches {identity}");
            }
            path
        }
        Err(e) => {
            log::error!("{e}");
            DevicePath::empty()
        }
    }
}

/// Finds the node of `identity` in the udev database.
pub fn locate(identity: &DeviceIdentity) -> DevicePath {
    locate_with(&mut UdevEnumerator, identity)
}

/// All udev devices matching `identity`, in enumeration order.
pub fn list_candidates(identity: &DeviceIdentity) -> Result<Vec<Candidate>> {
    let candidates = UdevEnumerator.candidates(identity)?;
    Ok(candidates.into_iter().filter(|c| c.matches(identity)).collect())
}
