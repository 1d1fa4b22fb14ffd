use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};

use crate::consts::DEVICE_NAME_LEN;
use crate::error::{Error, Result};
use crate::record::EVENT_SIZE;
use crate::types::DevicePath;

/// A readable stream of evdev records.
///
/// Implemented by [`DeviceFile`] for real nodes. Reads must not block: when
/// nothing is pending they fail with [`io::ErrorKind::WouldBlock`].
pub trait EventSource {
    /// Reads at most one record into `buf` and returns the byte count.
    fn read_record(&mut self, buf: &mut [u8; EVENT_SIZE]) -> io::Result<usize>;

    /// Human readable device name.
    fn device_name(&self) -> io::Result<String>;

    /// Descriptor to watch for readiness, if the source has one.
    fn raw_fd(&self) -> Option<RawFd> {
        None
    }
}

/// An evdev node opened read-only and non-blocking. Closed on drop.
#[derive(Debug)]
pub struct DeviceFile {
    file: File,
}

impl DeviceFile {
    pub fn open(path: &DevicePath) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(|source| Error::Open {
                path: path.clone(),
                source,
            })?;
        Ok(Self { file })
    }
}

impl EventSource for DeviceFile {
    fn read_record(&mut self, buf: &mut [u8; EVENT_SIZE]) -> io::Result<usize> {
        self.file.read(buf)
    }

    fn device_name(&self) -> io::Result<String> {
        let mut name = [0u8; DEVICE_NAME_LEN];
        let rc = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                eviocgname(name.len()),
                name.as_mut_ptr(),
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(parse_c_string(&name))
    }

    fn raw_fd(&self) -> Option<RawFd> {
        Some(self.file.as_raw_fd())
    }
}

// Linux `_IOC` encoding.
const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = 8;
const IOC_SIZESHIFT: u32 = 16;
const IOC_DIRSHIFT: u32 = 30;
const IOC_READ: u32 = 2;

const EVDEV_IOCTL_TYPE: u8 = b'E';
const EVIOC_NR_GNAME: u8 = 0x06;

const fn ioctl_code(direction: u32, kind: u8, nr: u8, size: usize) -> libc::c_ulong {
    ((direction << IOC_DIRSHIFT)
        | ((kind as u32) << IOC_TYPESHIFT)
        | ((nr as u32) << IOC_NRSHIFT)
        | ((size as u32) << IOC_SIZESHIFT)) as libc::c_ulong
}

/// `EVIOCGNAME(len)`
const fn eviocgname(len: usize) -> libc::c_ulong {
    ioctl_code(IOC_READ, EVDEV_IOCTL_TYPE, EVIOC_NR_GNAME, len)
}

fn parse_c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
