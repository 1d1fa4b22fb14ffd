use std::io;
use std::os::unix::io::RawFd;
use std::time::Duration;

/// Read-readiness registration for one descriptor, backed by `poll(2)`.
///
/// The watch does not own the descriptor; the source it was created from
/// must outlive it.
#[derive(Debug)]
pub(crate) struct ReadWatch {
    fd: RawFd,
}

impl ReadWatch {
    pub(crate) fn new(fd: RawFd) -> Self {
        Self { fd }
    }

    /// Waits up to `timeout` for the descriptor to become readable.
    ///
    /// Hang-up and error conditions count as readable so the next read can
    /// report them.
    pub(crate) fn wait(&self, timeout: Duration) -> io::Result<bool> {
        let mut pollfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let timeout_ms = timeout.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;

        let rc = unsafe { libc::poll(&mut pollfd as *mut libc::pollfd, 1, timeout_ms) };
        if rc < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(err);
        }

        Ok(rc > 0 && pollfd.revents & (libc::POLLIN | libc::POLLHUP | libc::POLLERR) != 0)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::os::unix::io::AsRawFd;
    use std::os::unix::net::UnixStream;

    use super::*;

    #[test]
    fn idle_descriptor_times_out() {
        let (a, _b) = UnixStream::pair().expect("socketpair");
        let watch = ReadWatch::new(a.as_raw_fd());
        assert!(!watch.wait(Duration::from_millis(10)).expect("poll"));
    }

    #[test]
    fn pending_data_is_reported_readable() {
        let (a, mut b) = UnixStream::pair().expect("socketpair");
        b.write_all(&[0u8; 4]).expect("write");
        let watch = ReadWatch::new(a.as_raw_fd());
        assert!(watch.wait(Duration::from_millis(100)).expect("poll"));
    }

    #[test]
    fn hang_up_is_reported_readable() {
        let (a, b) = UnixStream::pair().expect("socketpair");
        drop(b);
        let watch = ReadWatch::new(a.as_raw_fd());
        assert!(watch.wait(Duration::from_millis(100)).expect("poll"));
    }
}
