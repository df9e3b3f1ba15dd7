//! Connection I/O over an established socket.
//!
//! # Responsibilities
//! - Own the descriptor of a connected or accepted socket
//! - Bounded single reads, read-to-EOF, and full-buffer writes with typed
//!   errors; a short write is surfaced, never silently ignored
//! - Release the descriptor exactly once; a second close never reaches the
//!   kernel, so it cannot collide with a reused descriptor number

use std::os::unix::io::RawFd;

use super::error::NetError;

/// Read granularity for [`Connection::read_to_end`].
const READ_CHUNK: usize = 4096;

/// Exclusive owner of a connected descriptor.
///
/// Obtained from `Socket::connect` (taking over the socket's own descriptor)
/// or `Socket::accept` (a fresh descriptor, distinct from the listener's).
/// Lives only for the data transfer it was created for.
#[derive(Debug)]
pub struct Connection {
    fd: Option<RawFd>,
}

impl Connection {
    pub(crate) fn from_raw(fd: RawFd) -> Connection {
        Connection { fd: Some(fd) }
    }

    fn fd(&self) -> Result<RawFd, NetError> {
        self.fd.ok_or(NetError::InvalidState)
    }

    /// One bounded read of at most `max_len` bytes.
    ///
    /// Returns whatever the kernel delivered in a single `read(2)`; an empty
    /// vector means the peer closed its end. Does not loop to fill the
    /// buffer; callers wanting the whole stream use [`read_to_end`].
    ///
    /// [`read_to_end`]: Connection::read_to_end
    pub fn read(&self, max_len: usize) -> Result<Vec<u8>, NetError> {
        let fd = self.fd()?;
        let mut buf = vec![0u8; max_len];
        let n = unsafe { libc::read(fd, buf.as_mut_ptr() as *mut libc::c_void, max_len) };
        if n < 0 {
            return Err(NetError::last_os(NetError::Read));
        }
        buf.truncate(n as usize);
        Ok(buf)
    }

    /// Read until the peer closes the stream; return the concatenation.
    ///
    /// The time protocol's reply is terminated by the server closing the
    /// connection, so EOF is the end-of-message marker.
    pub fn read_to_end(&self) -> Result<Vec<u8>, NetError> {
        let mut out = Vec::new();
        loop {
            let chunk = self.read(READ_CHUNK)?;
            if chunk.is_empty() {
                return Ok(out);
            }
            out.extend_from_slice(&chunk);
        }
    }

    /// Write the full buffer in one `write(2)`.
    ///
    /// A kernel error fails with the write kind; the kernel accepting fewer
    /// bytes than requested fails with [`NetError::ShortWrite`].
    pub fn write(&self, data: &[u8]) -> Result<(), NetError> {
        let fd = self.fd()?;
        let n = unsafe { libc::write(fd, data.as_ptr() as *const libc::c_void, data.len()) };
        if n < 0 {
            return Err(NetError::last_os(NetError::Write));
        }
        let written = n as usize;
        if written != data.len() {
            return Err(NetError::ShortWrite {
                written,
                expected: data.len(),
            });
        }
        Ok(())
    }

    /// Release the descriptor. Idempotent, matching `Socket::close`.
    pub fn close(&mut self) -> Result<(), NetError> {
        match self.fd.take() {
            Some(fd) => {
                if unsafe { libc::close(fd) } < 0 {
                    return Err(NetError::last_os(NetError::Close));
                }
                tracing::trace!(fd, "connection closed");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Some(fd) = self.fd.take() {
            unsafe { libc::close(fd) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::addr::HostAddr;
    use crate::net::sockaddr::SockAddr;
    use crate::net::socket::{Domain, Socket, DEFAULT_BACKLOG};
    use std::thread;

    fn listener() -> (Socket, SockAddr) {
        let socket = Socket::stream(Domain::Inet).unwrap();
        socket
            .bind(&SockAddr::new(HostAddr::LOCALHOST, 0))
            .unwrap();
        socket.listen(DEFAULT_BACKLOG).unwrap();
        let local = socket.local_addr().unwrap();
        (socket, local)
    }

    #[test]
    fn write_then_read_round_trip() {
        let (listening, addr) = listener();
        let server = thread::spawn(move || {
            let mut conn = listening.accept().unwrap();
            conn.write(b"ping").unwrap();
            conn.close().unwrap();
        });

        let mut socket = Socket::stream(Domain::Inet).unwrap();
        let mut conn = socket.connect(&addr).unwrap();
        let data = conn.read_to_end().unwrap();
        assert_eq!(data, b"ping");
        conn.close().unwrap();
        server.join().unwrap();
    }

    #[test]
    fn read_to_end_collects_until_peer_close() {
        let (listening, addr) = listener();
        let server = thread::spawn(move || {
            let mut conn = listening.accept().unwrap();
            conn.write(b"one ").unwrap();
            conn.write(b"two").unwrap();
            conn.close().unwrap();
        });

        let mut socket = Socket::stream(Domain::Inet).unwrap();
        let mut conn = socket.connect(&addr).unwrap();
        assert_eq!(conn.read_to_end().unwrap(), b"one two");
        // Peer already closed: a further bounded read still reports EOF.
        assert!(conn.read(64).unwrap().is_empty());
        conn.close().unwrap();
        server.join().unwrap();
    }

    #[test]
    fn io_after_close_fails_with_invalid_state() {
        let (listening, addr) = listener();
        let server = thread::spawn(move || {
            let mut conn = listening.accept().unwrap();
            conn.close().unwrap();
        });

        let mut socket = Socket::stream(Domain::Inet).unwrap();
        let mut conn = socket.connect(&addr).unwrap();
        conn.close().unwrap();
        assert!(matches!(conn.read(16), Err(NetError::InvalidState)));
        assert!(matches!(conn.write(b"x"), Err(NetError::InvalidState)));
        assert!(conn.close().is_ok());
        server.join().unwrap();
    }

    #[test]
    fn accepted_connection_is_distinct_from_listener() {
        let (listening, addr) = listener();
        let client = thread::spawn(move || {
            let mut socket = Socket::stream(Domain::Inet).unwrap();
            let mut conn = socket.connect(&addr).unwrap();
            let reply = conn.read_to_end().unwrap();
            conn.close().unwrap();
            reply
        });

        let mut conn = listening.accept().unwrap();
        conn.write(b"hello").unwrap();
        conn.close().unwrap();
        // Closing the accepted connection leaves the listener live.
        assert!(listening.local_addr().is_ok());
        assert_eq!(client.join().unwrap(), b"hello");
    }
}
