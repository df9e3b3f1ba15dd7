//! Socket lifecycle: create, bind, listen, accept, connect, close.
//!
//! # Responsibilities
//! - Own exactly one kernel descriptor for the socket's lifetime
//! - Enforce the `Live -> Closed` state machine: operations on a closed
//!   socket fail with `InvalidState` without touching the kernel
//! - Translate syscall failures into typed errors, never exiting the process
//!
//! # Design Decisions
//! - `Option<RawFd>` encodes liveness; `close` takes the fd out, so a second
//!   close is a no-op that can never reach a reused descriptor number
//! - `connect` transfers the fd into the returned [`Connection`] on success;
//!   the `Connection` is the exclusive owner from then on
//! - `Drop` closes a still-live fd so an early return cannot leak descriptors

use std::os::unix::io::RawFd;

use super::connection::Connection;
use super::error::NetError;
use super::sockaddr::SockAddr;
use crate::net::addr::HostAddr;

/// Pending-connection queue depth used when the caller has no preference.
pub const DEFAULT_BACKLOG: i32 = 2;

/// Protocol family for socket creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Inet,
    Inet6,
}

impl Domain {
    /// The family that can carry the given address.
    pub fn for_addr(addr: &HostAddr) -> Domain {
        if addr.is_v6() {
            Domain::Inet6
        } else {
            Domain::Inet
        }
    }

    fn raw(self) -> libc::c_int {
        match self {
            Domain::Inet => libc::AF_INET,
            Domain::Inet6 => libc::AF_INET6,
        }
    }
}

/// Socket semantics for socket creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SockType {
    Stream,
    Dgram,
}

impl SockType {
    fn raw(self) -> libc::c_int {
        match self {
            SockType::Stream => libc::SOCK_STREAM,
            SockType::Dgram => libc::SOCK_DGRAM,
        }
    }
}

/// Exclusive owner of one kernel socket descriptor.
#[derive(Debug)]
pub struct Socket {
    fd: Option<RawFd>,
}

impl Socket {
    /// Obtain a kernel descriptor for the given family and type.
    pub fn new(domain: Domain, sock_type: SockType) -> Result<Socket, NetError> {
        let fd = unsafe { libc::socket(domain.raw(), sock_type.raw(), 0) };
        if fd < 0 {
            return Err(NetError::last_os(NetError::SocketCreation));
        }
        tracing::trace!(fd, domain = ?domain, "socket created");
        Ok(Socket { fd: Some(fd) })
    }

    /// Stream socket for the given family. IPv4/stream is the common default
    /// configuration; pass [`Domain::Inet6`] for v6 peers.
    pub fn stream(domain: Domain) -> Result<Socket, NetError> {
        Socket::new(domain, SockType::Stream)
    }

    fn fd(&self) -> Result<RawFd, NetError> {
        self.fd.ok_or(NetError::InvalidState)
    }

    /// Attach the socket to a local address.
    pub fn bind(&self, addr: &SockAddr) -> Result<(), NetError> {
        let fd = self.fd()?;
        let (raw, len) = addr.as_raw();
        if unsafe { libc::bind(fd, raw, len) } < 0 {
            return Err(NetError::last_os(NetError::Bind));
        }
        tracing::debug!(fd, address = %addr, "socket bound");
        Ok(())
    }

    /// Mark the socket as a passive listener with the given backlog depth.
    pub fn listen(&self, backlog: i32) -> Result<(), NetError> {
        let fd = self.fd()?;
        if unsafe { libc::listen(fd, backlog) } < 0 {
            return Err(NetError::last_os(NetError::Listen));
        }
        tracing::debug!(fd, backlog, "socket listening");
        Ok(())
    }

    /// Block until a peer connects; return the accepted connection.
    ///
    /// The returned [`Connection`] owns a new descriptor distinct from this
    /// listener's. On failure (interrupt, descriptor exhaustion) the listener
    /// itself stays usable and the caller may retry.
    pub fn accept(&self) -> Result<Connection, NetError> {
        let fd = self.fd()?;
        let mut peer: libc::sockaddr_storage = unsafe { std::mem::zeroed() };
        let mut peer_len = std::mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;
        let conn_fd = unsafe {
            libc::accept(fd, &mut peer as *mut _ as *mut libc::sockaddr, &mut peer_len)
        };
        if conn_fd < 0 {
            return Err(NetError::last_os(NetError::Accept));
        }
        if let Some(peer) = SockAddr::from_storage(&peer) {
            tracing::debug!(fd = conn_fd, peer_addr = %peer, "connection accepted");
        }
        Ok(Connection::from_raw(conn_fd))
    }

    /// Block until the connection to `addr` is established.
    ///
    /// On success the socket's descriptor moves into the returned
    /// [`Connection`] and this socket observes the Closed state. On failure
    /// the descriptor is retained and must still be closed by the caller
    /// (or by `Drop` on unwind); the socket is not reusable for another
    /// connect attempt.
    pub fn connect(&mut self, addr: &SockAddr) -> Result<Connection, NetError> {
        let fd = match self.fd.take() {
            Some(fd) => fd,
            None => return Err(NetError::InvalidState),
        };
        let (raw, len) = addr.as_raw();
        if unsafe { libc::connect(fd, raw, len) } < 0 {
            let err = NetError::last_os(NetError::Connect);
            self.fd = Some(fd);
            return Err(err);
        }
        tracing::debug!(fd, peer_addr = %addr, "connected");
        Ok(Connection::from_raw(fd))
    }

    /// The local address the socket is bound to.
    ///
    /// Queries the kernel, so it reflects the actual port after binding to
    /// port 0. Failures are surfaced under the bind kind since this reports
    /// the bound name.
    pub fn local_addr(&self) -> Result<SockAddr, NetError> {
        let fd = self.fd()?;
        let mut storage: libc::sockaddr_storage = unsafe { std::mem::zeroed() };
        let mut len = std::mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;
        if unsafe {
            libc::getsockname(fd, &mut storage as *mut _ as *mut libc::sockaddr, &mut len)
        } < 0
        {
            return Err(NetError::last_os(NetError::Bind));
        }
        SockAddr::from_storage(&storage).ok_or_else(|| {
            NetError::Bind(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "unsupported address family",
            ))
        })
    }

    /// Release the descriptor and transition to Closed.
    ///
    /// Idempotent: closing an already-closed socket is `Ok(())`. All other
    /// operations on a closed socket fail with `InvalidState`.
    pub fn close(&mut self) -> Result<(), NetError> {
        match self.fd.take() {
            Some(fd) => {
                if unsafe { libc::close(fd) } < 0 {
                    return Err(NetError::last_os(NetError::Close));
                }
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for Socket {
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

    fn loopback(port: u16) -> SockAddr {
        SockAddr::new(HostAddr::LOCALHOST, port)
    }

    #[test]
    fn operations_after_close_fail_with_invalid_state() {
        let mut socket = Socket::stream(Domain::Inet).unwrap();
        socket.close().unwrap();

        assert!(matches!(
            socket.bind(&loopback(0)),
            Err(NetError::InvalidState)
        ));
        assert!(matches!(
            socket.listen(DEFAULT_BACKLOG),
            Err(NetError::InvalidState)
        ));
        assert!(matches!(socket.accept(), Err(NetError::InvalidState)));
        assert!(matches!(
            socket.connect(&loopback(13)),
            Err(NetError::InvalidState)
        ));
        assert!(matches!(socket.local_addr(), Err(NetError::InvalidState)));
    }

    #[test]
    fn double_close_is_idempotent() {
        let mut socket = Socket::stream(Domain::Inet).unwrap();
        socket.close().unwrap();
        assert!(socket.close().is_ok());
    }

    #[test]
    fn double_close_does_not_disturb_other_handles() {
        let mut first = Socket::stream(Domain::Inet).unwrap();
        first.close().unwrap();
        // A second socket likely reuses the freed descriptor number; closing
        // the first again must not release it out from under us.
        let second = Socket::stream(Domain::Inet).unwrap();
        first.close().unwrap();
        second.bind(&loopback(0)).unwrap();
        second.listen(DEFAULT_BACKLOG).unwrap();
    }

    #[test]
    fn bind_to_ephemeral_port_reports_real_port() {
        let socket = Socket::stream(Domain::Inet).unwrap();
        socket.bind(&loopback(0)).unwrap();
        let local = socket.local_addr().unwrap();
        assert_ne!(local.port(), 0);
        assert_eq!(local.host(), HostAddr::LOCALHOST);
    }

    #[test]
    fn bind_rejects_address_in_use() {
        let first = Socket::stream(Domain::Inet).unwrap();
        first.bind(&loopback(0)).unwrap();
        first.listen(DEFAULT_BACKLOG).unwrap();
        let taken = first.local_addr().unwrap();

        let second = Socket::stream(Domain::Inet).unwrap();
        assert!(matches!(
            second.bind(&loopback(taken.port())),
            Err(NetError::Bind(_))
        ));
    }

    #[test]
    fn connect_failure_leaves_socket_closeable() {
        let probe = Socket::stream(Domain::Inet).unwrap();
        probe.bind(&loopback(0)).unwrap();
        let dead_port = probe.local_addr().unwrap().port();
        drop(probe); // bound but never listening, now free

        let mut socket = Socket::stream(Domain::Inet).unwrap();
        assert!(matches!(
            socket.connect(&loopback(dead_port)),
            Err(NetError::Connect(_))
        ));
        socket.close().unwrap();
    }
}
