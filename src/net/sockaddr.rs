//! Kernel-native socket address construction.
//!
//! # Responsibilities
//! - Assemble the family-correct `sockaddr_in` / `sockaddr_in6` layout from a
//!   parsed [`HostAddr`] and a host-order port
//! - Encode the port in network byte order, exactly once
//! - Report the exact per-family byte size alongside the raw pointer, since
//!   the two layouts differ in size
//!
//! # Design Decisions
//! - A tagged union over the two fixed layouts makes a family mismatch
//!   between the discriminator field and the embedded address
//!   unrepresentable: the variant is chosen from the `HostAddr` variant.
//! - This module is the only place in the crate that deals in raw socket
//!   address memory; everything else goes through `as_raw`.

use std::fmt;
use std::mem;

use super::addr::HostAddr;

/// A socket address in the binary layout the kernel syscalls consume.
///
/// Built per bind/connect call and not persisted. Immutable value type.
#[derive(Clone, Copy)]
pub enum SockAddr {
    V4(libc::sockaddr_in),
    V6(libc::sockaddr_in6),
}

impl SockAddr {
    /// Build the kernel layout for `addr:port`.
    ///
    /// `port` is host-order at this boundary; the stored field is its
    /// network-byte-order encoding.
    pub fn new(addr: HostAddr, port: u16) -> SockAddr {
        match addr {
            HostAddr::V4(octets) => {
                // Zero-init covers sin_zero padding (and sin_len on BSDs).
                let mut raw: libc::sockaddr_in = unsafe { mem::zeroed() };
                raw.sin_family = libc::AF_INET as libc::sa_family_t;
                raw.sin_port = port.to_be();
                raw.sin_addr.s_addr = u32::from_ne_bytes(octets);
                SockAddr::V4(raw)
            }
            HostAddr::V6(octets) => {
                let mut raw: libc::sockaddr_in6 = unsafe { mem::zeroed() };
                raw.sin6_family = libc::AF_INET6 as libc::sa_family_t;
                raw.sin6_port = port.to_be();
                raw.sin6_addr.s6_addr = octets;
                SockAddr::V6(raw)
            }
        }
    }

    /// Decode a raw `sockaddr_storage` filled in by the kernel (getsockname,
    /// accept). Returns `None` for families this crate does not model.
    pub(crate) fn from_storage(storage: &libc::sockaddr_storage) -> Option<SockAddr> {
        match storage.ss_family as libc::c_int {
            libc::AF_INET => {
                let raw = unsafe { *(storage as *const _ as *const libc::sockaddr_in) };
                Some(SockAddr::V4(raw))
            }
            libc::AF_INET6 => {
                let raw = unsafe { *(storage as *const _ as *const libc::sockaddr_in6) };
                Some(SockAddr::V6(raw))
            }
            _ => None,
        }
    }

    /// The kernel family discriminator stored in the structure.
    pub fn family(&self) -> libc::sa_family_t {
        match self {
            SockAddr::V4(raw) => raw.sin_family,
            SockAddr::V6(raw) => raw.sin6_family,
        }
    }

    /// The port, converted back to host order. Inverse of the encoding done
    /// in [`SockAddr::new`].
    pub fn port(&self) -> u16 {
        match self {
            SockAddr::V4(raw) => u16::from_be(raw.sin_port),
            SockAddr::V6(raw) => u16::from_be(raw.sin6_port),
        }
    }

    /// The embedded address, decoded back into its canonical binary form.
    pub fn host(&self) -> HostAddr {
        match self {
            SockAddr::V4(raw) => HostAddr::V4(raw.sin_addr.s_addr.to_ne_bytes()),
            SockAddr::V6(raw) => HostAddr::V6(raw.sin6_addr.s6_addr),
        }
    }

    /// The raw pointer/length pair the syscall layer consumes.
    ///
    /// The length is the exact size of the selected family's layout, never
    /// the size of the other family's.
    pub(crate) fn as_raw(&self) -> (*const libc::sockaddr, libc::socklen_t) {
        match self {
            SockAddr::V4(raw) => (
                raw as *const libc::sockaddr_in as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_in>() as libc::socklen_t,
            ),
            SockAddr::V6(raw) => (
                raw as *const libc::sockaddr_in6 as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_in6>() as libc::socklen_t,
            ),
        }
    }
}

impl fmt::Debug for SockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SockAddr")
            .field("host", &self.host())
            .field("port", &self.port())
            .finish()
    }
}

impl fmt::Display for SockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.host() {
            host @ HostAddr::V4(_) => write!(f, "{}:{}", host, self.port()),
            host @ HostAddr::V6(_) => write!(f, "[{}]:{}", host, self.port()),
        }
    }
}
