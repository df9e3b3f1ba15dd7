//! Typed errors for the socket layer.
//!
//! # Responsibilities
//! - One variant per failable socket operation, so callers can match on the
//!   operation that failed rather than string-compare messages
//! - Chain the captured OS error (`errno`) as the source where one exists
//! - Never terminate the process; exit-code mapping lives in the binary

use thiserror::Error;

/// Errors surfaced by the address, socket, and connection types.
///
/// Every syscall-backed variant carries the `std::io::Error` captured from
/// `errno` at the failing call site.
#[derive(Debug, Error)]
pub enum NetError {
    /// The textual IP address could not be parsed for its detected family.
    #[error("invalid address literal: {0:?}")]
    InvalidAddress(String),

    /// `socket(2)` refused the domain/type pair or ran out of descriptors.
    #[error("socket creation failed: {0}")]
    SocketCreation(#[source] std::io::Error),

    /// `bind(2)` failed (address in use, permission, bad structure size).
    #[error("bind failed: {0}")]
    Bind(#[source] std::io::Error),

    /// `listen(2)` failed.
    #[error("listen failed: {0}")]
    Listen(#[source] std::io::Error),

    /// `accept(2)` failed; the listening socket is still usable.
    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),

    /// `connect(2)` failed; no connection was established.
    #[error("connect failed: {0}")]
    Connect(#[source] std::io::Error),

    /// `read(2)` failed on an established connection.
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    /// `write(2)` failed on an established connection.
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    /// The kernel accepted fewer bytes than requested in a single write.
    #[error("short write: wrote {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// `close(2)` reported an error while releasing the descriptor.
    #[error("close failed: {0}")]
    Close(#[source] std::io::Error),

    /// The operation was attempted on a handle that was already closed.
    #[error("operation on closed handle")]
    InvalidState,
}

impl NetError {
    /// Capture `errno` for the syscall that just failed and wrap it with the
    /// given constructor.
    pub(crate) fn last_os(wrap: fn(std::io::Error) -> NetError) -> NetError {
        wrap(std::io::Error::last_os_error())
    }
}
