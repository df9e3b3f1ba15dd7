//! Blocking socket layer.
//!
//! # Data Flow
//! ```text
//! "127.0.0.1"
//!     → addr.rs (presentation text to binary form, family detection)
//!     → sockaddr.rs (kernel-native layout, network-order port)
//!     → socket.rs (create / bind / listen / accept / connect / close)
//!     → connection.rs (read / write / close on an established peer)
//!
//! Socket states: Live → Closed (terminal)
//! ```
//!
//! # Design Decisions
//! - Strictly blocking I/O; no runtime, no threads, no locks in this layer
//! - Every failable operation returns a typed [`NetError`]; the layer never
//!   exits the process
//! - Raw socket-address memory is confined to `sockaddr.rs`

pub mod addr;
pub mod connection;
pub mod error;
pub mod sockaddr;
pub mod socket;

pub use addr::HostAddr;
pub use connection::Connection;
pub use error::NetError;
pub use sockaddr::SockAddr;
pub use socket::{Domain, SockType, Socket, DEFAULT_BACKLOG};
