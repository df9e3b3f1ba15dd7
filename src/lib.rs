//! daytimed: a TCP time-protocol server and client on a minimal blocking
//! socket layer.
//!
//! # Architecture Overview
//!
//! ```text
//!              ┌───────────────────────────────────────────────┐
//!              │                  daytimed                      │
//!              │                                                │
//!   "0.0.0.0"  │  ┌──────┐   ┌──────────┐   ┌────────┐         │
//!   ───────────┼─▶│ addr │──▶│ sockaddr │──▶│ socket │         │
//!              │  └──────┘   └──────────┘   └───┬────┘         │
//!              │   parse      kernel layout     │ bind/listen  │
//!              │                                ▼ accept       │
//!              │                          ┌────────────┐       │
//!   timestamp  │  ┌─────────┐             │ connection │       │
//!   ◀──────────┼──│ daytime │◀───────────▶│ read/write │       │
//!              │  └─────────┘             └────────────┘       │
//!              └───────────────────────────────────────────────┘
//! ```
//!
//! The `net` module is the reusable core: address parsing, kernel socket
//! address construction, and the blocking socket lifecycle, every failure a
//! typed [`NetError`](net::NetError). The `daytime` module is the thin
//! protocol layer: a sequential write-timestamp-and-close server and a
//! read-to-EOF client. Process exit policy lives only in the binary.

pub mod daytime;
pub mod net;

pub use daytime::{fetch, DaytimeServer, DAYTIME_PORT};
pub use net::{Connection, HostAddr, NetError, SockAddr, Socket};
