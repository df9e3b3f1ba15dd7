//! The daytime protocol, on top of the socket layer.
//!
//! # Data Flow
//! ```text
//! Server: bind → listen → loop { accept → write timestamp → close }
//! Client: connect → read to EOF → decode text
//! ```
//!
//! One synchronous exchange per connection: the server writes a single
//! human-readable timestamp and closes; the client treats peer close as end
//! of message. Strictly sequential, one peer served to completion before the
//! next is accepted.

pub mod client;
pub mod clock;
pub mod server;

pub use client::fetch;
pub use server::DaytimeServer;

/// The time protocol's assigned port.
pub const DAYTIME_PORT: u16 = 13;
