//! Daytime client: one connect, one reply, done.

use crate::net::{Domain, HostAddr, NetError, SockAddr, Socket};

/// Connect to `addr:port`, read the server's reply to EOF, and return it as
/// text.
///
/// The protocol has no framing; the server closing the connection is the end
/// of the message. On connect failure no connection exists and the socket's
/// descriptor is released before returning.
pub fn fetch(addr: &str, port: u16) -> Result<String, NetError> {
    let host = HostAddr::parse(addr)?;
    let mut socket = Socket::stream(Domain::for_addr(&host))?;

    let mut conn = match socket.connect(&SockAddr::new(host, port)) {
        Ok(conn) => conn,
        Err(error) => {
            // Failed connect leaves no reusable state behind.
            socket.close()?;
            return Err(error);
        }
    };

    let reply = conn.read_to_end()?;
    conn.close()?;

    Ok(String::from_utf8_lossy(&reply).into_owned())
}
