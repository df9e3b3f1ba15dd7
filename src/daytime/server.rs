//! Sequential daytime server.
//!
//! # Responsibilities
//! - Bind and listen on a caller-supplied address and port
//! - Serve one connection to completion before accepting the next
//! - Survive isolated accept failures; treat bind/listen failure as fatal
//!   for this server instance

use crate::net::{Domain, HostAddr, NetError, SockAddr, Socket, DEFAULT_BACKLOG};

use super::clock;

/// A bound, listening daytime server.
///
/// Strictly sequential: at most one connection is in flight, further peers
/// wait in the kernel backlog until the current one is closed.
#[derive(Debug)]
pub struct DaytimeServer {
    socket: Socket,
}

impl DaytimeServer {
    /// Bind to `addr:port` and start listening with the default backlog.
    ///
    /// A failure here is unrecoverable for this server instance; the caller
    /// gets the bind or listen error and no server.
    pub fn bind(addr: &str, port: u16) -> Result<DaytimeServer, NetError> {
        let host = HostAddr::parse(addr)?;
        let socket = Socket::stream(Domain::for_addr(&host))?;
        socket.bind(&SockAddr::new(host, port))?;
        socket.listen(DEFAULT_BACKLOG)?;

        let server = DaytimeServer { socket };
        if let Ok(local) = server.local_addr() {
            tracing::info!(
                address = %local,
                backlog = DEFAULT_BACKLOG,
                "daytime server listening"
            );
        }
        Ok(server)
    }

    /// The address actually bound, with the kernel-assigned port when the
    /// caller bound to port 0.
    pub fn local_addr(&self) -> Result<SockAddr, NetError> {
        self.socket.local_addr()
    }

    /// Accept one peer, send the timestamp, close the connection.
    ///
    /// An accept failure is returned without disturbing the listening
    /// socket; the caller may retry. Write and close failures on the
    /// accepted connection are likewise returned after the connection's
    /// descriptor has been released by drop.
    pub fn serve_one(&self) -> Result<(), NetError> {
        let mut conn = self.socket.accept()?;
        conn.write(clock::daytime_now().as_bytes())?;
        conn.close()
    }

    /// Serve forever: the accept loop of the time protocol.
    ///
    /// Isolated per-connection failures (an interrupted accept, a peer that
    /// vanished mid-write) are logged and the loop continues; only a caller
    /// killing the process stops a healthy server.
    pub fn run(&self) -> ! {
        loop {
            if let Err(error) = self.serve_one() {
                tracing::warn!(%error, "connection not served, continuing");
            }
        }
    }
}
