//! Textual IP address parsing into binary wire form.
//!
//! # Responsibilities
//! - Detect the address family from presentation syntax (a colon means IPv6)
//! - Convert dotted-decimal / colon-hex text to the fixed-length binary form
//!   the kernel consumes (4 bytes for v4, 16 for v6)
//! - Reject malformed literals with a typed error, producing no partial value

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use super::error::NetError;

/// A parsed IP address: family tag plus canonical binary bytes.
///
/// The payload length invariant (4 bytes for v4, 16 for v6) is carried by the
/// variant itself, so a mismatched length is unrepresentable. Immutable once
/// constructed; equality is family equality plus exact byte equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostAddr {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl HostAddr {
    /// The IPv4 wildcard address, `0.0.0.0`.
    pub const UNSPECIFIED: HostAddr = HostAddr::V4([0, 0, 0, 0]);

    /// The IPv4 loopback address, `127.0.0.1`.
    pub const LOCALHOST: HostAddr = HostAddr::V4([127, 0, 0, 1]);

    /// Parse a presentation-form IP address.
    ///
    /// The family is chosen from the syntax: any colon selects IPv6,
    /// otherwise the literal is treated as dotted-decimal IPv4. A literal
    /// that does not parse for its detected family fails with
    /// [`NetError::InvalidAddress`].
    pub fn parse(presentation: &str) -> Result<HostAddr, NetError> {
        let invalid = || NetError::InvalidAddress(presentation.to_owned());

        if presentation.contains(':') {
            let addr: Ipv6Addr = presentation.parse().map_err(|_| invalid())?;
            Ok(HostAddr::V6(addr.octets()))
        } else {
            let addr: Ipv4Addr = presentation.parse().map_err(|_| invalid())?;
            Ok(HostAddr::V4(addr.octets()))
        }
    }

    /// Whether this is an IPv6 address.
    pub fn is_v6(&self) -> bool {
        matches!(self, HostAddr::V6(_))
    }

    /// The binary bytes in network order (4 or 16 depending on family).
    pub fn octets(&self) -> &[u8] {
        match self {
            HostAddr::V4(bytes) => bytes,
            HostAddr::V6(bytes) => bytes,
        }
    }
}

impl fmt::Display for HostAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostAddr::V4(bytes) => Ipv4Addr::from(*bytes).fmt(f),
            HostAddr::V6(bytes) => Ipv6Addr::from(*bytes).fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ipv4_loopback() {
        let addr = HostAddr::parse("127.0.0.1").unwrap();
        assert_eq!(addr, HostAddr::V4([127, 0, 0, 1]));
        assert!(!addr.is_v6());
        assert_eq!(addr.octets(), &[127, 0, 0, 1]);
    }

    #[test]
    fn parses_ipv4_wildcard() {
        assert_eq!(HostAddr::parse("0.0.0.0").unwrap(), HostAddr::UNSPECIFIED);
    }

    #[test]
    fn parses_ipv6() {
        let addr = HostAddr::parse("::1").unwrap();
        assert!(addr.is_v6());
        let mut expected = [0u8; 16];
        expected[15] = 1;
        assert_eq!(addr, HostAddr::V6(expected));
    }

    #[test]
    fn parses_full_ipv6() {
        let addr = HostAddr::parse("2001:db8::ff").unwrap();
        assert_eq!(addr.octets().len(), 16);
        assert_eq!(&addr.octets()[..4], &[0x20, 0x01, 0x0d, 0xb8]);
        assert_eq!(addr.octets()[15], 0xff);
    }

    #[test]
    fn rejects_malformed_literals() {
        for bad in ["999.1.1.1", "not-an-ip", "", "1.2.3", "1.2.3.4.5", ":::"] {
            match HostAddr::parse(bad) {
                Err(NetError::InvalidAddress(text)) => assert_eq!(text, bad),
                other => panic!("expected InvalidAddress for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn colon_forces_ipv6_interpretation() {
        // A v4-looking literal with a colon must be rejected as v6, not
        // silently reparsed as v4.
        assert!(matches!(
            HostAddr::parse("127.0.0.1:80"),
            Err(NetError::InvalidAddress(_))
        ));
    }

    #[test]
    fn displays_presentation_form() {
        assert_eq!(HostAddr::LOCALHOST.to_string(), "127.0.0.1");
        assert_eq!(HostAddr::parse("::1").unwrap().to_string(), "::1");
    }
}
