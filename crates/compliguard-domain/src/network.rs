//! Defensive IPv4 parsing for address-based checks.
//!
//! Never indexes into the raw string: addresses are parsed into [`Ipv4Addr`] and compared by
//! network prefix.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("'{0}' is not a dotted-quad IPv4 address")]
    NotIpv4(String),

    #[error("'{0}' is not a prefix length in 0..=32")]
    BadPrefixLength(String),
}

/// Parse a device address. Surrounding whitespace is ignored; anything else must be exactly four
/// decimal octets.
pub fn parse_address(raw: &str) -> Result<Ipv4Addr, AddressError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AddressError::Empty);
    }
    Ipv4Addr::from_str(trimmed).map_err(|_| AddressError::NotIpv4(trimmed.to_string()))
}

/// An IPv4 network in CIDR form (`192.168.0.0/16`). A bare address means `/32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ipv4Network {
    base: Ipv4Addr,
    prefix_len: u8,
}

impl Ipv4Network {
    pub fn new(base: Ipv4Addr, prefix_len: u8) -> Result<Self, AddressError> {
        if prefix_len > 32 {
            return Err(AddressError::BadPrefixLength(prefix_len.to_string()));
        }
        Ok(Self { base, prefix_len })
    }

    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let trimmed = raw.trim();
        match trimmed.split_once('/') {
            None => Self::new(parse_address(trimmed)?, 32),
            Some((addr, len)) => {
                let prefix_len = len
                    .parse::<u8>()
                    .map_err(|_| AddressError::BadPrefixLength(len.to_string()))?;
                Self::new(parse_address(addr)?, prefix_len)
            }
        }
    }

    fn mask(&self) -> u32 {
        match self.prefix_len {
            0 => 0,
            n => u32::MAX << (32 - u32::from(n)),
        }
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let mask = self.mask();
        (u32::from(addr) & mask) == (u32::from(self.base) & mask)
    }
}

impl fmt::Display for Ipv4Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_quad() {
        assert_eq!(
            parse_address(" 192.168.0.1 "),
            Ok(Ipv4Addr::new(192, 168, 0, 1))
        );
    }

    #[test]
    fn rejects_short_and_malformed_addresses() {
        for raw in ["", "   ", "192", "192.168", "192.168.0", "192.168.0.256", "a.b.c.d", "10.0.0.1/8", "::1"] {
            assert!(parse_address(raw).is_err(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn address_errors_name_the_input() {
        let err: Box<dyn std::error::Error> = Box::new(parse_address("192.168.0").unwrap_err());
        assert_eq!(err.to_string(), "'192.168.0' is not a dotted-quad IPv4 address");
        assert_eq!(parse_address("  ").unwrap_err().to_string(), "address is empty");
        assert_eq!(
            Ipv4Network::parse("10.0.0.0/33").unwrap_err().to_string(),
            "'33' is not a prefix length in 0..=32"
        );
    }

    #[test]
    fn network_contains_uses_prefix() {
        let net = Ipv4Network::parse("192.168.0.0/16").expect("parse");
        assert!(net.contains(Ipv4Addr::new(192, 168, 255, 1)));
        assert!(!net.contains(Ipv4Addr::new(192, 169, 0, 1)));
        assert!(!net.contains(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn bare_address_is_host_network() {
        let net = Ipv4Network::parse("10.1.2.3").expect("parse");
        assert_eq!(net.to_string(), "10.1.2.3/32");
        assert!(net.contains(Ipv4Addr::new(10, 1, 2, 3)));
        assert!(!net.contains(Ipv4Addr::new(10, 1, 2, 4)));
    }

    #[test]
    fn zero_prefix_matches_everything() {
        let net = Ipv4Network::parse("0.0.0.0/0").expect("parse");
        assert!(net.contains(Ipv4Addr::new(8, 8, 8, 8)));
    }

    #[test]
    fn rejects_bad_prefix_lengths() {
        assert!(Ipv4Network::parse("10.0.0.0/33").is_err());
        assert!(Ipv4Network::parse("10.0.0.0/x").is_err());
        assert!(Ipv4Network::parse("10.0.0.0/").is_err());
    }
}
