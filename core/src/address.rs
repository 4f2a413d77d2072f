//! # Address Model
//!
//! Fixed-width numeric representation of IPv4 and IPv6 addresses.
//!
//! Both families are stored as big-endian unsigned integers (`u32` / `u128`) so
//! prefix masking is a single AND. Values of different families are never
//! compared against each other.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address space of an [`AddressValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Number of bits in an address of this family.
    pub const fn bit_width(self) -> u8 {
        match self {
            AddressFamily::V4 => 32,
            AddressFamily::V6 => 128,
        }
    }

    /// Number of bytes in an address of this family.
    pub const fn byte_len(self) -> usize {
        self.bit_width() as usize / 8
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => f.write_str("IPv4"),
            AddressFamily::V6 => f.write_str("IPv6"),
        }
    }
}

/// A network address as a big-endian integer of its family's width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressValue {
    V4(u32),
    V6(u128),
}

impl AddressValue {
    /// Builds a value from raw network-order bytes.
    ///
    /// Only 4-byte (IPv4) and 16-byte (IPv6) slices are valid.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes.len() {
            4 => {
                let octets: [u8; 4] = bytes.try_into().ok()?;
                Some(AddressValue::V4(u32::from_be_bytes(octets)))
            }
            16 => {
                let octets: [u8; 16] = bytes.try_into().ok()?;
                Some(AddressValue::V6(u128::from_be_bytes(octets)))
            }
            _ => None,
        }
    }

    pub fn family(&self) -> AddressFamily {
        match self {
            AddressValue::V4(_) => AddressFamily::V4,
            AddressValue::V6(_) => AddressFamily::V6,
        }
    }

    /// Network-order bytes, 4 or 16 long.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            AddressValue::V4(v) => v.to_be_bytes().to_vec(),
            AddressValue::V6(v) => v.to_be_bytes().to_vec(),
        }
    }

    /// Bitwise AND with a value of the same family.
    ///
    /// Returns `None` when the families differ.
    pub fn masked(&self, mask: &AddressValue) -> Option<AddressValue> {
        match (self, mask) {
            (AddressValue::V4(a), AddressValue::V4(m)) => Some(AddressValue::V4(a & m)),
            (AddressValue::V6(a), AddressValue::V6(m)) => Some(AddressValue::V6(a & m)),
            _ => None,
        }
    }

    pub fn to_ip(&self) -> IpAddr {
        match *self {
            AddressValue::V4(v) => IpAddr::V4(Ipv4Addr::from(v)),
            AddressValue::V6(v) => IpAddr::V6(Ipv6Addr::from(v)),
        }
    }
}

impl From<IpAddr> for AddressValue {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => AddressValue::V4(u32::from(v4)),
            IpAddr::V6(v6) => AddressValue::V6(u128::from(v6)),
        }
    }
}

impl From<Ipv4Addr> for AddressValue {
    fn from(ip: Ipv4Addr) -> Self {
        AddressValue::V4(u32::from(ip))
    }
}

impl From<Ipv6Addr> for AddressValue {
    fn from(ip: Ipv6Addr) -> Self {
        AddressValue::V6(u128::from(ip))
    }
}

impl From<AddressValue> for IpAddr {
    fn from(value: AddressValue) -> Self {
        value.to_ip()
    }
}

impl fmt::Display for AddressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ip())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_widths() {
        assert_eq!(AddressFamily::V4.bit_width(), 32);
        assert_eq!(AddressFamily::V6.bit_width(), 128);
        assert_eq!(AddressFamily::V4.byte_len(), 4);
        assert_eq!(AddressFamily::V6.byte_len(), 16);
    }

    #[test]
    fn test_from_bytes_accepts_only_valid_lengths() {
        assert_eq!(
            AddressValue::from_bytes(&[192, 168, 3, 1]),
            Some(AddressValue::V4(0xC0A8_0301))
        );
        assert_eq!(AddressValue::from_bytes(&[0u8; 16]), Some(AddressValue::V6(0)));

        assert_eq!(AddressValue::from_bytes(&[]), None);
        assert_eq!(AddressValue::from_bytes(&[1, 2, 3]), None);
        assert_eq!(AddressValue::from_bytes(&[0u8; 8]), None);
        assert_eq!(AddressValue::from_bytes(&[0u8; 17]), None);
    }

    #[test]
    fn test_big_endian_conversion() {
        let value = AddressValue::from(Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(value, AddressValue::V4(0x0A00_0001));
        assert_eq!(value.to_bytes(), vec![10, 0, 0, 1]);

        let value = AddressValue::from("8000::1".parse::<Ipv6Addr>().unwrap());
        assert_eq!(value, AddressValue::V6((1u128 << 127) | 1));
        assert_eq!(value.to_bytes().len(), 16);
        assert_eq!(value.to_bytes()[0], 0x80);
    }

    #[test]
    fn test_masked_requires_same_family() {
        let v4 = AddressValue::V4(0xC0A8_03FF);
        let v4_mask = AddressValue::V4(0xFFFF_FF00);
        let v6_mask = AddressValue::V6(u128::MAX);

        assert_eq!(v4.masked(&v4_mask), Some(AddressValue::V4(0xC0A8_0300)));
        assert_eq!(v4.masked(&v6_mask), None);
    }

    #[test]
    fn test_ip_round_trip_and_display() {
        let ip: IpAddr = "192:168:3::ffff".parse().unwrap();
        let value = AddressValue::from(ip);
        assert_eq!(value.family(), AddressFamily::V6);
        assert_eq!(IpAddr::from(value), ip);
        assert_eq!(value.to_string(), "192:168:3::ffff");
        assert_eq!(AddressFamily::V6.to_string(), "IPv6");
    }
}
