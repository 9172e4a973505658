//! Peripheral identity
//!
//! A peripheral handle is opaque to wearlink. The only thing the crate asks of
//! it is a stable 48-bit Bluetooth address, exposed through [`Peripheral`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};

/// 48-bit Bluetooth device address
///
/// Bytes are kept in display order, so `AA:BB:CC:DD:EE:FF` is stored as
/// `[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeripheralAddress([u8; 6]);

impl PeripheralAddress {
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl From<[u8; 6]> for PeripheralAddress {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

/// Takes the six least significant bytes, most significant first.
impl From<u64> for PeripheralAddress {
    fn from(raw: u64) -> Self {
        let be = raw.to_be_bytes();
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&be[2..]);
        Self(bytes)
    }
}

impl From<PeripheralAddress> for u64 {
    fn from(addr: PeripheralAddress) -> Self {
        let mut be = [0u8; 8];
        be[2..].copy_from_slice(&addr.0);
        u64::from_be_bytes(be)
    }
}

impl fmt::Display for PeripheralAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// Parses `AA:BB:CC:DD:EE:FF`, `aa-bb-cc-dd-ee-ff` or `AABBCCDDEEFF`.
impl FromStr for PeripheralAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parts: Vec<&str> = s.split([':', '-']).collect();

        let digits = match parts.as_slice() {
            [single] if single.len() == 12 => single.to_string(),
            groups if groups.len() == 6 && groups.iter().all(|g| g.len() == 2) => groups.concat(),
            _ => {
                return Err(Error::Parse(format!(
                    "invalid peripheral address '{}': expected six hex octets",
                    s
                )));
            }
        };

        let raw = hex::decode(&digits)
            .map_err(|e| Error::Parse(format!("invalid peripheral address '{}': {}", s, e)))?;

        let bytes: [u8; 6] = raw.as_slice().try_into().map_err(|_| {
            Error::Parse(format!("invalid peripheral address '{}': wrong length", s))
        })?;

        Ok(Self(bytes))
    }
}

/// Anything that can stand in as a peripheral handle.
pub trait Peripheral {
    /// Stable identity of the underlying device
    fn address(&self) -> PeripheralAddress;
}

impl Peripheral for PeripheralAddress {
    fn address(&self) -> PeripheralAddress {
        *self
    }
}

impl<T: Peripheral + ?Sized> Peripheral for &T {
    fn address(&self) -> PeripheralAddress {
        (**self).address()
    }
}

impl<T: Peripheral + ?Sized> Peripheral for Box<T> {
    fn address(&self) -> PeripheralAddress {
        (**self).address()
    }
}

impl<T: Peripheral + ?Sized> Peripheral for Arc<T> {
    fn address(&self) -> PeripheralAddress {
        (**self).address()
    }
}
