//! Account and token address.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// A 20-byte account address.
///
/// Identifies token contracts, pools, the vault and end users alike.  All
/// byte sequences are valid, so construction is infallible.  Ordering is
/// lexicographic over the bytes, which is the canonical pair ordering.
///
/// # Examples
///
/// ```
/// use vault_amm::domain::Address;
///
/// let addr = Address::from_low_u64(0x2a);
/// assert_eq!(addr.as_bytes()[19], 0x2a);
/// assert!(Address::ZERO < addr);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address.  Shares sent here are irrecoverable.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Builds an address whose low eight bytes hold `value` big-endian.
    #[must_use]
    pub const fn from_low_u64(value: u64) -> Self {
        let be = value.to_be_bytes();
        let mut bytes = [0u8; 20];
        let mut i = 0;
        while i < 8 {
            bytes[12 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Returns `true` for the zero address.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < 20 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = AmmError;

    /// Parses `0x` followed by 40 hex digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("0x")
            .ok_or(AmmError::InvalidAsset("address must start with 0x"))?;
        if hex.len() != 40 || !hex.is_ascii() {
            return Err(AmmError::InvalidAsset("address must have 40 hex digits"));
        }
        let mut bytes = [0u8; 20];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16)
                .map_err(|_| AmmError::InvalidAsset("address must have 40 hex digits"))?;
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = AmmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_round_trip() {
        let bytes = [42u8; 20];
        assert_eq!(Address::from_bytes(bytes).as_bytes(), bytes);
    }

    #[test]
    fn zero_is_all_zeros() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_low_u64(1).is_zero());
        assert_eq!(Address::default(), Address::ZERO);
    }

    #[test]
    fn low_u64_is_big_endian_suffix() {
        let addr = Address::from_low_u64(0x0102);
        let bytes = addr.as_bytes();
        assert_eq!(bytes[18], 0x01);
        assert_eq!(bytes[19], 0x02);
        assert!(bytes[..18].iter().all(|b| *b == 0));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Address::from_low_u64(1) < Address::from_low_u64(2));
        assert!(Address::from_low_u64(u64::MAX) < Address::from_bytes([1u8; 20]));
    }

    #[test]
    fn display_is_hex() {
        let shown = Address::from_low_u64(0xab).to_string();
        assert_eq!(shown.len(), 42);
        assert!(shown.starts_with("0x"));
        assert!(shown.ends_with("ab"));
    }

    #[test]
    fn parse_round_trip() {
        let addr = Address::from_low_u64(0xdead_beef);
        let Ok(parsed) = addr.to_string().parse::<Address>() else {
            panic!("parse");
        };
        assert_eq!(parsed, addr);
        assert!("0x12".parse::<Address>().is_err());
        assert!("12".repeat(20).parse::<Address>().is_err());
        assert!(format!("0x{}", "zz".repeat(20)).parse::<Address>().is_err());
    }

    #[test]
    fn serializes_as_hex_string() {
        let addr = Address::from_low_u64(1);
        let Ok(json) = serde_json::to_string(&addr) else {
            panic!("serialize");
        };
        assert_eq!(json, format!("\"{addr}\""));
        let Ok(back) = serde_json::from_str::<Address>(&json) else {
            panic!("deserialize");
        };
        assert_eq!(back, addr);
    }
}
