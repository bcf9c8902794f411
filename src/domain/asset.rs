//! Vault asset identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Address;

/// An asset the vault can custody.
///
/// The native coin has no token contract of its own.  Inside the vault it
/// is always held in wrapped form, so `Native` and the wrapped-native
/// token resolve to the same ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// The chain's native coin.
    Native,
    /// A fungible token contract.
    Token(Address),
}

impl Asset {
    /// Returns `true` for [`Asset::Native`].
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// Returns the token address, or `None` for the native coin.
    #[must_use]
    pub const fn token(&self) -> Option<Address> {
        match self {
            Self::Native => None,
            Self::Token(addr) => Some(*addr),
        }
    }
}

impl From<Address> for Asset {
    fn from(addr: Address) -> Self {
        Self::Token(addr)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Token(addr) => write!(f, "{addr}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_has_no_token() {
        assert!(Asset::Native.is_native());
        assert_eq!(Asset::Native.token(), None);
    }

    #[test]
    fn token_from_address() {
        let addr = Address::from_low_u64(9);
        let asset = Asset::from(addr);
        assert!(!asset.is_native());
        assert_eq!(asset.token(), Some(addr));
    }

    #[test]
    fn display() {
        assert_eq!(Asset::Native.to_string(), "native");
        assert!(Asset::Token(Address::from_low_u64(1)).to_string().ends_with("01"));
    }
}
