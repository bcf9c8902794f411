//! Ordered pair of distinct token addresses.

use serde::{Deserialize, Serialize};

use super::Address;
use crate::error::AmmError;

/// An ordered pair of distinct tokens, canonically sorted by address.
///
/// The canonical ordering guarantees `token0 < token1`, so `(A, B)` and
/// `(B, A)` describe the same pool.
///
/// # Examples
///
/// ```
/// use vault_amm::domain::{Address, TokenPair};
///
/// let a = Address::from_low_u64(1);
/// let b = Address::from_low_u64(2);
///
/// let pair = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(pair.token0(), a);
/// assert_eq!(pair.token1(), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

impl TokenPair {
    /// Creates a new canonically-ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both addresses are equal.
    /// - [`AmmError::InvalidAsset`] if either address is zero.
    pub fn new(token_a: Address, token_b: Address) -> Result<Self, AmmError> {
        if token_a == token_b {
            return Err(AmmError::IdenticalAssets);
        }
        if token_a.is_zero() || token_b.is_zero() {
            return Err(AmmError::InvalidAsset("pair token is the zero address"));
        }

        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        Ok(Self { token0, token1 })
    }

    /// Returns the lower-addressed token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Returns the higher-addressed token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Returns `true` if `token` is part of this pair.
    #[must_use]
    pub fn contains(&self, token: Address) -> bool {
        self.token0 == token || self.token1 == token
    }

    /// Returns the counterpart of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `token` is not in the pair.
    pub fn other(&self, token: Address) -> Result<Address, AmmError> {
        if token == self.token0 {
            Ok(self.token1)
        } else if token == self.token1 {
            Ok(self.token0)
        } else {
            Err(AmmError::InvalidAsset("token is not part of this pair"))
        }
    }

    /// Returns `true` if `token` is `token0`, `false` if it is `token1`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `token` is not in the pair.
    pub fn is_token0(&self, token: Address) -> Result<bool, AmmError> {
        if token == self.token0 {
            Ok(true)
        } else if token == self.token1 {
            Ok(false)
        } else {
            Err(AmmError::InvalidAsset("token is not part of this pair"))
        }
    }
}
