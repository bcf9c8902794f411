//! Configuration for classic constant-product pools.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, TokenPair};
use crate::error::AmmError;

/// Configuration for a classic (`x · y = k`) pool.
///
/// The tokens may be given in either order; they are sorted into a
/// [`TokenPair`] on construction.
///
/// # Validation
///
/// - The pool address must be non-zero.
/// - The token pair is validated at [`TokenPair`] construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicPoolConfig {
    address: Address,
    token_pair: TokenPair,
}

impl ClassicPoolConfig {
    /// Creates a new `ClassicPoolConfig`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both tokens are the same.
    /// - [`AmmError::InvalidAsset`] if either token is the zero address.
    /// - [`AmmError::InvalidConfiguration`] if `address` is zero.
    pub fn new(address: Address, token_a: Address, token_b: Address) -> Result<Self, AmmError> {
        let config = Self {
            address,
            token_pair: TokenPair::new(token_a, token_b)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the pool address is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.address.is_zero() {
            return Err(AmmError::InvalidConfiguration("pool address must be non-zero"));
        }
        Ok(())
    }

    /// Returns the pool address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the sorted token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }
}
