//! Configuration for StableSwap pools.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Decimals, TokenPair};
use crate::error::AmmError;

/// Amplification used when none is specified.
pub const DEFAULT_AMPLIFICATION: u128 = 1_000;

/// Configuration for a StableSwap pool.
///
/// Each token carries its decimals, from which the precision multiplier
/// `10^(18 − decimals)` is derived.  Decimals follow their token when the
/// pair is sorted.
///
/// # Validation
///
/// - The pool address must be non-zero.
/// - `amplification` must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StablePoolConfig {
    address: Address,
    token_pair: TokenPair,
    decimals0: Decimals,
    decimals1: Decimals,
    amplification: u128,
}

impl StablePoolConfig {
    /// Creates a new `StablePoolConfig`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] / [`AmmError::InvalidAsset`] for a
    ///   bad token pair.
    /// - [`AmmError::InvalidConfiguration`] for a zero address or zero
    ///   amplification.
    pub fn new(
        address: Address,
        token_a: (Address, Decimals),
        token_b: (Address, Decimals),
        amplification: u128,
    ) -> Result<Self, AmmError> {
        let token_pair = TokenPair::new(token_a.0, token_b.0)?;
        let (decimals0, decimals1) = if token_pair.token0() == token_a.0 {
            (token_a.1, token_b.1)
        } else {
            (token_b.1, token_a.1)
        };
        let config = Self {
            address,
            token_pair,
            decimals0,
            decimals1,
            amplification,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a config with [`DEFAULT_AMPLIFICATION`].
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn with_default_amplification(
        address: Address,
        token_a: (Address, Decimals),
        token_b: (Address, Decimals),
    ) -> Result<Self, AmmError> {
        Self::new(address, token_a, token_b, DEFAULT_AMPLIFICATION)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the address or the
    /// amplification is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.address.is_zero() {
            return Err(AmmError::InvalidConfiguration("pool address must be non-zero"));
        }
        if self.amplification == 0 {
            return Err(AmmError::InvalidConfiguration("amplification must be positive"));
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

    /// Returns `(decimals0, decimals1)` in pair order.
    #[must_use]
    pub const fn decimals(&self) -> (Decimals, Decimals) {
        (self.decimals0, self.decimals1)
    }

    /// Returns the amplification coefficient.
    #[must_use]
    pub const fn amplification(&self) -> u128 {
        self.amplification
    }
}
