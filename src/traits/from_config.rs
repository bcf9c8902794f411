//! Generic construction trait for pool instantiation from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating pool instances
//! from their respective configuration structs.  Each pool type implements
//! `FromConfig<C>` for its own config variant, enabling the factory to
//! dispatch construction without `dyn` trait objects.
//!
//! # Validation Contract
//!
//! Implementations **must** validate all configuration invariants during
//! construction.  A successfully constructed pool is empty (zero reserves,
//! zero shares) and ready for its first mint.
//!
//! ```text
//! PoolConfig::Classic(cfg) => ClassicPool::from_config(&cfg)
//! PoolConfig::Stable(cfg)  => StablePool::from_config(&cfg)
//! ```

use crate::error::AmmError;

/// Generic construction trait for building a pool from a configuration.
///
/// # Implementors
///
/// - `impl FromConfig<ClassicPoolConfig> for ClassicPool`
/// - `impl FromConfig<StablePoolConfig> for StablePool`
///
/// # Errors
///
/// Returns [`AmmError::InvalidConfiguration`] (or a more specific
/// variant) if the configuration is invalid.
pub trait FromConfig<C> {
    /// Creates a new pool instance from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if any pool parameter is
    ///   out of range or inconsistent.
    /// - [`AmmError::IdenticalAssets`] if both tokens are the same.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
