//! Default pool factory implementation.

use tracing::debug;

use crate::config::PoolConfig;
use crate::error::AmmError;
use crate::pools::PoolBox;

#[cfg(any(feature = "classic", feature = "stable"))]
use crate::traits::FromConfig;

/// Stateless factory for creating pool instances from configuration.
///
/// [`create`](Self::create) is a pure function; the returned pool has
/// zero reserves and zero shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultPoolFactory;

impl DefaultPoolFactory {
    /// Creates an empty pool from `config`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the configuration is
    ///   invalid or the curve's feature is not enabled.
    /// - Any error propagated from the pool's `from_config`.
    pub fn create(config: &PoolConfig) -> Result<PoolBox, AmmError> {
        config.validate()?;

        let pool = match config {
            #[cfg(feature = "classic")]
            PoolConfig::Classic(cfg) => {
                PoolBox::Classic(Box::new(crate::pools::ClassicPool::from_config(cfg)?))
            }

            #[cfg(feature = "stable")]
            PoolConfig::Stable(cfg) => {
                PoolBox::Stable(Box::new(crate::pools::StablePool::from_config(cfg)?))
            }

            #[allow(unreachable_patterns)]
            _ => {
                return Err(AmmError::InvalidConfiguration(
                    "requested curve is not enabled (missing feature flag)",
                ))
            }
        };
        debug!(kind = %config, address = %config.address(), "pool created");
        Ok(pool)
    }
}
