//! Pool instantiation from declarative configuration.
//!
//! [`DefaultPoolFactory`] turns a [`PoolConfig`] into an empty
//! [`PoolBox`], validating the configuration and dispatching to the
//! curve's [`FromConfig`] implementation.
//!
//! ```rust
//! use vault_amm::config::{ClassicPoolConfig, PoolConfig};
//! use vault_amm::domain::Address;
//! use vault_amm::factory::DefaultPoolFactory;
//! use vault_amm::traits::Pool;
//!
//! let cfg = ClassicPoolConfig::new(
//!     Address::from_low_u64(0xc1),
//!     Address::from_low_u64(0xb),
//!     Address::from_low_u64(0xa),
//! )
//! .expect("valid config");
//!
//! let pool = DefaultPoolFactory::create(&PoolConfig::Classic(cfg)).expect("pool created");
//! assert_eq!(pool.token_pair().token0(), Address::from_low_u64(0xa));
//! ```
//!
//! # Feature Gating
//!
//! A config variant whose curve feature is disabled yields
//! [`AmmError::InvalidConfiguration`].
//!
//! [`PoolConfig`]: crate::config::PoolConfig
//! [`PoolBox`]: crate::pools::PoolBox
//! [`FromConfig`]: crate::traits::FromConfig
//! [`AmmError::InvalidConfiguration`]: crate::error::AmmError::InvalidConfiguration

mod default_factory;

pub use default_factory::DefaultPoolFactory;
