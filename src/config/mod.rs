//! Pool and fee configuration.
//!
//! This module contains the [`PoolConfig`] enum (the declarative
//! blueprint for creating any pool) along with the per-curve config
//! structs and the [`FeeConfig`] fee schedule.

mod classic;
mod fee_config;
mod pool_config;
mod stable;

pub use classic::ClassicPoolConfig;
pub use fee_config::FeeConfig;
pub use pool_config::PoolConfig;
pub use stable::{StablePoolConfig, DEFAULT_AMPLIFICATION};
