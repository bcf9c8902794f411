//! Core trait abstractions.
//!
//! - [`Pool`]: the mint / burn / burn-single / swap surface every curve
//!   implements.
//! - [`BalanceVault`]: what a pool needs from its custodian.
//! - [`AssetHost`]: what the vault needs from the outside world.
//! - [`FeeSource`]: the external fee-rate collaborator.
//! - [`FromConfig`]: configuration-driven pool construction.

mod asset_host;
mod balance_vault;
mod fee_source;
mod from_config;
mod pool;

pub use asset_host::AssetHost;
pub use balance_vault::BalanceVault;
pub use fee_source::FeeSource;
pub use from_config::FromConfig;
pub use pool::Pool;
