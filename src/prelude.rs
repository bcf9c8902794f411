//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use vault_amm::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, Asset, BurnData, BurnOutcome, BurnSingleData, CurveKind, Decimals, FeeRate,
    MintData, MintOutcome, PoolId, SwapData, SwapOutcome, TokenPair, WithdrawMode,
};

pub use crate::traits::{AssetHost, BalanceVault, FeeSource, FromConfig, Pool};

pub use crate::config::{ClassicPoolConfig, FeeConfig, PoolConfig, StablePoolConfig};

pub use crate::error::{AmmError, Result};

pub use crate::factory::DefaultPoolFactory;

pub use crate::host::InMemoryHost;
pub use crate::pools::{PoolBox, PoolRecord, ShareLedger, MINIMUM_LIQUIDITY};
pub use crate::vault::{Vault, VaultRecord};
