use serde::{Deserialize, Serialize};

use super::pair::PairState;
use crate::domain::{Address, Amount, CurveKind};

/// Persisted layout of a pool.
///
/// Share balances are not included; they live in the pool's
/// [`ShareLedger`](super::ShareLedger), which serializes on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    /// Pool address.
    pub address: Address,
    /// Pricing curve.
    pub curve: CurveKind,
    /// Lower-addressed token.
    pub token0: Address,
    /// Higher-addressed token.
    pub token1: Address,
    /// Cached reserve of `token0`.
    pub reserve0: Amount,
    /// Cached reserve of `token1`.
    pub reserve1: Amount,
    /// Outstanding shares.
    pub total_shares: Amount,
    /// Protocol-fee baseline.
    pub invariant_last: Amount,
    /// `10^(18 − decimals0)`; one for classic pools.
    pub precision_multiplier0: u128,
    /// `10^(18 − decimals1)`; one for classic pools.
    pub precision_multiplier1: u128,
    /// Amplification, stable pools only.
    pub amplification: Option<u128>,
}

impl PoolRecord {
    pub(crate) fn from_state(
        state: &PairState,
        curve: CurveKind,
        multipliers: (u128, u128),
        amplification: Option<u128>,
    ) -> Self {
        Self {
            address: state.address,
            curve,
            token0: state.pair.token0(),
            token1: state.pair.token1(),
            reserve0: state.reserve0,
            reserve1: state.reserve1,
            total_shares: state.shares.total_supply(),
            invariant_last: state.invariant_last,
            precision_multiplier0: multipliers.0,
            precision_multiplier1: multipliers.1,
            amplification,
        }
    }
}
