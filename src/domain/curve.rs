//! Pool curve identity.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Address;

/// The pricing curve a pool was deployed with.
///
/// Fixed for the lifetime of a pool; never switched at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    /// Constant product, `x · y = k`.
    Classic,
    /// Two-asset StableSwap.
    Stable,
}

impl CurveKind {
    /// Numeric pool type: 1 for classic, 2 for stable.
    #[must_use]
    pub const fn pool_type(&self) -> u16 {
        match self {
            Self::Classic => 1,
            Self::Stable => 2,
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Identifies a pool to a [`FeeSource`](crate::traits::FeeSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolId {
    /// The pool's own address (its vault ledger owner).
    pub address: Address,
    /// The pool's curve.
    pub curve: CurveKind,
}

impl PoolId {
    /// Creates a pool identifier.
    #[must_use]
    pub const fn new(address: Address, curve: CurveKind) -> Self {
        Self { address, curve }
    }
}
