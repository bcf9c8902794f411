//! Top-level pool configuration enum.
//!
//! [`PoolConfig`] is the declarative blueprint the factory matches on:
//!
//! ```text
//! match config {
//!     PoolConfig::Classic(cfg) => ClassicPool::from_config(&cfg),
//!     PoolConfig::Stable(cfg)  => StablePool::from_config(&cfg),
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{ClassicPoolConfig, StablePoolConfig};
use crate::domain::{Address, CurveKind, TokenPair};
use crate::error::AmmError;

/// Configuration for any supported pool curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolConfig {
    /// Constant-product pool.
    Classic(ClassicPoolConfig),
    /// StableSwap pool.
    Stable(StablePoolConfig),
}

impl PoolConfig {
    /// Validates the inner configuration.
    ///
    /// # Errors
    ///
    /// Returns the same [`AmmError`] the inner config's `validate()` would.
    pub fn validate(&self) -> Result<(), AmmError> {
        match self {
            Self::Classic(cfg) => cfg.validate(),
            Self::Stable(cfg) => cfg.validate(),
        }
    }

    /// Returns `true` for [`Classic`](Self::Classic).
    #[must_use]
    pub const fn is_classic(&self) -> bool {
        matches!(self, Self::Classic(_))
    }

    /// Returns `true` for [`Stable`](Self::Stable).
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::Stable(_))
    }

    /// The curve this config builds.
    #[must_use]
    pub const fn curve(&self) -> CurveKind {
        match self {
            Self::Classic(_) => CurveKind::Classic,
            Self::Stable(_) => CurveKind::Stable,
        }
    }

    /// The pool address.
    #[must_use]
    pub const fn address(&self) -> Address {
        match self {
            Self::Classic(cfg) => cfg.address(),
            Self::Stable(cfg) => cfg.address(),
        }
    }

    /// The sorted token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        match self {
            Self::Classic(cfg) => cfg.token_pair(),
            Self::Stable(cfg) => cfg.token_pair(),
        }
    }
}

impl From<ClassicPoolConfig> for PoolConfig {
    fn from(config: ClassicPoolConfig) -> Self {
        Self::Classic(config)
    }
}

impl From<StablePoolConfig> for PoolConfig {
    fn from(config: StablePoolConfig) -> Self {
        Self::Stable(config)
    }
}

impl core::fmt::Display for PoolConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Classic(_) => write!(f, "Classic"),
            Self::Stable(_) => write!(f, "Stable"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Decimals;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    fn classic() -> PoolConfig {
        let Ok(cfg) = ClassicPoolConfig::new(addr(0xc1), addr(1), addr(2)) else {
            panic!("expected Ok");
        };
        cfg.into()
    }

    fn stable() -> PoolConfig {
        let Ok(cfg) = StablePoolConfig::with_default_amplification(
            addr(0x51),
            (addr(1), Decimals::MAX),
            (addr(2), Decimals::MAX),
        ) else {
            panic!("expected Ok");
        };
        cfg.into()
    }

    #[test]
    fn classic_variant() {
        let cfg = classic();
        assert!(cfg.is_classic());
        assert!(!cfg.is_stable());
        assert_eq!(cfg.curve(), CurveKind::Classic);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.to_string(), "Classic");
    }

    #[test]
    fn stable_variant() {
        let cfg = stable();
        assert!(cfg.is_stable());
        assert_eq!(cfg.address(), addr(0x51));
        assert_eq!(cfg.token_pair().token0(), addr(1));
        assert_eq!(cfg.to_string(), "Stable");
    }

    #[test]
    fn serde_round_trip() {
        let cfg = stable();
        let Ok(json) = serde_json::to_string(&cfg) else {
            panic!("serialize");
        };
        let Ok(back) = serde_json::from_str::<PoolConfig>(&json) else {
            panic!("deserialize");
        };
        assert_eq!(back, cfg);
    }
}
