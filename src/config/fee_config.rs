//! Static fee schedule.
//!
//! [`FeeConfig`] is the crate's own [`FeeSource`]: per-curve default swap
//! and protocol fees, optional per-pool overrides, and an optional fee
//! recipient.  Swap fees do not vary by sender, direction or call data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Address, CurveKind, FeeRate, PoolId};
use crate::error::AmmError;
use crate::traits::FeeSource;

const fn rate(value: u32) -> FeeRate {
    match FeeRate::new(value) {
        Ok(rate) => rate,
        Err(_) => FeeRate::MAX,
    }
}

/// Fee schedule keyed by curve, with per-pool overrides.
///
/// # Defaults
///
/// | Fee | Classic | Stable |
/// |-----|---------|--------|
/// | swap | 300 (0.3%) | 100 (0.1%) |
/// | protocol | 50 000 (50%) | 50 000 (50%) |
///
/// No fee recipient is set by default, which keeps protocol-fee minting
/// off.
///
/// # Example
///
/// ```rust
/// use vault_amm::config::FeeConfig;
/// use vault_amm::domain::{Address, CurveKind, PoolId};
/// use vault_amm::traits::FeeSource;
///
/// let fees = FeeConfig::default().with_fee_recipient(Address::from_low_u64(0xfee));
/// let pool = PoolId::new(Address::from_low_u64(0xc1), CurveKind::Classic);
/// assert_eq!(fees.swap_fee(pool, Address::ZERO, None, None, &[]).get(), 300);
/// assert_eq!(fees.fee_recipient(), Some(Address::from_low_u64(0xfee)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    classic_swap_fee: FeeRate,
    stable_swap_fee: FeeRate,
    protocol_fee: FeeRate,
    #[serde(default)]
    swap_fee_overrides: BTreeMap<Address, FeeRate>,
    #[serde(default)]
    protocol_fee_overrides: BTreeMap<Address, FeeRate>,
    #[serde(default)]
    fee_recipient: Option<Address>,
}

impl FeeConfig {
    /// Default classic swap fee: 0.3%.
    pub const DEFAULT_CLASSIC_SWAP_FEE: FeeRate = rate(300);

    /// Default stable swap fee: 0.1%.
    pub const DEFAULT_STABLE_SWAP_FEE: FeeRate = rate(100);

    /// Default protocol share of invariant growth: 50%.
    pub const DEFAULT_PROTOCOL_FEE: FeeRate = rate(50_000);

    /// Creates a schedule with explicit defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `fee_recipient` is
    /// the zero address.
    pub fn new(
        classic_swap_fee: FeeRate,
        stable_swap_fee: FeeRate,
        protocol_fee: FeeRate,
        fee_recipient: Option<Address>,
    ) -> Result<Self, AmmError> {
        let config = Self {
            classic_swap_fee,
            stable_swap_fee,
            protocol_fee,
            swap_fee_overrides: BTreeMap::new(),
            protocol_fee_overrides: BTreeMap::new(),
            fee_recipient,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// Rates are bounded by [`FeeRate`] itself.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the fee recipient is
    /// the zero address.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.fee_recipient.is_some_and(|r| r.is_zero()) {
            return Err(AmmError::InvalidConfiguration(
                "fee recipient must be non-zero; use None to disable",
            ));
        }
        Ok(())
    }

    /// Returns `self` with `recipient` receiving protocol fees.
    #[must_use]
    pub fn with_fee_recipient(mut self, recipient: Address) -> Self {
        self.fee_recipient = (!recipient.is_zero()).then_some(recipient);
        self
    }

    /// Sets or clears the fee recipient.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] for the zero address.
    pub fn set_fee_recipient(&mut self, recipient: Option<Address>) -> Result<(), AmmError> {
        if recipient.is_some_and(|r| r.is_zero()) {
            return Err(AmmError::InvalidConfiguration(
                "fee recipient must be non-zero; use None to disable",
            ));
        }
        self.fee_recipient = recipient;
        Ok(())
    }

    /// Overrides the swap fee of one pool.
    pub fn set_swap_fee_override(&mut self, pool: Address, fee: FeeRate) {
        self.swap_fee_overrides.insert(pool, fee);
    }

    /// Overrides the protocol fee of one pool.
    pub fn set_protocol_fee_override(&mut self, pool: Address, fee: FeeRate) {
        self.protocol_fee_overrides.insert(pool, fee);
    }

    /// Removes both overrides for `pool`.
    pub fn clear_overrides(&mut self, pool: Address) {
        self.swap_fee_overrides.remove(&pool);
        self.protocol_fee_overrides.remove(&pool);
    }

    /// Default swap fee for `curve`.
    #[must_use]
    pub const fn default_swap_fee(&self, curve: CurveKind) -> FeeRate {
        match curve {
            CurveKind::Classic => self.classic_swap_fee,
            CurveKind::Stable => self.stable_swap_fee,
        }
    }
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            classic_swap_fee: Self::DEFAULT_CLASSIC_SWAP_FEE,
            stable_swap_fee: Self::DEFAULT_STABLE_SWAP_FEE,
            protocol_fee: Self::DEFAULT_PROTOCOL_FEE,
            swap_fee_overrides: BTreeMap::new(),
            protocol_fee_overrides: BTreeMap::new(),
            fee_recipient: None,
        }
    }
}

impl FeeSource for FeeConfig {
    fn swap_fee(
        &self,
        pool: PoolId,
        _sender: Address,
        _token_in: Option<Address>,
        _token_out: Option<Address>,
        _data: &[u8],
    ) -> FeeRate {
        self.swap_fee_overrides
            .get(&pool.address)
            .copied()
            .unwrap_or_else(|| self.default_swap_fee(pool.curve))
    }

    fn protocol_fee(&self, pool: PoolId) -> FeeRate {
        self.protocol_fee_overrides
            .get(&pool.address)
            .copied()
            .unwrap_or(self.protocol_fee)
    }

    fn fee_recipient(&self) -> Option<Address> {
        self.fee_recipient
    }
}
