//! Enum dispatch wrapper for all pool curves.
//!
//! [`PoolBox`] wraps every concrete pool behind a single enum so that
//! heterogeneous collections work without trait objects; [`Pool`]'s
//! operations are generic and therefore not object safe.

#[cfg(feature = "classic")]
use super::classic::ClassicPool;
#[cfg(feature = "stable")]
use super::stable::StablePool;

use super::{PoolRecord, ShareLedger};
use crate::domain::{Address, Amount, BurnOutcome, CurveKind, MintOutcome, SwapOutcome, TokenPair};
use crate::error::Result;
use crate::traits::{BalanceVault, FeeSource, Pool};

/// Static-dispatch enum over the enabled pool curves.
///
/// Each variant is feature-gated behind its curve's Cargo feature.
///
/// # Example
///
/// ```text
/// let pool = PoolBox::Classic(Box::new(classic_pool));
/// let pair = pool.token_pair();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolBox {
    /// Constant-product pool.
    #[cfg(feature = "classic")]
    Classic(Box<ClassicPool>),

    /// StableSwap pool.
    #[cfg(feature = "stable")]
    Stable(Box<StablePool>),
}

/// Generates a match arm per enabled variant, calling the same method on
/// the inner pool.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            #[cfg(feature = "classic")]
            PoolBox::Classic(p) => p.$method($($arg),*),
            #[cfg(feature = "stable")]
            PoolBox::Stable(p) => p.$method($($arg),*),
        }
    };
}

#[cfg(feature = "classic")]
impl From<ClassicPool> for PoolBox {
    fn from(pool: ClassicPool) -> Self {
        Self::Classic(Box::new(pool))
    }
}

#[cfg(feature = "stable")]
impl From<StablePool> for PoolBox {
    fn from(pool: StablePool) -> Self {
        Self::Stable(Box::new(pool))
    }
}

impl Pool for PoolBox {
    fn address(&self) -> Address {
        delegate!(self, address())
    }

    fn curve(&self) -> CurveKind {
        delegate!(self, curve())
    }

    fn token_pair(&self) -> &TokenPair {
        delegate!(self, token_pair())
    }

    fn reserves(&self) -> (Amount, Amount) {
        delegate!(self, reserves())
    }

    fn invariant_last(&self) -> Amount {
        delegate!(self, invariant_last())
    }

    fn shares(&self) -> &ShareLedger {
        delegate!(self, shares())
    }

    fn transfer_shares(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        delegate!(self, transfer_shares(from, to, amount))
    }

    fn approve_shares(&mut self, owner: Address, spender: Address, amount: Amount) {
        delegate!(self, approve_shares(owner, spender, amount));
    }

    fn transfer_shares_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        delegate!(self, transfer_shares_from(spender, from, to, amount))
    }

    fn mint<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<MintOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized,
    {
        delegate!(self, mint(vault, fees, sender, data))
    }

    fn burn<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<BurnOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized,
    {
        delegate!(self, burn(vault, fees, sender, data))
    }

    fn burn_single<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<BurnOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized,
    {
        delegate!(self, burn_single(vault, fees, sender, data))
    }

    fn swap<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<SwapOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized,
    {
        delegate!(self, swap(vault, fees, sender, data))
    }

    fn get_amount_out<F>(
        &self,
        fees: &F,
        sender: Address,
        token_in: Address,
        amount_in: Amount,
    ) -> Result<Amount>
    where
        F: FeeSource + ?Sized,
    {
        delegate!(self, get_amount_out(fees, sender, token_in, amount_in))
    }

    fn record(&self) -> PoolRecord {
        delegate!(self, record())
    }
}
