//! The vault surface pools depend on.
//!
//! Pools hold entitlements, not tokens.  Everything they know about their
//! own holdings comes from [`BalanceVault::balance_of`], and everything
//! they pay out goes through [`BalanceVault::transfer`] or
//! [`BalanceVault::withdraw_alternative`] with the pool as caller.
//! Depending on this trait instead of [`Vault`](crate::vault::Vault)
//! lets pools run against mocks.

use crate::domain::{Address, Amount, Asset, WithdrawMode};
use crate::error::Result;

/// Ledger operations a pool performs against its custodian.
pub trait BalanceVault {
    /// Ledger balance of `owner` for `asset`.
    fn balance_of(&self, asset: Asset, owner: Address) -> Amount;

    /// Moves `amount` of `caller`'s ledger balance to `to`.
    ///
    /// Zero amounts succeed without touching any entry.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `caller` holds less than `amount`.
    fn transfer(&mut self, caller: Address, asset: Asset, to: Address, amount: Amount)
        -> Result<()>;

    /// Pays `amount` of `caller`'s balance to `to` according to `mode`.
    ///
    /// [`WithdrawMode::Vault`] is a ledger transfer; the other modes leave
    /// the vault.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `caller` holds less than `amount`, or any host failure while
    /// sending.
    fn withdraw_alternative(
        &mut self,
        caller: Address,
        asset: Asset,
        to: Address,
        amount: Amount,
        mode: WithdrawMode,
    ) -> Result<()>;
}
