//! The pool share token.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};

/// ERC-20 style share balances and allowances for one pool.
///
/// `total_supply` always equals the sum of all balances, including the
/// minimum liquidity locked at [`Address::ZERO`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLedger {
    total_supply: Amount,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<Address, BTreeMap<Address, Amount>>,
}

impl ShareLedger {
    /// An empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding shares.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: Address) -> Amount {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    /// Remaining allowance of `spender` over `owner`'s shares.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&owner)
            .and_then(|spenders| spenders.get(&spender))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of every holder's balance.
    #[must_use]
    pub fn holders_sum(&self) -> Amount {
        self.balances
            .values()
            .fold(Amount::ZERO, |acc, v| acc.checked_add(v).unwrap_or(Amount::MAX))
    }

    /// Creates `amount` new shares for `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the supply would exceed `u128`.
    pub(crate) fn mint(&mut self, to: Address, amount: Amount) -> Result<()> {
        let supply = self
            .total_supply
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("share supply overflow"))?;
        let balance = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("share balance overflow"))?;
        self.total_supply = supply;
        self.set_balance(to, balance);
        Ok(())
    }

    /// Destroys `amount` of `from`'s shares.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if `from` holds fewer shares.
    pub(crate) fn burn(&mut self, from: Address, amount: Amount) -> Result<()> {
        let balance = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        let supply = self
            .total_supply
            .checked_sub(&amount)
            .ok_or(AmmError::Overflow("share supply underflow"))?;
        self.total_supply = supply;
        self.set_balance(from, balance);
        Ok(())
    }

    /// Moves shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if `from` holds fewer than `amount`.
    pub fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        let from_balance = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        if from == to || amount.is_zero() {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("share balance overflow"))?;
        self.set_balance(from, from_balance);
        self.set_balance(to, to_balance);
        Ok(())
    }

    /// Sets the allowance of `spender` over `owner`'s shares.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            if let Some(spenders) = self.allowances.get_mut(&owner) {
                spenders.remove(&spender);
                if spenders.is_empty() {
                    self.allowances.remove(&owner);
                }
            }
        } else {
            self.allowances
                .entry(owner)
                .or_default()
                .insert(spender, amount);
        }
    }

    /// Moves shares on behalf of `from`.  An allowance of [`Amount::MAX`]
    /// is never decreased.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if the allowance is short.
    /// - [`AmmError::InsufficientBalance`] if `from` holds fewer shares.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let allowance = self.allowance(from, spender);
        let remaining = allowance
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientAllowance)?;
        self.transfer(from, to, amount)?;
        if allowance != Amount::MAX {
            self.approve(from, spender, remaining);
        }
        Ok(())
    }

    fn set_balance(&mut self, owner: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&owner);
        } else {
            self.balances.insert(owner, amount);
        }
    }
}
