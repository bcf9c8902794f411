//! In-process token world.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};
use crate::traits::AssetHost;

/// A deterministic, in-memory [`AssetHost`].
///
/// Models ERC-20 style balances and allowances for any number of token
/// addresses, plain native-coin balances, and one wrapped-native token
/// whose contract address holds the native coin backing it.
///
/// Balances are created on first credit; zero entries are pruned.
///
/// # Examples
///
/// ```
/// use vault_amm::domain::{Address, Amount};
/// use vault_amm::host::InMemoryHost;
/// use vault_amm::traits::AssetHost;
///
/// let weth = Address::from_low_u64(0xeeee);
/// let alice = Address::from_low_u64(1);
/// let mut host = InMemoryHost::new(weth);
///
/// host.fund_native(alice, Amount::new(10)).expect("fits");
/// host.wrap_native(alice, Amount::new(4)).expect("enough native");
/// assert_eq!(host.token_balance(weth, alice), Amount::new(4));
/// assert_eq!(host.native_balance(alice), Amount::new(6));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    wrapped_native: Address,
    tokens: BTreeMap<(Address, Address), Amount>,
    allowances: BTreeMap<(Address, Address, Address), Amount>,
    native: BTreeMap<Address, Amount>,
}

fn credit(
    map: &mut BTreeMap<(Address, Address), Amount>,
    key: (Address, Address),
    amount: Amount,
) -> Result<()> {
    let current = map.get(&key).copied().unwrap_or_default();
    let next = current
        .checked_add(&amount)
        .ok_or(AmmError::Overflow("host token balance overflow"))?;
    if !next.is_zero() {
        map.insert(key, next);
    }
    Ok(())
}

impl InMemoryHost {
    /// Creates an empty world whose wrapped-native token lives at
    /// `wrapped_native`.
    #[must_use]
    pub fn new(wrapped_native: Address) -> Self {
        Self {
            wrapped_native,
            ..Self::default()
        }
    }

    /// Mints `amount` of `token` out of thin air for `owner`.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the balance would exceed `u128`.
    pub fn mint(&mut self, token: Address, owner: Address, amount: Amount) -> Result<()> {
        credit(&mut self.tokens, (token, owner), amount)
    }

    /// Credits `owner` with native coin.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the balance would exceed `u128`.
    pub fn fund_native(&mut self, owner: Address, amount: Amount) -> Result<()> {
        let current = self.native_balance(owner);
        let next = current
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("host native balance overflow"))?;
        self.native.insert(owner, next);
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s `token`.
    pub fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(token, owner, spender));
        } else {
            self.allowances.insert((token, owner, spender), amount);
        }
    }

    /// Remaining allowance.
    #[must_use]
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Total supply of `token` across all holders.
    #[must_use]
    pub fn total_supply(&self, token: Address) -> Amount {
        self.tokens
            .iter()
            .filter(|((t, _), _)| *t == token)
            .fold(Amount::ZERO, |acc, (_, v)| {
                acc.checked_add(v).unwrap_or(Amount::MAX)
            })
    }

    fn debit_token(&mut self, token: Address, owner: Address, amount: Amount) -> Result<()> {
        let current = self.token_balance(token, owner);
        let next = current
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        if next.is_zero() {
            self.tokens.remove(&(token, owner));
        } else {
            self.tokens.insert((token, owner), next);
        }
        Ok(())
    }

    fn debit_native(&mut self, owner: Address, amount: Amount) -> Result<()> {
        let next = self
            .native_balance(owner)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        if next.is_zero() {
            self.native.remove(&owner);
        } else {
            self.native.insert(owner, next);
        }
        Ok(())
    }
}

impl AssetHost for InMemoryHost {
    fn wrapped_native(&self) -> Address {
        self.wrapped_native
    }

    fn token_balance(&self, token: Address, owner: Address) -> Amount {
        self.tokens.get(&(token, owner)).copied().unwrap_or_default()
    }

    fn native_balance(&self, owner: Address) -> Amount {
        self.native.get(&owner).copied().unwrap_or_default()
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        if self.token_balance(token, from) < amount {
            return Err(AmmError::InsufficientBalance);
        }
        if from == to {
            return Ok(());
        }
        self.debit_token(token, from, amount)?;
        credit(&mut self.tokens, (token, to), amount)
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let allowance = self.allowance(token, from, spender);
        let Some(remaining) = allowance.checked_sub(&amount) else {
            return Err(AmmError::TransferFromFailed);
        };
        if self.token_balance(token, from) < amount {
            return Err(AmmError::TransferFromFailed);
        }
        self.transfer(token, from, to, amount)
            .map_err(|_| AmmError::TransferFromFailed)?;
        if allowance != Amount::MAX {
            self.approve(token, from, spender, remaining);
        }
        Ok(())
    }

    fn send_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        self.debit_native(from, amount)?;
        self.fund_native(to, amount)
    }

    fn wrap_native(&mut self, owner: Address, amount: Amount) -> Result<()> {
        let weth = self.wrapped_native;
        self.send_native(owner, weth, amount)?;
        credit(&mut self.tokens, (weth, owner), amount)
    }

    fn unwrap_native(&mut self, owner: Address, amount: Amount) -> Result<()> {
        let weth = self.wrapped_native;
        if self.token_balance(weth, owner) < amount || self.native_balance(weth) < amount {
            return Err(AmmError::InsufficientBalance);
        }
        self.debit_token(weth, owner, amount)?;
        self.send_native(weth, owner, amount)
    }
}
