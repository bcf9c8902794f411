//! The custodial balance ledger.
//!
//! The vault is the only component that holds real tokens.  Everyone else,
//! pools included, owns ledger entries keyed by `(token, owner)`.
//!
//! # Deposit Detection
//!
//! The vault tracks, per token, the total it has credited (its *reserve*).
//! A deposit credits the difference between what the vault actually holds
//! and that reserve, so tokens sent with a plain transfer become
//! claimable by whoever calls [`Vault::deposit`] first.
//!
//! ```text
//! credited = host.token_balance(token, vault) − reserve(token)
//! ```
//!
//! # Native Coin
//!
//! Native coin is wrapped on the way in and unwrapped on the way out.
//! [`Asset::Native`] and the wrapped-native token therefore resolve to the
//! same ledger entry.
//!
//! # Conservation
//!
//! For every token, `sum(ledger) == reserve <= held`.  The gap is tokens
//! sent to the vault but not yet deposited.

mod record;

use std::collections::BTreeMap;

use tracing::debug;

pub use record::VaultRecord;

use crate::domain::{Address, Amount, Asset, WithdrawMode};
use crate::error::{AmmError, Result};
use crate::host::InMemoryHost;
use crate::traits::{AssetHost, BalanceVault};

/// A ledger of token entitlements over the holdings of one address.
///
/// Generic over the [`AssetHost`] that keeps real balances.
///
/// # Example
///
/// ```rust
/// use vault_amm::domain::{Address, Amount, Asset};
/// use vault_amm::host::InMemoryHost;
/// use vault_amm::vault::Vault;
///
/// let weth  = Address::from_low_u64(0xeeee);
/// let token = Address::from_low_u64(0x70);
/// let alice = Address::from_low_u64(1);
/// let vault_addr = Address::from_low_u64(0xfa);
///
/// let mut vault = Vault::new(vault_addr, InMemoryHost::new(weth));
/// vault.host_mut().mint(token, vault_addr, Amount::new(500)).expect("fits");
///
/// let credited = vault
///     .deposit(alice, Asset::Token(token), alice, Amount::ZERO)
///     .expect("net deposit");
/// assert_eq!(credited, Amount::new(500));
/// assert_eq!(vault.balance_of(Asset::Token(token), alice), Amount::new(500));
/// ```
#[derive(Debug, Clone)]
pub struct Vault<H: AssetHost = InMemoryHost> {
    address: Address,
    host: H,
    balances: BTreeMap<(Address, Address), Amount>,
    reserves: BTreeMap<Address, Amount>,
}

impl<H: AssetHost> Vault<H> {
    /// Creates an empty vault living at `address`.
    pub fn new(address: Address, host: H) -> Self {
        Self {
            address,
            host,
            balances: BTreeMap::new(),
            reserves: BTreeMap::new(),
        }
    }

    /// The vault's own address on the host.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Read access to the host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, for moving tokens outside the vault.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Ledger token backing `asset`.
    fn resolve(&self, asset: Asset) -> Address {
        match asset {
            Asset::Native => self.host.wrapped_native(),
            Asset::Token(token) => token,
        }
    }

    /// Total credited for `asset` across all owners.
    #[must_use]
    pub fn reserve_of(&self, asset: Asset) -> Amount {
        let token = self.resolve(asset);
        self.reserves.get(&token).copied().unwrap_or_default()
    }

    /// Real holdings of `asset` on the host.
    #[must_use]
    pub fn held(&self, asset: Asset) -> Amount {
        self.host.token_balance(self.resolve(asset), self.address)
    }

    /// Credits `recipient` with any unaccounted holdings of `asset`.
    ///
    /// `value` is native coin attached by `caller`; it is only accepted
    /// with [`Asset::Native`], where it is pulled from `caller` and wrapped
    /// together with any loose native coin the vault already holds.
    ///
    /// Returns the amount credited.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NoNetDeposit`] if nothing new is held.
    /// - [`AmmError::InvalidAsset`] if `value` is attached to a token deposit.
    /// - [`AmmError::InsufficientBalance`] if `caller` lacks the attached value.
    pub fn deposit(
        &mut self,
        caller: Address,
        asset: Asset,
        recipient: Address,
        value: Amount,
    ) -> Result<Amount> {
        if !asset.is_native() && !value.is_zero() {
            return Err(AmmError::InvalidAsset("native value attached to token deposit"));
        }
        let token = self.resolve(asset);
        if asset.is_native() {
            let loose = self
                .host
                .native_balance(self.address)
                .checked_add(&value)
                .ok_or(AmmError::Overflow("native deposit overflow"))?;
            if loose.is_zero() && self.unaccounted(token).is_zero() {
                return Err(AmmError::NoNetDeposit);
            }
            if !value.is_zero() {
                self.host.send_native(caller, self.address, value)?;
            }
            if !loose.is_zero() {
                self.host.wrap_native(self.address, loose)?;
            }
        }
        self.credit_unaccounted(token, recipient)
    }

    /// Pulls `amount` of `asset` from `caller` and credits `recipient`.
    ///
    /// `caller` must have approved the vault.  For [`Asset::Native`] the
    /// amount is taken as attached native coin.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TransferFromFailed`] if allowance or balance is short.
    /// - [`AmmError::NoNetDeposit`] for a zero amount.
    pub fn transfer_and_deposit(
        &mut self,
        caller: Address,
        asset: Asset,
        recipient: Address,
        amount: Amount,
    ) -> Result<Amount> {
        match asset {
            Asset::Native => self
                .deposit(caller, asset, recipient, amount)
                .map_err(|e| match e {
                    AmmError::InsufficientBalance => AmmError::TransferFromFailed,
                    other => other,
                }),
            Asset::Token(token) => {
                self.host
                    .transfer_from(token, self.address, caller, self.address, amount)
                    .map_err(|_| AmmError::TransferFromFailed)?;
                self.credit_unaccounted(token, recipient)
            }
        }
    }

    /// Credits `sender` with native coin sent to the vault without a call.
    ///
    /// # Errors
    ///
    /// As [`deposit`](Self::deposit) with [`Asset::Native`].
    pub fn receive_native(&mut self, sender: Address, value: Amount) -> Result<Amount> {
        self.deposit(sender, Asset::Native, sender, value)
    }

    /// Moves `amount` of `caller`'s balance to `to` inside the ledger.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if `caller` holds less than `amount`.
    pub fn transfer(
        &mut self,
        caller: Address,
        asset: Asset,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let token = self.resolve(asset);
        let from_balance = self.ledger(token, caller);
        let remaining = from_balance
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        if caller == to {
            return Ok(());
        }
        let to_balance = self
            .ledger(token, to)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("vault ledger overflow"))?;

        self.set_ledger(token, caller, remaining);
        self.set_ledger(token, to, to_balance);
        debug!(%token, from = %caller, %to, %amount, "vault transfer");
        Ok(())
    }

    /// Debits `caller` and sends `amount` of `asset` out of the vault to `to`.
    ///
    /// [`Asset::Native`] is unwrapped and sent as native coin; any token,
    /// including the wrapped-native token, is sent as-is.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if `caller` holds less than `amount`.
    pub fn withdraw(
        &mut self,
        caller: Address,
        asset: Asset,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let token = self.resolve(asset);
        let remaining = self
            .ledger(token, caller)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        let reserve = self
            .reserves
            .get(&token)
            .copied()
            .unwrap_or_default()
            .checked_sub(&amount)
            .ok_or(AmmError::Overflow("vault reserve underflow"))?;
        if amount.is_zero() {
            return Ok(());
        }

        match asset {
            Asset::Native => {
                self.host.unwrap_native(self.address, amount)?;
                self.host.send_native(self.address, to, amount)?;
            }
            Asset::Token(_) => self.host.transfer(token, self.address, to, amount)?,
        }

        self.set_ledger(token, caller, remaining);
        self.set_reserve(token, reserve);
        debug!(%token, from = %caller, %to, %amount, native = asset.is_native(), "vault withdraw");
        Ok(())
    }

    /// Pays out according to a pool's [`WithdrawMode`].
    ///
    /// - `Vault`: ledger transfer.
    /// - `Unwrapped`: native coin if `asset` is wrapped-native, else the token.
    /// - `Wrapped`: the token as held.
    ///
    /// # Errors
    ///
    /// As [`transfer`](Self::transfer) / [`withdraw`](Self::withdraw).
    pub fn withdraw_alternative(
        &mut self,
        caller: Address,
        asset: Asset,
        to: Address,
        amount: Amount,
        mode: WithdrawMode,
    ) -> Result<()> {
        let token = self.resolve(asset);
        match mode {
            WithdrawMode::Vault => self.transfer(caller, asset, to, amount),
            WithdrawMode::Unwrapped if token == self.host.wrapped_native() => {
                self.withdraw(caller, Asset::Native, to, amount)
            }
            WithdrawMode::Unwrapped | WithdrawMode::Wrapped => {
                self.withdraw(caller, Asset::Token(token), to, amount)
            }
        }
    }

    /// Ledger balance of `owner` for `asset`.
    #[must_use]
    pub fn balance_of(&self, asset: Asset, owner: Address) -> Amount {
        self.ledger(self.resolve(asset), owner)
    }

    /// Every non-zero ledger entry, ordered by `(token, owner)`.
    #[must_use]
    pub fn records(&self) -> Vec<VaultRecord> {
        self.balances
            .iter()
            .map(|((token, owner), balance)| VaultRecord {
                asset: Asset::Token(*token),
                owner: *owner,
                balance: *balance,
            })
            .collect()
    }

    /// Sum of all ledger entries for `asset`.
    #[must_use]
    pub fn ledger_total(&self, asset: Asset) -> Amount {
        let token = self.resolve(asset);
        self.balances
            .range((token, Address::ZERO)..)
            .take_while(|((t, _), _)| *t == token)
            .fold(Amount::ZERO, |acc, (_, v)| {
                acc.checked_add(v).unwrap_or(Amount::MAX)
            })
    }

    fn unaccounted(&self, token: Address) -> Amount {
        let held = self.host.token_balance(token, self.address);
        let reserve = self.reserves.get(&token).copied().unwrap_or_default();
        held.checked_sub(&reserve).unwrap_or(Amount::ZERO)
    }

    fn credit_unaccounted(&mut self, token: Address, recipient: Address) -> Result<Amount> {
        let amount = self.unaccounted(token);
        if amount.is_zero() {
            return Err(AmmError::NoNetDeposit);
        }
        let balance = self
            .ledger(token, recipient)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("vault ledger overflow"))?;
        let reserve = self.host.token_balance(token, self.address);

        self.set_ledger(token, recipient, balance);
        self.set_reserve(token, reserve);
        debug!(%token, %recipient, %amount, "vault deposit");
        Ok(amount)
    }

    fn ledger(&self, token: Address, owner: Address) -> Amount {
        self.balances
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    fn set_ledger(&mut self, token: Address, owner: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(token, owner));
        } else {
            self.balances.insert((token, owner), amount);
        }
    }

    fn set_reserve(&mut self, token: Address, amount: Amount) {
        self.reserves.insert(token, amount);
    }
}

impl<H: AssetHost> BalanceVault for Vault<H> {
    fn balance_of(&self, asset: Asset, owner: Address) -> Amount {
        Vault::balance_of(self, asset, owner)
    }

    fn transfer(
        &mut self,
        caller: Address,
        asset: Asset,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        Vault::transfer(self, caller, asset, to, amount)
    }

    fn withdraw_alternative(
        &mut self,
        caller: Address,
        asset: Asset,
        to: Address,
        amount: Amount,
        mode: WithdrawMode,
    ) -> Result<()> {
        Vault::withdraw_alternative(self, caller, asset, to, amount, mode)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const VAULT: Address = Address::from_low_u64(0xfa);
    const WETH: Address = Address::from_low_u64(0xeeee);
    const TOKEN: Address = Address::from_low_u64(0x70);
    const ALICE: Address = Address::from_low_u64(1);
    const BOB: Address = Address::from_low_u64(2);

    fn vault() -> Vault {
        Vault::new(VAULT, InMemoryHost::new(WETH))
    }

    fn funded() -> Vault {
        let mut v = vault();
        let Ok(()) = v.host_mut().mint(TOKEN, ALICE, Amount::new(1_000)) else {
            panic!("mint");
        };
        let Ok(()) = v.host_mut().fund_native(ALICE, Amount::new(1_000)) else {
            panic!("fund");
        };
        v
    }

    fn send_to_vault(v: &mut Vault, amount: u128) {
        let Ok(()) = v.host_mut().transfer(TOKEN, ALICE, VAULT, Amount::new(amount)) else {
            panic!("host transfer");
        };
    }

    fn assert_conserved(v: &Vault, asset: Asset) {
        assert_eq!(v.ledger_total(asset), v.reserve_of(asset));
        assert!(v.reserve_of(asset) <= v.held(asset));
    }

    // -- deposit -----------------------------------------------------------

    #[test]
    fn deposit_credits_detected_difference() {
        let mut v = funded();
        send_to_vault(&mut v, 300);
        let Ok(credited) = v.deposit(BOB, Asset::Token(TOKEN), ALICE, Amount::ZERO) else {
            panic!("deposit");
        };
        assert_eq!(credited, Amount::new(300));
        assert_eq!(v.balance_of(Asset::Token(TOKEN), ALICE), Amount::new(300));
        assert_eq!(v.reserve_of(Asset::Token(TOKEN)), Amount::new(300));
        assert_conserved(&v, Asset::Token(TOKEN));
    }

    #[test]
    fn deposit_without_new_holdings_fails() {
        let mut v = funded();
        send_to_vault(&mut v, 10);
        let Ok(_) = v.deposit(ALICE, Asset::Token(TOKEN), ALICE, Amount::ZERO) else {
            panic!("first deposit");
        };
        assert_eq!(
            v.deposit(ALICE, Asset::Token(TOKEN), ALICE, Amount::ZERO),
            Err(AmmError::NoNetDeposit)
        );
        assert_eq!(
            v.deposit(ALICE, Asset::Native, ALICE, Amount::ZERO),
            Err(AmmError::NoNetDeposit)
        );
    }

    #[test]
    fn deposit_rejects_value_with_token() {
        let mut v = funded();
        send_to_vault(&mut v, 10);
        assert!(matches!(
            v.deposit(ALICE, Asset::Token(TOKEN), ALICE, Amount::new(1)),
            Err(AmmError::InvalidAsset(_))
        ));
        assert_eq!(v.host().native_balance(ALICE), Amount::new(1_000));
        assert_eq!(v.reserve_of(Asset::Token(TOKEN)), Amount::ZERO);
    }

    #[test]
    fn native_deposit_wraps_and_shares_entry_with_weth() {
        let mut v = funded();
        let Ok(credited) = v.deposit(ALICE, Asset::Native, BOB, Amount::new(40)) else {
            panic!("native deposit");
        };
        assert_eq!(credited, Amount::new(40));
        assert_eq!(v.host().native_balance(ALICE), Amount::new(960));
        assert_eq!(v.held(Asset::Token(WETH)), Amount::new(40));
        assert_eq!(v.balance_of(Asset::Native, BOB), Amount::new(40));
        assert_eq!(v.balance_of(Asset::Token(WETH), BOB), Amount::new(40));
        assert_conserved(&v, Asset::Native);
    }

    #[test]
    fn native_deposit_short_of_value_changes_nothing() {
        let mut v = funded();
        assert_eq!(
            v.deposit(ALICE, Asset::Native, ALICE, Amount::new(1_001)),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(v.host().native_balance(ALICE), Amount::new(1_000));
        assert!(v.records().is_empty());
    }

    #[test]
    fn zero_value_native_deposit_sweeps_loose_coin() {
        let mut v = funded();
        let Ok(()) = v.host_mut().send_native(ALICE, VAULT, Amount::new(25)) else {
            panic!("send");
        };
        let Ok(credited) = v.deposit(BOB, Asset::Native, BOB, Amount::ZERO) else {
            panic!("sweep");
        };
        assert_eq!(credited, Amount::new(25));
        assert_eq!(v.host().native_balance(VAULT), Amount::ZERO);
        assert_eq!(v.balance_of(Asset::Native, BOB), Amount::new(25));
    }

    #[test]
    fn receive_native_credits_sender() {
        let mut v = funded();
        let Ok(credited) = v.receive_native(ALICE, Amount::new(7)) else {
            panic!("receive");
        };
        assert_eq!(credited, Amount::new(7));
        assert_eq!(v.balance_of(Asset::Native, ALICE), Amount::new(7));
    }

    // -- transfer_and_deposit ----------------------------------------------

    #[test]
    fn transfer_and_deposit_pulls_with_allowance() {
        let mut v = funded();
        v.host_mut().approve(TOKEN, ALICE, VAULT, Amount::new(500));
        let Ok(credited) =
            v.transfer_and_deposit(ALICE, Asset::Token(TOKEN), BOB, Amount::new(200))
        else {
            panic!("transfer_and_deposit");
        };
        assert_eq!(credited, Amount::new(200));
        assert_eq!(v.balance_of(Asset::Token(TOKEN), BOB), Amount::new(200));
        assert_eq!(v.host().allowance(TOKEN, ALICE, VAULT), Amount::new(300));
        assert_eq!(v.host().token_balance(TOKEN, ALICE), Amount::new(800));
    }

    #[test]
    fn transfer_and_deposit_without_allowance_fails() {
        let mut v = funded();
        assert_eq!(
            v.transfer_and_deposit(ALICE, Asset::Token(TOKEN), ALICE, Amount::new(1)),
            Err(AmmError::TransferFromFailed)
        );
        assert_eq!(v.host().token_balance(TOKEN, ALICE), Amount::new(1_000));
        assert_eq!(v.reserve_of(Asset::Token(TOKEN)), Amount::ZERO);
    }

    #[test]
    fn transfer_and_deposit_native_uses_value() {
        let mut v = funded();
        let Ok(credited) = v.transfer_and_deposit(ALICE, Asset::Native, ALICE, Amount::new(9))
        else {
            panic!("native pull");
        };
        assert_eq!(credited, Amount::new(9));
        assert_eq!(
            v.transfer_and_deposit(BOB, Asset::Native, BOB, Amount::new(1)),
            Err(AmmError::TransferFromFailed)
        );
    }

    // -- transfer ----------------------------------------------------------

    #[test]
    fn ledger_transfer_moves_balance() {
        let mut v = funded();
        send_to_vault(&mut v, 100);
        let Ok(_) = v.deposit(ALICE, Asset::Token(TOKEN), ALICE, Amount::ZERO) else {
            panic!("deposit");
        };
        let Ok(()) = v.transfer(ALICE, Asset::Token(TOKEN), BOB, Amount::new(60)) else {
            panic!("transfer");
        };
        assert_eq!(v.balance_of(Asset::Token(TOKEN), ALICE), Amount::new(40));
        assert_eq!(v.balance_of(Asset::Token(TOKEN), BOB), Amount::new(60));
        assert_eq!(
            v.transfer(ALICE, Asset::Token(TOKEN), BOB, Amount::new(41)),
            Err(AmmError::InsufficientBalance)
        );
        assert_conserved(&v, Asset::Token(TOKEN));
    }

    #[test]
    fn zero_transfer_is_noop() {
        let mut v = vault();
        let before = v.records();
        let Ok(()) = v.transfer(ALICE, Asset::Token(TOKEN), BOB, Amount::ZERO) else {
            panic!("zero transfer");
        };
        assert_eq!(v.records(), before);
    }

    // -- withdraw ----------------------------------------------------------

    #[test]
    fn withdraw_native_unwraps() {
        let mut v = funded();
        let Ok(_) = v.deposit(ALICE, Asset::Native, ALICE, Amount::new(100)) else {
            panic!("deposit");
        };
        let Ok(()) = v.withdraw(ALICE, Asset::Native, BOB, Amount::new(30)) else {
            panic!("withdraw");
        };
        assert_eq!(v.host().native_balance(BOB), Amount::new(30));
        assert_eq!(v.balance_of(Asset::Native, ALICE), Amount::new(70));
        assert_eq!(v.reserve_of(Asset::Native), Amount::new(70));
        assert_conserved(&v, Asset::Native);
    }

    #[test]
    fn withdraw_weth_token_stays_wrapped() {
        let mut v = funded();
        let Ok(_) = v.deposit(ALICE, Asset::Native, ALICE, Amount::new(100)) else {
            panic!("deposit");
        };
        let Ok(()) = v.withdraw(ALICE, Asset::Token(WETH), BOB, Amount::new(10)) else {
            panic!("withdraw");
        };
        assert_eq!(v.host().token_balance(WETH, BOB), Amount::new(10));
        assert_eq!(v.host().native_balance(BOB), Amount::ZERO);
    }

    #[test]
    fn withdraw_more_than_balance_fails() {
        let mut v = funded();
        send_to_vault(&mut v, 5);
        let Ok(_) = v.deposit(ALICE, Asset::Token(TOKEN), ALICE, Amount::ZERO) else {
            panic!("deposit");
        };
        assert_eq!(
            v.withdraw(ALICE, Asset::Token(TOKEN), ALICE, Amount::new(6)),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(v.held(Asset::Token(TOKEN)), Amount::new(5));
    }

    #[test]
    fn withdraw_alternative_modes() {
        let mut v = funded();
        let Ok(_) = v.deposit(ALICE, Asset::Native, ALICE, Amount::new(90)) else {
            panic!("deposit");
        };
        let weth = Asset::Token(WETH);

        let Ok(()) = v.withdraw_alternative(ALICE, weth, BOB, Amount::new(10), WithdrawMode::Vault)
        else {
            panic!("vault mode");
        };
        assert_eq!(v.balance_of(weth, BOB), Amount::new(10));

        let Ok(()) =
            v.withdraw_alternative(ALICE, weth, BOB, Amount::new(20), WithdrawMode::Unwrapped)
        else {
            panic!("unwrapped mode");
        };
        assert_eq!(v.host().native_balance(BOB), Amount::new(20));

        let Ok(()) =
            v.withdraw_alternative(ALICE, weth, BOB, Amount::new(30), WithdrawMode::Wrapped)
        else {
            panic!("wrapped mode");
        };
        assert_eq!(v.host().token_balance(WETH, BOB), Amount::new(30));
        assert_eq!(v.balance_of(weth, ALICE), Amount::new(30));
        assert_conserved(&v, weth);
    }

    #[test]
    fn unwrapped_mode_on_plain_token_sends_token() {
        let mut v = funded();
        send_to_vault(&mut v, 50);
        let Ok(_) = v.deposit(ALICE, Asset::Token(TOKEN), ALICE, Amount::ZERO) else {
            panic!("deposit");
        };
        let Ok(()) = v.withdraw_alternative(
            ALICE,
            Asset::Token(TOKEN),
            BOB,
            Amount::new(50),
            WithdrawMode::Unwrapped,
        ) else {
            panic!("withdraw");
        };
        assert_eq!(v.host().token_balance(TOKEN, BOB), Amount::new(50));
        assert!(v.records().is_empty());
    }

    #[test]
    fn records_report_entries() {
        let mut v = funded();
        send_to_vault(&mut v, 10);
        let Ok(_) = v.deposit(ALICE, Asset::Token(TOKEN), BOB, Amount::ZERO) else {
            panic!("deposit");
        };
        let records = v.records();
        assert_eq!(
            records,
            vec![VaultRecord {
                asset: Asset::Token(TOKEN),
                owner: BOB,
                balance: Amount::new(10),
            }]
        );
    }
}
