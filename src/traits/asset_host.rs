//! The world outside the vault: token contracts and native coin.
//!
//! The vault is a ledger over real holdings it does not implement itself.
//! [`AssetHost`] is the boundary to whatever keeps those holdings: a chain
//! client, a simulator, or the in-memory [`InMemoryHost`](crate::host::InMemoryHost).

use crate::domain::{Address, Amount};
use crate::error::Result;

/// Token balances, allowances and native coin held outside the vault.
pub trait AssetHost {
    /// Address of the wrapped-native token contract.
    fn wrapped_native(&self) -> Address;

    /// `token` balance of `owner`.
    fn token_balance(&self, token: Address, owner: Address) -> Amount;

    /// Native coin balance of `owner`.
    fn native_balance(&self, owner: Address) -> Amount;

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `from` holds less than `amount`.
    fn transfer(&mut self, token: Address, from: Address, to: Address, amount: Amount)
        -> Result<()>;

    /// Moves `amount` of `token` from `from` to `to` on behalf of `spender`,
    /// consuming allowance.
    ///
    /// # Errors
    ///
    /// [`AmmError::TransferFromFailed`](crate::error::AmmError::TransferFromFailed)
    /// if the allowance or the balance is insufficient.  Nothing moves on
    /// failure.
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()>;

    /// Sends native coin.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `from` holds less than `amount`.
    fn send_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<()>;

    /// Converts `owner`'s native coin into the wrapped token, 1:1.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `owner` lacks the native coin.
    fn wrap_native(&mut self, owner: Address, amount: Amount) -> Result<()>;

    /// Converts `owner`'s wrapped token back into native coin, 1:1.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `owner` lacks the wrapped token.
    fn unwrap_native(&mut self, owner: Address, amount: Amount) -> Result<()>;
}
