//! Core pool trait: the four liquidity/trade operations plus inspection.
//!
//! # Flash Accounting
//!
//! Callers never hand amounts to a pool.  They first move tokens into the
//! pool's vault ledger entry (or move shares to the pool's own share
//! balance), then invoke an operation.  The pool reads its vault balances,
//! diffs them against its cached reserves, and treats the difference as
//! the input:
//!
//! ```text
//! amount_in = vault.balance_of(token, pool) − reserve(token)
//! ```
//!
//! # Atomicity
//!
//! Each operation either commits completely (reserves, shares and vault
//! balances consistent) or returns an error with no state changed.
//!
//! # Dispatch Model
//!
//! Operations are generic over the vault and fee source, so pools are
//! dispatched via the [`PoolBox`](crate::pools::PoolBox) enum rather than
//! `dyn Pool`.

use crate::domain::{
    Address, Amount, BurnOutcome, CurveKind, MintOutcome, PoolId, SwapOutcome, TokenPair,
};
use crate::error::Result;
use crate::pools::{PoolRecord, ShareLedger};
use crate::traits::{BalanceVault, FeeSource};

/// Operations shared by every pool curve.
pub trait Pool {
    /// The pool's own address: vault ledger owner and share-token identity.
    fn address(&self) -> Address;

    /// The pricing curve.
    fn curve(&self) -> CurveKind;

    /// Canonical token pair.
    fn token_pair(&self) -> &TokenPair;

    /// Cached `(reserve0, reserve1)`.
    fn reserves(&self) -> (Amount, Amount);

    /// Invariant recorded at the last liquidity event (protocol-fee baseline).
    fn invariant_last(&self) -> Amount;

    /// The pool's share token.
    fn shares(&self) -> &ShareLedger;

    /// Moves shares between holders.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `from` holds fewer than `amount` shares.
    fn transfer_shares(&mut self, from: Address, to: Address, amount: Amount) -> Result<()>;

    /// Sets `spender`'s share allowance over `owner`'s balance.
    fn approve_shares(&mut self, owner: Address, spender: Address, amount: Amount);

    /// Moves shares on behalf of `from`, consuming `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientAllowance`](crate::error::AmmError::InsufficientAllowance)
    /// or [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance).
    fn transfer_shares_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()>;

    /// Mints shares for the tokens deposited since the last sync.
    ///
    /// `data` decodes as [`MintData`](crate::domain::MintData).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidityMinted`](crate::error::AmmError::InsufficientLiquidityMinted)
    ///   if the recipient would receive zero shares.
    /// - [`AmmError::InvalidCallData`](crate::error::AmmError::InvalidCallData)
    ///   for a malformed blob.
    fn mint<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<MintOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized;

    /// Burns the shares held by the pool itself, paying both tokens
    /// pro rata.
    ///
    /// `data` decodes as [`BurnData`](crate::domain::BurnData).
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidityBurned`](crate::error::AmmError::InsufficientLiquidityBurned)
    /// if the pool holds no shares of its own.
    fn burn<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<BurnOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized;

    /// Burns the pool-held shares, swapping the other side into
    /// `token_out` before paying out.
    ///
    /// `data` decodes as [`BurnSingleData`](crate::domain::BurnSingleData).
    ///
    /// # Errors
    ///
    /// As [`burn`](Self::burn), plus
    /// [`AmmError::InvalidAsset`](crate::error::AmmError::InvalidAsset) if
    /// `token_out` is not in the pair.
    fn burn_single<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<BurnOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized;

    /// Swaps the unaccounted balance of `token_in` for the other token.
    ///
    /// `data` decodes as [`SwapData`](crate::domain::SwapData).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientOutputAmount`](crate::error::AmmError::InsufficientOutputAmount)
    ///   if the output rounds to zero.
    /// - [`AmmError::InvariantViolation`](crate::error::AmmError::InvariantViolation)
    ///   if the post-trade invariant check fails.
    fn swap<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<SwapOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized;

    /// Quotes the output for `amount_in` of `token_in` at current reserves.
    ///
    /// Zero input quotes zero.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAsset`](crate::error::AmmError::InvalidAsset) if
    /// `token_in` is not in the pair, or arithmetic failures.
    fn get_amount_out<F>(
        &self,
        fees: &F,
        sender: Address,
        token_in: Address,
        amount_in: Amount,
    ) -> Result<Amount>
    where
        F: FeeSource + ?Sized;

    /// Snapshot of the persisted state layout.
    fn record(&self) -> PoolRecord;

    /// Identity passed to the fee source.
    fn pool_id(&self) -> PoolId {
        PoolId::new(self.address(), self.curve())
    }

    /// The lower-sorted token.
    fn token0(&self) -> Address {
        self.token_pair().token0()
    }

    /// The higher-sorted token.
    fn token1(&self) -> Address {
        self.token_pair().token1()
    }
}
