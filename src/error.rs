//! Unified error types for the vault AMM engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! Every failure is local and synchronous.  An operation that returns an
//! error has left pool state, share balances and vault ledger entries
//! exactly as they were before the call.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Errors produced by vault, pool and math operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A mint would credit zero shares to the recipient.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A burn was requested with no shares held by the pool.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// A swap would pay out nothing.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// The post-swap invariant dropped below its pre-swap value.
    #[error("invariant violation: post-trade value decreased")]
    InvariantViolation,

    /// A ledger debit exceeds the owner's recorded balance.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A share-token `transfer_from` exceeds the spender's allowance.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// Pulling tokens from an external holder failed.
    #[error("transfer from failed")]
    TransferFromFailed,

    /// Deposit detection found no unaccounted holdings.
    #[error("no net deposit")]
    NoNetDeposit,

    /// The asset is not valid for the requested operation.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// Both sides of a pair or swap refer to the same asset.
    #[error("identical assets")]
    IdenticalAssets,

    /// Arithmetic overflow or underflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// A pool or fee configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A fee rate is outside `0..=MAX_FEE`.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Token decimals are outside the supported range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// An operation's call-data blob could not be decoded.
    #[error("invalid call data: {0}")]
    InvalidCallData(&'static str),
}
