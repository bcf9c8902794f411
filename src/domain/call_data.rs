//! Per-operation call-data blobs.
//!
//! Pool operations receive an opaque byte blob from their caller (usually
//! a router).  Each operation decodes it with its own layout; nothing else
//! in the pool interprets the bytes.
//!
//! # Layout
//!
//! Fields are packed as consecutive 32-byte big-endian words:
//!
//! | Operation | Words |
//! |-----------|-------|
//! | mint | `to` |
//! | burn | `to`, `withdraw_mode` |
//! | burn single | `token_out`, `to`, `withdraw_mode` |
//! | swap | `token_in`, `to`, `withdraw_mode` |
//!
//! Addresses occupy the low 20 bytes of their word and the mode occupies
//! the last byte; all padding must be zero.  Trailing bytes after the
//! last word are ignored.

use super::{Address, WithdrawMode};
use crate::error::{AmmError, Result};

const WORD: usize = 32;
const ADDRESS_OFFSET: usize = WORD - 20;

fn word(data: &[u8], index: usize) -> Result<&[u8]> {
    let start = index * WORD;
    data.get(start..start + WORD)
        .ok_or(AmmError::InvalidCallData("blob shorter than layout"))
}

fn read_address(data: &[u8], index: usize) -> Result<Address> {
    let w = word(data, index)?;
    if w[..ADDRESS_OFFSET].iter().any(|b| *b != 0) {
        return Err(AmmError::InvalidCallData("dirty address padding"));
    }
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&w[ADDRESS_OFFSET..]);
    Ok(Address::from_bytes(bytes))
}

fn read_mode(data: &[u8], index: usize) -> Result<WithdrawMode> {
    let w = word(data, index)?;
    if w[..WORD - 1].iter().any(|b| *b != 0) {
        return Err(AmmError::InvalidCallData("dirty withdraw mode padding"));
    }
    WithdrawMode::try_from(w[WORD - 1])
}

fn push_address(buf: &mut Vec<u8>, addr: Address) {
    buf.extend_from_slice(&[0u8; ADDRESS_OFFSET]);
    buf.extend_from_slice(&addr.as_bytes());
}

fn push_mode(buf: &mut Vec<u8>, mode: WithdrawMode) {
    buf.extend_from_slice(&[0u8; WORD - 1]);
    buf.push(mode.as_u8());
}

/// Decoded `mint` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintData {
    /// Receiver of the minted shares.
    pub to: Address,
}

impl MintData {
    /// Encodes into a one-word blob.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(WORD);
        push_address(&mut buf, self.to);
        buf
    }

    /// Decodes a `mint` blob.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidCallData`] on a short or malformed blob.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Ok(Self {
            to: read_address(data, 0)?,
        })
    }
}

/// Decoded `burn` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnData {
    /// Receiver of both tokens.
    pub to: Address,
    /// Payout preference.
    pub withdraw_mode: WithdrawMode,
}

impl BurnData {
    /// Encodes into a two-word blob.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(2 * WORD);
        push_address(&mut buf, self.to);
        push_mode(&mut buf, self.withdraw_mode);
        buf
    }

    /// Decodes a `burn` blob.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidCallData`] on a short or malformed blob.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Ok(Self {
            to: read_address(data, 0)?,
            withdraw_mode: read_mode(data, 1)?,
        })
    }
}

/// Decoded `burn_single` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnSingleData {
    /// The only token paid out.
    pub token_out: Address,
    /// Receiver of `token_out`.
    pub to: Address,
    /// Payout preference.
    pub withdraw_mode: WithdrawMode,
}

impl BurnSingleData {
    /// Encodes into a three-word blob.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(3 * WORD);
        push_address(&mut buf, self.token_out);
        push_address(&mut buf, self.to);
        push_mode(&mut buf, self.withdraw_mode);
        buf
    }

    /// Decodes a `burn_single` blob.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidCallData`] on a short or malformed blob.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Ok(Self {
            token_out: read_address(data, 0)?,
            to: read_address(data, 1)?,
            withdraw_mode: read_mode(data, 2)?,
        })
    }
}

/// Decoded `swap` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapData {
    /// Token whose unaccounted vault balance is the swap input.
    pub token_in: Address,
    /// Receiver of the output token.
    pub to: Address,
    /// Payout preference.
    pub withdraw_mode: WithdrawMode,
}

impl SwapData {
    /// Encodes into a three-word blob.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(3 * WORD);
        push_address(&mut buf, self.token_in);
        push_address(&mut buf, self.to);
        push_mode(&mut buf, self.withdraw_mode);
        buf
    }

    /// Decodes a `swap` blob.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidCallData`] on a short or malformed blob.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Ok(Self {
            token_in: read_address(data, 0)?,
            to: read_address(data, 1)?,
            withdraw_mode: read_mode(data, 2)?,
        })
    }
}
