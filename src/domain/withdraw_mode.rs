//! Payout preference for pool outputs.

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// How a pool hands tokens to the recipient of a burn or swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WithdrawMode {
    /// Credit the recipient's vault ledger; nothing leaves the vault.
    #[default]
    Vault,
    /// Withdraw to the recipient, unwrapping the wrapped-native token.
    Unwrapped,
    /// Withdraw to the recipient in the form the vault holds.
    Wrapped,
}

impl WithdrawMode {
    /// Wire value: 0, 1 or 2.
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Vault => 0,
            Self::Unwrapped => 1,
            Self::Wrapped => 2,
        }
    }
}

impl TryFrom<u8> for WithdrawMode {
    type Error = AmmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Vault),
            1 => Ok(Self::Unwrapped),
            2 => Ok(Self::Wrapped),
            _ => Err(AmmError::InvalidCallData("unknown withdraw mode")),
        }
    }
}
