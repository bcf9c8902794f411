//! Results of committed pool operations.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Address, Amount, FeeRate};

/// The outcome of a `mint`.
///
/// `fee0` / `fee1` are the unbalanced-deposit penalties charged on the
/// over-supplied side; at most one of them is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MintOutcome {
    liquidity: Amount,
    protocol_liquidity: Amount,
    amount0: Amount,
    amount1: Amount,
    fee0: Amount,
    fee1: Amount,
}

impl MintOutcome {
    pub(crate) const fn new(
        liquidity: Amount,
        protocol_liquidity: Amount,
        amounts: (Amount, Amount),
        fees: (Amount, Amount),
    ) -> Self {
        Self {
            liquidity,
            protocol_liquidity,
            amount0: amounts.0,
            amount1: amounts.1,
            fee0: fees.0,
            fee1: fees.1,
        }
    }

    /// Shares credited to the recipient.
    pub const fn liquidity(&self) -> Amount {
        self.liquidity
    }

    /// Shares minted to the protocol fee recipient before this mint.
    pub const fn protocol_liquidity(&self) -> Amount {
        self.protocol_liquidity
    }

    /// Detected token0 deposit.
    pub const fn amount0(&self) -> Amount {
        self.amount0
    }

    /// Detected token1 deposit.
    pub const fn amount1(&self) -> Amount {
        self.amount1
    }

    /// Unbalanced-deposit fee on token0.
    pub const fn fee0(&self) -> Amount {
        self.fee0
    }

    /// Unbalanced-deposit fee on token1.
    pub const fn fee1(&self) -> Amount {
        self.fee1
    }
}

/// The outcome of a `burn` or `burn_single`.
///
/// For a single-sided burn the side that was swapped away reports zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BurnOutcome {
    liquidity: Amount,
    amount0: Amount,
    amount1: Amount,
}

impl BurnOutcome {
    pub(crate) const fn new(liquidity: Amount, amount0: Amount, amount1: Amount) -> Self {
        Self {
            liquidity,
            amount0,
            amount1,
        }
    }

    /// Shares destroyed.
    pub const fn liquidity(&self) -> Amount {
        self.liquidity
    }

    /// token0 paid to the recipient.
    pub const fn amount0(&self) -> Amount {
        self.amount0
    }

    /// token1 paid to the recipient.
    pub const fn amount1(&self) -> Amount {
        self.amount1
    }
}

/// The outcome of a `swap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapOutcome {
    token_in: Address,
    token_out: Address,
    amount_in: Amount,
    amount_out: Amount,
    fee_rate: FeeRate,
}

impl SwapOutcome {
    pub(crate) const fn new(
        token_in: Address,
        token_out: Address,
        amount_in: Amount,
        amount_out: Amount,
        fee_rate: FeeRate,
    ) -> Self {
        Self {
            token_in,
            token_out,
            amount_in,
            amount_out,
            fee_rate,
        }
    }

    /// Input token.
    pub const fn token_in(&self) -> Address {
        self.token_in
    }

    /// Output token.
    pub const fn token_out(&self) -> Address {
        self.token_out
    }

    /// Detected input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Amount paid out.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Swap fee rate applied.
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "swap {} {} -> {} {} (fee {})",
            self.amount_in, self.token_in, self.amount_out, self.token_out, self.fee_rate
        )
    }
}
