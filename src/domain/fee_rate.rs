//! Fee rates on the 1e5 scale.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::AmmError;
use crate::math::MAX_FEE;

/// A fee rate out of [`MAX_FEE`] (100 000 = 100%, 1 = 0.001%).
///
/// Used for swap fees, the unbalanced-mint penalty and the protocol's
/// share of invariant growth.
///
/// # Examples
///
/// ```
/// use vault_amm::domain::{Amount, FeeRate};
///
/// let fee = FeeRate::new(300).expect("0.3% is valid");
/// assert_eq!(fee.apply(Amount::new(1_000_000)).expect("fits"), Amount::new(3_000));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct FeeRate(u32);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX: Self = Self(MAX_FEE);

    /// Creates a fee rate, rejecting anything above [`MAX_FEE`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `value > MAX_FEE`.
    pub const fn new(value: u32) -> Result<Self, AmmError> {
        if value > MAX_FEE {
            return Err(AmmError::InvalidFee("fee rate exceeds 100000"));
        }
        Ok(Self(value))
    }

    /// Returns the raw rate.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` for a zero rate.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes `amount * rate / MAX_FEE`, rounded down.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product does not fit in `u128`.
    pub const fn apply(&self, amount: Amount) -> crate::error::Result<Amount> {
        match amount.get().checked_mul(self.0 as u128) {
            Some(product) => Ok(Amount::new(product / MAX_FEE as u128)),
            None => Err(AmmError::Overflow("fee apply overflow")),
        }
    }
}

impl TryFrom<u32> for FeeRate {
    type Error = AmmError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeeRate> for u32 {
    fn from(rate: FeeRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_FEE)
    }
}
