//! Token decimal places.

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Maximum allowed decimal places; also the normalisation basis for
/// stable-curve math.
const MAX_DECIMALS: u8 = 18;

/// Represents the number of decimal places for a token amount.
///
/// Valid range is `0..=18`.  Construction is validated: values above 18
/// are rejected.
///
/// # Examples
///
/// ```
/// use vault_amm::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.get(), 6);
/// assert_eq!(d.precision_multiplier(), 1_000_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::MAX
    }
}

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Maximum standard decimal places (18).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Factor lifting a raw amount onto the 18-decimal basis:
    /// `10^(18 - decimals)`.
    #[must_use]
    pub const fn precision_multiplier(&self) -> u128 {
        10u128.pow((MAX_DECIMALS - self.0) as u32)
    }
}

impl TryFrom<u8> for Decimals {
    type Error = AmmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(d: Decimals) -> Self {
        d.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_range() {
        for v in [0u8, 6, 8, 18] {
            let Ok(d) = Decimals::new(v) else {
                panic!("expected Ok for {v}");
            };
            assert_eq!(d.get(), v);
        }
    }

    #[test]
    fn invalid_nineteen() {
        let Err(e) = Decimals::new(19) else {
            panic!("expected Err");
        };
        assert_eq!(e, AmmError::InvalidPrecision("decimals must be 0..=18"));
        assert!(Decimals::try_from(u8::MAX).is_err());
    }

    #[test]
    fn default_is_eighteen() {
        assert_eq!(Decimals::default(), Decimals::MAX);
    }

    #[test]
    fn multipliers() {
        assert_eq!(Decimals::MAX.precision_multiplier(), 1);
        assert_eq!(Decimals::ZERO.precision_multiplier(), 10u128.pow(18));
        let Ok(d6) = Decimals::new(6) else {
            panic!("expected Ok");
        };
        assert_eq!(d6.precision_multiplier(), 10u128.pow(12));
    }

    #[test]
    fn serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Decimals>("19").is_err());
        let Ok(d) = serde_json::from_str::<Decimals>("6") else {
            panic!("expected Ok");
        };
        assert_eq!(d.get(), 6);
    }
}
