//! Integer square root.

use primitive_types::U256;

use super::wide::{mul, narrow, wide};
use crate::error::Result;

/// Floor square root via Newton's method.
///
/// Starts from `x = n`, `y = ceil(n / 2)` and iterates
/// `y = (x + n / x) / 2` while the next iterate is strictly smaller.
/// The sequence decreases monotonically onto `floor(√n)`.
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use vault_amm::math::isqrt;
///
/// assert_eq!(isqrt(U256::from(16u8)), U256::from(4u8));
/// assert_eq!(isqrt(U256::from(17u8)), U256::from(4u8));
/// ```
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    let mut x = n;
    // (n + 1) / 2 without overflowing at U256::MAX.
    let mut y = (n >> 1) + (n & U256::one());
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}

/// `floor(√(a · b))`, the constant-product invariant.
///
/// # Errors
///
/// Never fails for `u128` inputs in practice; the result of a square root
/// of a 256-bit value always fits in `u128`.
pub fn sqrt_product(a: u128, b: u128) -> Result<u128> {
    let product = mul(wide(a), wide(b), "sqrt product overflow")?;
    narrow(isqrt(product), "sqrt result overflow")
}

/// `ceil(√(a · b))`, used where an invariant divides and must round in
/// the pool's favour.
///
/// # Errors
///
/// As [`sqrt_product`].
pub fn sqrt_product_ceil(a: u128, b: u128) -> Result<u128> {
    let product = mul(wide(a), wide(b), "sqrt product overflow")?;
    let root = isqrt(product);
    let root = if root * root < product {
        root + U256::one()
    } else {
        root
    };
    narrow(root, "sqrt result overflow")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn small_values() {
        let expected = [0u64, 1, 1, 1, 2, 2, 2, 2, 2, 3];
        for (n, root) in expected.iter().enumerate() {
            assert_eq!(isqrt(U256::from(n as u64)), U256::from(*root), "n = {n}");
        }
    }

    #[test]
    fn perfect_and_adjacent_squares() {
        let r = U256::from(1_000_000_007u64);
        let sq = r * r;
        assert_eq!(isqrt(sq), r);
        assert_eq!(isqrt(sq - U256::one()), r - U256::one());
        assert_eq!(isqrt(sq + U256::one()), r);
    }

    #[test]
    fn max_input() {
        let root = isqrt(U256::MAX);
        assert_eq!(root, U256::from(u128::MAX));
    }

    #[test]
    fn product_roots() {
        let e18 = 10u128.pow(18);
        assert_eq!(sqrt_product(e18, 4 * e18), Ok(2 * e18));
        assert_eq!(sqrt_product(1, 10u128.pow(25)), Ok(3_162_277_660_168));
        assert_eq!(sqrt_product(10u128.pow(38), 10u128.pow(38)), Ok(10u128.pow(38)));
        assert_eq!(sqrt_product(u128::MAX, u128::MAX), Ok(u128::MAX));
    }

    #[test]
    fn ceil_root_rounds_up_only_off_squares() {
        let e18 = 10u128.pow(18);
        assert_eq!(sqrt_product_ceil(e18, 4 * e18), Ok(2 * e18));
        assert_eq!(sqrt_product_ceil(1, 10u128.pow(25)), Ok(3_162_277_660_169));
        assert_eq!(sqrt_product_ceil(2, 1), Ok(2));
        assert_eq!(sqrt_product_ceil(0, 7), Ok(0));
        assert_eq!(sqrt_product_ceil(u128::MAX, u128::MAX), Ok(u128::MAX));
    }
}
