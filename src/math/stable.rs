//! Two-asset StableSwap invariant solvers.
//!
//! The invariant `D` for balances `x0`, `x1` (both on the 18-decimal
//! basis) and amplification `A` satisfies
//!
//! ```text
//! 4A·(x0 + x1) + D = 4A·D + D³ / (4·x0·x1)
//! ```
//!
//! Neither `D` nor the counterparty balance `y` has a closed form, so both
//! are found by Newton-Raphson iteration.
//!
//! # Convergence
//!
//! Each solver stops as soon as two successive iterates differ by at most
//! one unit ([`within1`]) or after [`MAX_LOOP_LIMIT`] iterations.  Running
//! out of iterations is not an error: the last iterate is returned and a
//! `warn` event is emitted, because the result is still a usable
//! approximation for pathological balance ratios.
//!
//! # Algorithm (`compute_d`)
//!
//! ```text
//! S = x0 + x1;  D = S;  nA = 2A
//! repeat:
//!     D_P   = D·D / x0 · D / x1 / 4
//!     D'    = (nA·S + 2·D_P)·D / ((nA − 1)·D + 3·D_P)
//! until |D' − D| ≤ 1
//! ```
//!
//! # Algorithm (`get_y`)
//!
//! ```text
//! c = D·D / (2x) · D / (2nA)
//! b = x + D / nA
//! y = D
//! repeat:
//!     y' = (y² + c) / (2y + b − D)
//! until |y' − y| ≤ 1
//! ```

use primitive_types::U256;
use tracing::warn;

use super::wide::{add, div, mul, sub};
use crate::error::{AmmError, Result};

/// Iteration cap shared by [`compute_d`] and [`get_y`].
pub const MAX_LOOP_LIMIT: usize = 256;

/// `true` when `a` and `b` differ by at most one.
#[inline]
#[must_use]
pub fn within1(a: U256, b: U256) -> bool {
    if a > b {
        a - b <= U256::one()
    } else {
        b - a <= U256::one()
    }
}

/// Solves the StableSwap invariant `D` for scaled balances `xp0`, `xp1`.
///
/// Returns zero when both balances are zero.
///
/// # Errors
///
/// - [`AmmError::InvalidConfiguration`] if `amplification` is zero.
/// - [`AmmError::DivisionByZero`] if exactly one balance is zero.
/// - [`AmmError::Overflow`] if an intermediate exceeds 256 bits.
pub fn compute_d(amplification: u128, xp0: U256, xp1: U256) -> Result<U256> {
    if amplification == 0 {
        return Err(AmmError::InvalidConfiguration("amplification must be positive"));
    }
    let s = add(xp0, xp1, "D: sum overflow")?;
    if s.is_zero() {
        return Ok(U256::zero());
    }

    let n_a = U256::from(amplification) << 1;
    let two = U256::from(2u8);
    let three = U256::from(3u8);
    let four = U256::from(4u8);
    let n_a_s = mul(n_a, s, "D: nA·S overflow")?;

    let mut d = s;
    for _ in 0..MAX_LOOP_LIMIT {
        let d_sq = mul(d, d, "D: D² overflow")?;
        let d_p = div(mul(div(d_sq, xp0)?, d, "D: D_P overflow")?, xp1)? / four;

        let prev = d;
        let numerator = mul(
            add(n_a_s, mul(two, d_p, "D: 2·D_P overflow")?, "D: numerator overflow")?,
            d,
            "D: numerator overflow",
        )?;
        let denominator = add(
            mul(n_a - U256::one(), d, "D: denominator overflow")?,
            mul(three, d_p, "D: 3·D_P overflow")?,
            "D: denominator overflow",
        )?;
        d = div(numerator, denominator)?;

        if within1(d, prev) {
            return Ok(d);
        }
    }

    warn!(
        iterations = MAX_LOOP_LIMIT,
        d = %d,
        "stable invariant did not converge; using last iterate"
    );
    Ok(d)
}

/// Solves for the counterparty balance `y` given the post-trade balance
/// `x` and the invariant `d`.
///
/// # Errors
///
/// - [`AmmError::InvalidConfiguration`] if `amplification` is zero.
/// - [`AmmError::DivisionByZero`] if `x` is zero.
/// - [`AmmError::Overflow`] if an intermediate exceeds 256 bits or the
///   Newton denominator goes negative.
pub fn get_y(amplification: u128, x: U256, d: U256) -> Result<U256> {
    if amplification == 0 {
        return Err(AmmError::InvalidConfiguration("amplification must be positive"));
    }
    let n_a = U256::from(amplification) << 1;
    let two = U256::from(2u8);

    let d_sq = mul(d, d, "y: D² overflow")?;
    let c = div(d_sq, mul(x, two, "y: 2x overflow")?)?;
    let c = div(mul(c, d, "y: c overflow")?, n_a << 1)?;
    let b = add(x, d / n_a, "y: b overflow")?;

    let mut y = d;
    for _ in 0..MAX_LOOP_LIMIT {
        let prev = y;
        let numerator = add(mul(y, y, "y: y² overflow")?, c, "y: numerator overflow")?;
        let denominator = sub(
            add(mul(two, y, "y: 2y overflow")?, b, "y: denominator overflow")?,
            d,
            "y: denominator underflow",
        )?;
        y = div(numerator, denominator)?;

        if within1(y, prev) {
            return Ok(y);
        }
    }

    warn!(
        iterations = MAX_LOOP_LIMIT,
        y = %y,
        "stable counterparty balance did not converge; using last iterate"
    );
    Ok(y)
}
