//! 256-bit intermediate arithmetic.
//!
//! Amounts, shares and invariants are stored as `u128`, but products of
//! two of them (and the cubic terms of the stable curve) need 256 bits.
//! These helpers widen with [`U256`], operate with checked arithmetic, and
//! narrow the result back, reporting [`AmmError::Overflow`] whenever a
//! value does not fit.

use primitive_types::U256;

use crate::error::{AmmError, Result};

/// Widens a `u128`.
#[inline]
#[must_use]
pub fn wide(value: u128) -> U256 {
    U256::from(value)
}

/// Narrows to `u128`, failing with `Overflow(context)` if it does not fit.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] when `value > u128::MAX`.
#[inline]
pub fn narrow(value: U256, context: &'static str) -> Result<u128> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::Overflow(context));
    }
    Ok(value.as_u128())
}

/// Checked `a * b` in 256 bits.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] on overflow.
#[inline]
pub fn mul(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_mul(b).ok_or(AmmError::Overflow(context))
}

/// Checked `a + b` in 256 bits.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] on overflow.
#[inline]
pub fn add(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_add(b).ok_or(AmmError::Overflow(context))
}

/// Checked `a - b` in 256 bits.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] on underflow.
#[inline]
pub fn sub(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_sub(b).ok_or(AmmError::Overflow(context))
}

/// Floor `a / b` in 256 bits.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] when `b` is zero.
#[inline]
pub fn div(a: U256, b: U256) -> Result<U256> {
    if b.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    Ok(a / b)
}

/// `floor(a * b / c)` for `u128` operands with a 256-bit product.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] when `c` is zero.
/// - [`AmmError::Overflow`] when the quotient exceeds `u128`.
pub fn mul_div(a: u128, b: u128, c: u128, context: &'static str) -> Result<u128> {
    // u128 * u128 always fits in 256 bits.
    let product = wide(a) * wide(b);
    narrow(div(product, wide(c))?, context)
}
