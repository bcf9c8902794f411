//! Fixed-point math shared by both pool curves.
//!
//! - [`isqrt`] / [`sqrt_product`] / [`sqrt_product_ceil`]: the
//!   constant-product invariant, rounded down or up.
//! - [`compute_d`] / [`get_y`] / [`within1`]: StableSwap Newton solvers.
//! - [`wide`]: 256-bit intermediates with checked narrowing back to `u128`.
//!
//! Fee rates use a 5-digit scale: [`MAX_FEE`] (100 000) is 100% and one
//! unit is 0.001%.

mod sqrt;
mod stable;
pub mod wide;

pub use sqrt::{isqrt, sqrt_product, sqrt_product_ceil};
pub use stable::{compute_d, get_y, within1, MAX_LOOP_LIMIT};

/// Fee denominator: 100 000 = 100%.
pub const MAX_FEE: u32 = 100_000;
