//! Feature-gated pool implementations and the [`PoolBox`] dispatch enum.
//!
//! Both curves run on one shared engine (reserves, share ledger,
//! protocol-fee accounting) and differ only in their invariant and swap
//! quote.
//!
//! # Pool Types
//!
//! | Feature | Pool | Invariant |
//! |---------|------|-----------|
//! | `classic` | [`ClassicPool`] | `√(x · y)` |
//! | `stable` | [`StablePool`] | StableSwap `D` |

#[cfg(feature = "classic")]
pub mod classic;
#[cfg(feature = "stable")]
pub mod stable;

mod pair;
mod pool_box;
mod record;
mod shares;

#[cfg(feature = "classic")]
pub use classic::ClassicPool;
pub use pair::MINIMUM_LIQUIDITY;
pub use pool_box::PoolBox;
pub use record::PoolRecord;
pub use shares::ShareLedger;
#[cfg(feature = "stable")]
pub use stable::StablePool;


#[cfg(all(test, feature = "classic", feature = "stable"))]
#[allow(clippy::panic)]
mod proptest_properties;
