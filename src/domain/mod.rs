//! Fundamental domain value types used throughout the engine.
//!
//! This module contains the value types that model the exchange domain:
//! addresses, assets, amounts, fee rates, token pairs, the per-operation
//! call-data codecs and the outcomes reported by committed operations.
//! All types use newtypes with validated constructors to enforce invariants.

mod address;
mod amount;
mod asset;
mod call_data;
mod curve;
mod decimals;
mod fee_rate;
mod outcome;
mod token_pair;
mod withdraw_mode;

pub use address::Address;
pub use amount::Amount;
pub use asset::Asset;
pub use call_data::{BurnData, BurnSingleData, MintData, SwapData};
pub use curve::{CurveKind, PoolId};
pub use decimals::Decimals;
pub use fee_rate::FeeRate;
pub use outcome::{BurnOutcome, MintOutcome, SwapOutcome};
pub use token_pair::TokenPair;
pub use withdraw_mode::WithdrawMode;
