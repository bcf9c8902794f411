//! External fee-rate collaborator.
//!
//! Pools never own their fee rates.  On every operation they ask a
//! [`FeeSource`] for the current swap fee, protocol fee and fee
//! recipient, and use the answers for that call only.
//!
//! # Query Contract
//!
//! - `swap_fee` may depend on the pool, the sender, the direction of the
//!   trade and the caller-supplied data blob.  Liquidity operations query
//!   it with `token_in` / `token_out` set to `None`.
//! - `protocol_fee` is the share of invariant growth minted to the
//!   recipient on liquidity events.
//! - `fee_recipient` returning `None` turns protocol-fee minting off
//!   entirely; accrued fees then stay in reserves for all providers.

use crate::domain::{Address, FeeRate, PoolId};

/// Supplies fee rates to pools.
///
/// Implementations must be pure with respect to pool state: answering a
/// query never mutates anything the pool can observe.
pub trait FeeSource {
    /// Swap fee charged to `sender` trading `token_in` for `token_out` in
    /// `pool`.
    fn swap_fee(
        &self,
        pool: PoolId,
        sender: Address,
        token_in: Option<Address>,
        token_out: Option<Address>,
        data: &[u8],
    ) -> FeeRate;

    /// Protocol share of invariant growth for `pool`.
    fn protocol_fee(&self, pool: PoolId) -> FeeRate;

    /// Receiver of protocol-fee shares, if any.
    fn fee_recipient(&self) -> Option<Address>;
}

impl<T: FeeSource + ?Sized> FeeSource for &T {
    fn swap_fee(
        &self,
        pool: PoolId,
        sender: Address,
        token_in: Option<Address>,
        token_out: Option<Address>,
        data: &[u8],
    ) -> FeeRate {
        (**self).swap_fee(pool, sender, token_in, token_out, data)
    }

    fn protocol_fee(&self, pool: PoolId) -> FeeRate {
        (**self).protocol_fee(pool)
    }

    fn fee_recipient(&self) -> Option<Address> {
        (**self).fee_recipient()
    }
}
