//! Classic constant-product pool (`x · y = k`).
//!
//! # Mathematical Background
//!
//! The invariant is the geometric mean of the reserves, `I = √(x · y)`,
//! which keeps share supply linear in deposited value.
//!
//! ## Swap Output
//!
//! For input `a` with fee `f` (out of [`MAX_FEE`]):
//!
//! ```text
//! a_w = a · (MAX_FEE − f)
//! out = a_w · R_out / (R_in · MAX_FEE + a_w)
//! ```
//!
//! ## Share Pricing
//!
//! New shares are priced against `⌈√(x · y)⌉` of the pre-deposit
//! reserves, so rounding always favours the pool.
//!
//! ## Post-Trade Check
//!
//! Before paying out, the fee-adjusted product must not have shrunk:
//!
//! ```text
//! (B_in · MAX_FEE − a · f) · B_out ≥ R_in · R_out · MAX_FEE
//! ```

use primitive_types::U512;

use super::pair::{self, Curve, PairState, SwapCheck};
use super::{PoolRecord, ShareLedger};
use crate::config::ClassicPoolConfig;
use crate::domain::{
    Address, Amount, BurnOutcome, CurveKind, FeeRate, MintOutcome, SwapOutcome, TokenPair,
};
use crate::error::{AmmError, Result};
use crate::math::wide::{add, div, mul, narrow, wide};
use crate::math::{sqrt_product, sqrt_product_ceil, MAX_FEE};
use crate::traits::{BalanceVault, FeeSource, FromConfig, Pool};

#[derive(Debug, Clone, Copy, Default)]
struct ConstantProduct;

impl Curve for ConstantProduct {
    const KIND: CurveKind = CurveKind::Classic;

    fn invariant(&self, balance0: u128, balance1: u128) -> Result<u128> {
        sqrt_product(balance0, balance1)
    }

    fn invariant_ceil(&self, balance0: u128, balance1: u128) -> Result<u128> {
        sqrt_product_ceil(balance0, balance1)
    }

    fn amount_out(
        &self,
        fee: FeeRate,
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
        _token0_in: bool,
    ) -> Result<u128> {
        if amount_in == 0 {
            return Ok(0);
        }
        let scale = wide(u128::from(MAX_FEE));
        let weighted = mul(
            wide(amount_in),
            wide(u128::from(MAX_FEE - fee.get())),
            "amount in overflow",
        )?;
        let numerator = mul(weighted, wide(reserve_out), "output numerator overflow")?;
        let denominator = add(
            mul(wide(reserve_in), scale, "output denominator overflow")?,
            weighted,
            "output denominator overflow",
        )?;
        narrow(div(numerator, denominator)?, "amount out overflow")
    }

    fn verify_swap(&self, check: &SwapCheck) -> Result<()> {
        let scale = U512::from(MAX_FEE);
        let adjusted = (U512::from(check.balance_in) * scale)
            .checked_sub(U512::from(check.amount_in) * U512::from(check.fee.get()))
            .ok_or(AmmError::InvariantViolation)?;
        let after = adjusted * U512::from(check.balance_out);
        let before = U512::from(check.reserve_in) * U512::from(check.reserve_out) * scale;
        if after < before {
            return Err(AmmError::InvariantViolation);
        }
        Ok(())
    }
}

/// A constant-product pool over two vault-held tokens.
///
/// Created empty; the first [`mint`](Pool::mint) sets the price.
///
/// # Example
///
/// ```rust
/// use vault_amm::config::ClassicPoolConfig;
/// use vault_amm::domain::Address;
/// use vault_amm::pools::ClassicPool;
/// use vault_amm::traits::{FromConfig, Pool};
///
/// let config = ClassicPoolConfig::new(
///     Address::from_low_u64(0xc1),
///     Address::from_low_u64(0xa),
///     Address::from_low_u64(0xb),
/// )
/// .expect("valid config");
/// let pool = ClassicPool::from_config(&config).expect("valid pool");
/// assert!(pool.shares().total_supply().is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicPool {
    state: PairState,
}

impl ClassicPool {
    /// An empty pool at `address` over `pair`.
    #[must_use]
    pub fn new(address: Address, pair: TokenPair) -> Self {
        Self {
            state: PairState::new(address, pair),
        }
    }
}

impl FromConfig<ClassicPoolConfig> for ClassicPool {
    fn from_config(config: &ClassicPoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.address(), *config.token_pair()))
    }
}

impl Pool for ClassicPool {
    fn address(&self) -> Address {
        self.state.address
    }

    fn curve(&self) -> CurveKind {
        CurveKind::Classic
    }

    fn token_pair(&self) -> &TokenPair {
        &self.state.pair
    }

    fn reserves(&self) -> (Amount, Amount) {
        (self.state.reserve0, self.state.reserve1)
    }

    fn invariant_last(&self) -> Amount {
        self.state.invariant_last
    }

    fn shares(&self) -> &ShareLedger {
        &self.state.shares
    }

    fn transfer_shares(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        self.state.shares.transfer(from, to, amount)
    }

    fn approve_shares(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.state.shares.approve(owner, spender, amount);
    }

    fn transfer_shares_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.state.shares.transfer_from(spender, from, to, amount)
    }

    fn mint<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<MintOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized,
    {
        pair::mint(&ConstantProduct, &mut self.state, vault, fees, sender, data)
    }

    fn burn<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        _sender: Address,
        data: &[u8],
    ) -> Result<BurnOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized,
    {
        pair::burn(&ConstantProduct, &mut self.state, vault, fees, data)
    }

    fn burn_single<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<BurnOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized,
    {
        pair::burn_single(&ConstantProduct, &mut self.state, vault, fees, sender, data)
    }

    fn swap<V, F>(
        &mut self,
        vault: &mut V,
        fees: &F,
        sender: Address,
        data: &[u8],
    ) -> Result<SwapOutcome>
    where
        V: BalanceVault + ?Sized,
        F: FeeSource + ?Sized,
    {
        pair::swap(&ConstantProduct, &mut self.state, vault, fees, sender, data)
    }

    fn get_amount_out<F>(
        &self,
        fees: &F,
        sender: Address,
        token_in: Address,
        amount_in: Amount,
    ) -> Result<Amount>
    where
        F: FeeSource + ?Sized,
    {
        pair::quote(&ConstantProduct, &self.state, fees, sender, token_in, amount_in)
    }

    fn record(&self) -> PoolRecord {
        PoolRecord::from_state(&self.state, CurveKind::Classic, (1, 1), None)
    }
}
