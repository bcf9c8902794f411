//! StableSwap pool for like-valued assets.
//!
//! Balances are scaled to a common 18-decimal basis with per-token
//! precision multipliers before they reach the invariant:
//!
//! ```text
//! xp_i = balance_i · 10^(18 − decimals_i)
//! ```
//!
//! The invariant is the StableSwap `D` of the scaled balances (see
//! [`compute_d`]).  A quote solves for the counterparty balance after the
//! fee-deducted input is added, and keeps one unit of margin:
//!
//! ```text
//! x   = xp_in + (a − a · f / MAX_FEE) · m_in
//! y   = get_y(A, x, D)
//! out = (xp_out − y − 1) / m_out
//! ```
//!
//! The margin covers solver rounding, so swaps need no separate invariant
//! check.

use super::pair::{self, Curve, PairState};
use super::{PoolRecord, ShareLedger};
use crate::config::StablePoolConfig;
use crate::domain::{
    Address, Amount, BurnOutcome, CurveKind, Decimals, FeeRate, MintOutcome, SwapOutcome,
    TokenPair,
};
use crate::error::{AmmError, Result};
use crate::math::wide::{add, mul, mul_div, narrow, wide};
use crate::math::{compute_d, get_y, MAX_FEE};
use crate::traits::{BalanceVault, FeeSource, FromConfig, Pool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StableCurve {
    amplification: u128,
    multiplier0: u128,
    multiplier1: u128,
}

impl Curve for StableCurve {
    const KIND: CurveKind = CurveKind::Stable;

    fn invariant(&self, balance0: u128, balance1: u128) -> Result<u128> {
        let d = compute_d(
            self.amplification,
            mul(wide(balance0), wide(self.multiplier0), "scaled balance overflow")?,
            mul(wide(balance1), wide(self.multiplier1), "scaled balance overflow")?,
        )?;
        narrow(d, "stable invariant overflow")
    }

    fn amount_out(
        &self,
        fee: FeeRate,
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
        token0_in: bool,
    ) -> Result<u128> {
        if amount_in == 0 || reserve_in == 0 || reserve_out == 0 {
            return Ok(0);
        }
        let (m_in, m_out) = if token0_in {
            (self.multiplier0, self.multiplier1)
        } else {
            (self.multiplier1, self.multiplier0)
        };
        let fee_part = mul_div(
            amount_in,
            u128::from(fee.get()),
            u128::from(MAX_FEE),
            "fee overflow",
        )?;
        let net_in = amount_in - fee_part;

        let xp_in = mul(wide(reserve_in), wide(m_in), "scaled reserve overflow")?;
        let xp_out = mul(wide(reserve_out), wide(m_out), "scaled reserve overflow")?;
        let d = if token0_in {
            compute_d(self.amplification, xp_in, xp_out)?
        } else {
            compute_d(self.amplification, xp_out, xp_in)?
        };
        let x = add(
            xp_in,
            mul(wide(net_in), wide(m_in), "scaled input overflow")?,
            "scaled input overflow",
        )?;
        let y = get_y(self.amplification, x, d)?;
        let margin = add(y, wide(1), "output margin overflow")?;
        narrow(xp_out.saturating_sub(margin) / wide(m_out), "amount out overflow")
    }
}

/// A StableSwap pool over two vault-held tokens.
///
/// # Example
///
/// ```rust
/// use vault_amm::config::StablePoolConfig;
/// use vault_amm::domain::{Address, Decimals};
/// use vault_amm::pools::StablePool;
/// use vault_amm::traits::FromConfig;
///
/// let usdc = (Address::from_low_u64(0xa), Decimals::new(6).expect("valid"));
/// let dai = (Address::from_low_u64(0xb), Decimals::new(18).expect("valid"));
/// let config = StablePoolConfig::new(Address::from_low_u64(0x51), usdc, dai, 1000)
///     .expect("valid config");
/// let pool = StablePool::from_config(&config).expect("valid pool");
/// assert_eq!(pool.precision_multipliers(), (1_000_000_000_000, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StablePool {
    state: PairState,
    curve: StableCurve,
}

impl StablePool {
    /// An empty pool.  `decimals0` / `decimals1` belong to the pair's
    /// `token0` / `token1`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] if `amplification` is zero.
    pub fn new(
        address: Address,
        pair: TokenPair,
        decimals0: Decimals,
        decimals1: Decimals,
        amplification: u128,
    ) -> Result<Self> {
        if amplification == 0 {
            return Err(AmmError::InvalidConfiguration("amplification must be positive"));
        }
        Ok(Self {
            state: PairState::new(address, pair),
            curve: StableCurve {
                amplification,
                multiplier0: decimals0.precision_multiplier(),
                multiplier1: decimals1.precision_multiplier(),
            },
        })
    }

    /// Amplification coefficient `A`.
    #[must_use]
    pub const fn amplification(&self) -> u128 {
        self.curve.amplification
    }

    /// `(10^(18 − decimals0), 10^(18 − decimals1))`.
    #[must_use]
    pub const fn precision_multipliers(&self) -> (u128, u128) {
        (self.curve.multiplier0, self.curve.multiplier1)
    }
}

impl FromConfig<StablePoolConfig> for StablePool {
    fn from_config(config: &StablePoolConfig) -> Result<Self> {
        config.validate()?;
        let (decimals0, decimals1) = config.decimals();
        Self::new(
            config.address(),
            *config.token_pair(),
            decimals0,
            decimals1,
            config.amplification(),
        )
    }
}

impl Pool for StablePool {
    fn address(&self) -> Address {
        self.state.address
    }

    fn curve(&self) -> CurveKind {
        CurveKind::Stable
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
        pair::mint(&self.curve, &mut self.state, vault, fees, sender, data)
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
        pair::burn(&self.curve, &mut self.state, vault, fees, data)
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
        pair::burn_single(&self.curve, &mut self.state, vault, fees, sender, data)
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
        pair::swap(&self.curve, &mut self.state, vault, fees, sender, data)
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
        pair::quote(&self.curve, &self.state, fees, sender, token_in, amount_in)
    }

    fn record(&self) -> PoolRecord {
        PoolRecord::from_state(
            &self.state,
            CurveKind::Stable,
            self.precision_multipliers(),
            Some(self.curve.amplification),
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{FeeConfig, DEFAULT_AMPLIFICATION};
    use crate::domain::{Asset, BurnData, BurnSingleData, MintData, SwapData, WithdrawMode};
    use crate::pools::test_support::{fund_pool, give_shares_to_pool, Harness, E18};

    const POOL: Address = Address::from_low_u64(0x51);
    const T0: Address = Address::from_low_u64(0xa);
    const T1: Address = Address::from_low_u64(0xb);
    const WALLET: Address = Address::from_low_u64(0x1);

    fn decimals(d: u8) -> Decimals {
        let Ok(d) = Decimals::new(d) else {
            panic!("valid decimals");
        };
        d
    }

    fn pool_with(d0: u8, d1: u8) -> StablePool {
        let Ok(pair) = TokenPair::new(T0, T1) else {
            panic!("valid pair");
        };
        let Ok(pool) =
            StablePool::new(POOL, pair, decimals(d0), decimals(d1), DEFAULT_AMPLIFICATION)
        else {
            panic!("valid pool");
        };
        pool
    }

    fn seeded_with(d0: u8, d1: u8, amount0: u128, amount1: u128) -> Harness<StablePool> {
        let mut h = Harness::new(pool_with(d0, d1), T0, T1);
        fund_pool(&mut h, amount0, amount1);
        let Ok(_) = h.pool.mint(&mut h.vault, &h.fees, WALLET, &mint_data()) else {
            panic!("seed mint");
        };
        h
    }

    fn seeded(amount0: u128, amount1: u128) -> Harness<StablePool> {
        seeded_with(18, 18, amount0, amount1)
    }

    fn mint_data() -> Vec<u8> {
        MintData { to: WALLET }.encode()
    }

    fn swap_data(token_in: Address) -> Vec<u8> {
        SwapData {
            token_in,
            to: WALLET,
            withdraw_mode: WithdrawMode::Vault,
        }
        .encode()
    }

    fn curve() -> StableCurve {
        pool_with(18, 18).curve
    }

    #[test]
    fn zero_amplification_rejected() {
        let Ok(pair) = TokenPair::new(T0, T1) else {
            panic!("valid pair");
        };
        assert!(matches!(
            StablePool::new(POOL, pair, decimals(18), decimals(18), 0),
            Err(AmmError::InvalidConfiguration(_))
        ));
    }

    // -- curve -------------------------------------------------------------

    #[test]
    fn quote_reference_values() {
        let fee = FeeConfig::DEFAULT_STABLE_SWAP_FEE;
        for (r_in, r_out, expected) in [
            (1, 4, 1_000_299_425_536_644_566u128),
            (5, 10, 999_623_907_351_227_940),
            (1000, 1000, 998_999_002_996_005_985),
        ] {
            let Ok(out) = curve().amount_out(fee, E18, r_in * E18, r_out * E18, true) else {
                panic!("quote");
            };
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn quote_on_empty_reserves_is_zero() {
        let fee = FeeConfig::DEFAULT_STABLE_SWAP_FEE;
        assert_eq!(curve().amount_out(fee, E18, 0, 0, true), Ok(0));
        assert_eq!(curve().amount_out(fee, 0, E18, E18, false), Ok(0));
    }

    #[test]
    fn invariant_reference_value() {
        assert_eq!(curve().invariant(E18, 4 * E18), Ok(4_998_596_337_080_031_245));
    }

    // -- mint --------------------------------------------------------------

    #[test]
    fn first_mint_reference_value() {
        let h = seeded(E18, 4 * E18);
        assert_eq!(
            h.pool.shares().balance_of(WALLET),
            Amount::new(4_998_596_337_080_030_245)
        );
        assert_eq!(
            h.pool.invariant_last(),
            Amount::new(4_998_596_337_080_031_245)
        );
    }

    #[test]
    fn unbalanced_mint_reference_value() {
        let mut h = seeded(E18, 4 * E18);
        fund_pool(&mut h, 4 * E18, 4 * E18);
        let Ok(outcome) = h.pool.mint(&mut h.vault, &h.fees, WALLET, &mint_data()) else {
            panic!("mint");
        };
        assert_eq!(outcome.liquidity(), Amount::new(7_998_332_801_934_917_217));
        assert_eq!(outcome.fee0(), Amount::new(1_500_000_000_000_000));
        assert_eq!(outcome.protocol_liquidity(), Amount::new(751_427_303_785_084));
        assert_eq!(
            h.pool.shares().total_supply(),
            Amount::new(12_997_680_566_318_733_546)
        );
    }

    #[test]
    fn one_sided_first_mint_fails() {
        let mut h = Harness::new(pool_with(18, 18), T0, T1);
        fund_pool(&mut h, E18, 0);
        assert_eq!(
            h.pool.mint(&mut h.vault, &h.fees, WALLET, &mint_data()),
            Err(AmmError::InsufficientLiquidityMinted)
        );
        assert!(h.pool.shares().total_supply().is_zero());
        assert_eq!(h.pool.reserves(), (Amount::ZERO, Amount::ZERO));
    }

    // -- mixed decimals ----------------------------------------------------

    #[test]
    fn mixed_decimals_scale_to_common_basis() {
        const USDC: u128 = 1_000_000;
        let mut h = seeded_with(6, 18, 1_000 * USDC, 1_000 * E18);
        assert_eq!(
            h.pool.shares().balance_of(WALLET),
            Amount::new(1_999_999_999_999_999_999_000)
        );

        fund_pool(&mut h, 100 * USDC, 0);
        let Ok(outcome) = h.pool.swap(&mut h.vault, &h.fees, WALLET, &swap_data(T0)) else {
            panic!("swap t0");
        };
        assert_eq!(outcome.amount_out(), Amount::new(99_889_930_684_894_315_113));

        fund_pool(&mut h, 0, 50 * E18);
        let Ok(outcome) = h.pool.swap(&mut h.vault, &h.fees, WALLET, &swap_data(T1)) else {
            panic!("swap t1");
        };
        assert_eq!(outcome.amount_out(), Amount::new(49_957_576));
        assert_eq!(
            h.pool.reserves(),
            (
                Amount::new(1_050_042_424),
                Amount::new(950_110_069_315_105_684_887)
            )
        );
    }

    // -- burn --------------------------------------------------------------

    #[test]
    fn burn_reference_value() {
        let mut h = seeded(E18, 4 * E18);
        give_shares_to_pool(&mut h, WALLET, 500_000);
        let data = BurnData {
            to: WALLET,
            withdraw_mode: WithdrawMode::Vault,
        }
        .encode();
        let Ok(outcome) = h.pool.burn(&mut h.vault, &h.fees, WALLET, &data) else {
            panic!("burn");
        };
        assert_eq!(outcome.amount0(), Amount::new(100_028));
        assert_eq!(outcome.amount1(), Amount::new(400_112));
        assert_eq!(
            h.vault.balance_of(Asset::Token(T1), WALLET),
            Amount::new(400_112)
        );
    }

    #[test]
    fn burn_single_reference_values() {
        for (token_out, expected0, expected1) in [(T0, 498_574u128, 0u128), (T1, 0, 500_332)] {
            let mut h = seeded(E18, 4 * E18);
            give_shares_to_pool(&mut h, WALLET, 500_000);
            let data = BurnSingleData {
                token_out,
                to: WALLET,
                withdraw_mode: WithdrawMode::Vault,
            }
            .encode();
            let Ok(outcome) = h.pool.burn_single(&mut h.vault, &h.fees, WALLET, &data) else {
                panic!("burn single");
            };
            assert_eq!(outcome.amount0(), Amount::new(expected0));
            assert_eq!(outcome.amount1(), Amount::new(expected1));
        }
    }

    // -- swap --------------------------------------------------------------

    #[test]
    fn swap_matches_quote() {
        let mut h = seeded(E18, 4 * E18);
        let Ok(quoted) = h.pool.get_amount_out(&h.fees, WALLET, T0, Amount::new(E18 / 10)) else {
            panic!("quote");
        };
        assert_eq!(quoted, Amount::new(100_163_353_224_290_656));
        fund_pool(&mut h, E18 / 10, 0);
        let Ok(outcome) = h.pool.swap(&mut h.vault, &h.fees, WALLET, &swap_data(T0)) else {
            panic!("swap");
        };
        assert_eq!(outcome.amount_out(), quoted);
        assert_eq!(outcome.fee_rate(), FeeConfig::DEFAULT_STABLE_SWAP_FEE);
    }

    #[test]
    fn record_carries_curve_parameters() {
        let h = seeded_with(6, 18, 1_000_000, E18);
        let record = h.pool.record();
        assert_eq!(record.curve, CurveKind::Stable);
        assert_eq!(record.amplification, Some(DEFAULT_AMPLIFICATION));
        assert_eq!(record.precision_multiplier0, 1_000_000_000_000);
        assert_eq!(record.precision_multiplier1, 1);
    }
}
