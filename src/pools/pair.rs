//! The two-token engine shared by every curve.
//!
//! Both pool flavours keep the same state (reserves, share ledger,
//! protocol-fee baseline) and run the same mint / burn / burn-single /
//! swap bookkeeping.  Only the invariant and the output quote differ, and
//! those are supplied by a [`Curve`].
//!
//! # Commit Order
//!
//! Every operation computes all of its results first, then performs vault
//! payouts, then writes pool state.  Any error before the first payout
//! leaves everything untouched.
//!
//! # Protocol Fee
//!
//! On liquidity events, growth of the invariant since the last event is
//! partly minted to the fee recipient:
//!
//! ```text
//! shares = supply · (I − I_last) · pf / ((MAX_FEE − pf) · I + pf · I_last)
//! ```
//!
//! `I_last` is refreshed only while a recipient is configured; turning the
//! recipient off resets it to zero.

use tracing::{debug, warn};

use crate::domain::{
    Address, Amount, Asset, BurnData, BurnOutcome, BurnSingleData, CurveKind, FeeRate, MintData,
    MintOutcome, PoolId, SwapData, SwapOutcome, TokenPair,
};
use crate::error::{AmmError, Result};
use crate::math::wide::{add, div, mul, mul_div, narrow, wide};
use crate::math::MAX_FEE;
use crate::traits::{BalanceVault, FeeSource};

use super::ShareLedger;

/// Shares permanently locked at [`Address::ZERO`] by the first mint.
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// Post-trade figures handed to [`Curve::verify_swap`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct SwapCheck {
    pub fee: FeeRate,
    pub amount_in: u128,
    pub reserve_in: u128,
    pub reserve_out: u128,
    pub balance_in: u128,
    pub balance_out: u128,
}

/// Pricing behaviour plugged into the shared engine.
pub(crate) trait Curve {
    const KIND: CurveKind;

    /// Invariant of the given token balances.
    fn invariant(&self, balance0: u128, balance1: u128) -> Result<u128>;

    /// Invariant rounded up, used as the divisor when pricing new shares.
    fn invariant_ceil(&self, balance0: u128, balance1: u128) -> Result<u128> {
        self.invariant(balance0, balance1)
    }

    /// Output for `amount_in` against the given reserves; zero input
    /// yields zero.
    fn amount_out(
        &self,
        fee: FeeRate,
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
        token0_in: bool,
    ) -> Result<u128>;

    /// Extra post-trade check; accepts everything unless overridden.
    fn verify_swap(&self, _check: &SwapCheck) -> Result<()> {
        Ok(())
    }
}

/// State common to both curves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PairState {
    pub address: Address,
    pub pair: TokenPair,
    pub reserve0: Amount,
    pub reserve1: Amount,
    pub invariant_last: Amount,
    pub shares: ShareLedger,
}

impl PairState {
    pub(crate) fn new(address: Address, pair: TokenPair) -> Self {
        Self {
            address,
            pair,
            reserve0: Amount::ZERO,
            reserve1: Amount::ZERO,
            invariant_last: Amount::ZERO,
            shares: ShareLedger::new(),
        }
    }

    fn id<C: Curve>(&self) -> PoolId {
        PoolId::new(self.address, C::KIND)
    }

    fn vault_balances<V: BalanceVault + ?Sized>(&self, vault: &V) -> (u128, u128) {
        (
            vault
                .balance_of(Asset::Token(self.pair.token0()), self.address)
                .get(),
            vault
                .balance_of(Asset::Token(self.pair.token1()), self.address)
                .get(),
        )
    }

    /// Payouts to the pool itself would never leave its vault balance.
    fn check_recipient(&self, to: Address) -> Result<()> {
        if to == self.address {
            return Err(AmmError::InvalidCallData("recipient is the pool"));
        }
        Ok(())
    }

    fn reserves_for(&self, token0_in: bool) -> (u128, u128) {
        let (r0, r1) = (self.reserve0.get(), self.reserve1.get());
        if token0_in {
            (r0, r1)
        } else {
            (r1, r0)
        }
    }

    fn commit_reserves(&mut self, balance0: u128, balance1: u128) {
        self.reserve0 = Amount::new(balance0);
        self.reserve1 = Amount::new(balance1);
    }
}

/// Protocol-fee shares owed for invariant growth, not yet minted.
struct ProtocolFee {
    recipient: Option<Address>,
    liquidity: u128,
}

impl ProtocolFee {
    const fn is_on(&self) -> bool {
        self.recipient.is_some()
    }

    /// Supply once the owed shares are minted.
    fn supply_after(&self, shares: &ShareLedger) -> Result<u128> {
        shares
            .total_supply()
            .get()
            .checked_add(self.liquidity)
            .ok_or(AmmError::Overflow("share supply overflow"))
    }

    fn commit(&self, shares: &mut ShareLedger) -> Result<()> {
        match self.recipient {
            Some(recipient) if self.liquidity != 0 => {
                shares.mint(recipient, Amount::new(self.liquidity))
            }
            _ => Ok(()),
        }
    }
}

fn protocol_fee<F>(state: &PairState, id: PoolId, fees: &F, invariant: u128) -> Result<ProtocolFee>
where
    F: FeeSource + ?Sized,
{
    let recipient = match fees.fee_recipient() {
        Some(r) if r.is_zero() => {
            warn!(pool = %id.address, "fee recipient is the zero address; protocol fee skipped");
            None
        }
        other => other,
    };
    let last = state.invariant_last.get();
    let mut liquidity = 0;
    if recipient.is_some() && last != 0 && invariant > last {
        let rate = u128::from(fees.protocol_fee(id).get());
        let supply = state.shares.total_supply().get();
        let numerator = mul(
            mul(wide(supply), wide(invariant - last), "protocol fee overflow")?,
            wide(rate),
            "protocol fee overflow",
        )?;
        let denominator = add(
            mul(
                wide(u128::from(MAX_FEE) - rate),
                wide(invariant),
                "protocol fee overflow",
            )?,
            mul(wide(rate), wide(last), "protocol fee overflow")?,
            "protocol fee overflow",
        )?;
        liquidity = narrow(div(numerator, denominator)?, "protocol fee shares")?;
    }
    Ok(ProtocolFee {
        recipient,
        liquidity,
    })
}

/// Fee charged on the over-supplied side of an unbalanced deposit: half
/// the swap fee on the excess over the reserve ratio.
fn unbalanced_mint_fee(
    fee: FeeRate,
    amount0: u128,
    amount1: u128,
    reserve0: u128,
    reserve1: u128,
) -> Result<(u128, u128)> {
    if reserve0 == 0 || reserve1 == 0 {
        return Ok((0, 0));
    }
    let rate = u128::from(fee.get());
    let denominator = 2 * u128::from(MAX_FEE);
    let amount1_optimal = mul_div(amount0, reserve1, reserve0, "optimal amount overflow")?;
    if amount1 >= amount1_optimal {
        let fee1 = mul_div(rate, amount1 - amount1_optimal, denominator, "mint fee overflow")?;
        Ok((0, fee1))
    } else {
        let amount0_optimal = mul_div(amount1, reserve0, reserve1, "optimal amount overflow")?;
        let excess = amount0.saturating_sub(amount0_optimal);
        let fee0 = mul_div(rate, excess, denominator, "mint fee overflow")?;
        Ok((fee0, 0))
    }
}

fn checked_sub(a: u128, b: u128, context: &'static str) -> Result<u128> {
    a.checked_sub(b).ok_or(AmmError::Overflow(context))
}

fn checked_add(a: u128, b: u128, context: &'static str) -> Result<u128> {
    a.checked_add(b).ok_or(AmmError::Overflow(context))
}

// -- operations ---------------------------------------------------------------

pub(crate) fn mint<C, V, F>(
    curve: &C,
    state: &mut PairState,
    vault: &V,
    fees: &F,
    sender: Address,
    data: &[u8],
) -> Result<MintOutcome>
where
    C: Curve,
    V: BalanceVault + ?Sized,
    F: FeeSource + ?Sized,
{
    let MintData { to } = MintData::decode(data)?;
    let id = state.id::<C>();
    let (reserve0, reserve1) = (state.reserve0.get(), state.reserve1.get());
    let (balance0, balance1) = state.vault_balances(vault);
    let amount0 = checked_sub(balance0, reserve0, "balance below reserve")?;
    let amount1 = checked_sub(balance1, reserve1, "balance below reserve")?;
    if state.shares.total_supply().get() == 0 && (amount0 == 0 || amount1 == 0) {
        return Err(AmmError::InsufficientLiquidityMinted);
    }
    let new_invariant = curve.invariant(balance0, balance1)?;

    let swap_fee = fees.swap_fee(id, sender, None, None, data);
    let (fee0, fee1) = unbalanced_mint_fee(swap_fee, amount0, amount1, reserve0, reserve1)?;
    let old0 = checked_add(reserve0, fee0, "fee-adjusted reserve overflow")?;
    let old1 = checked_add(reserve1, fee1, "fee-adjusted reserve overflow")?;
    let old_invariant = curve.invariant(old0, old1)?;

    let protocol = protocol_fee(state, id, fees, old_invariant)?;
    let supply = protocol.supply_after(&state.shares)?;

    let (liquidity, locked) = if supply == 0 {
        let liquidity = new_invariant
            .checked_sub(MINIMUM_LIQUIDITY)
            .ok_or(AmmError::InsufficientLiquidityMinted)?;
        (liquidity, MINIMUM_LIQUIDITY)
    } else {
        // Rounded-up baseline keeps a mint-then-burn from paying out more
        // than was deposited.
        let baseline = curve.invariant_ceil(old0, old1)?;
        let growth = new_invariant
            .checked_sub(baseline)
            .ok_or(AmmError::InsufficientLiquidityMinted)?;
        (mul_div(growth, supply, baseline, "minted shares overflow")?, 0)
    };
    if liquidity == 0 {
        return Err(AmmError::InsufficientLiquidityMinted);
    }
    checked_add(
        checked_add(supply, locked, "share supply overflow")?,
        liquidity,
        "share supply overflow",
    )?;

    protocol.commit(&mut state.shares)?;
    if locked != 0 {
        state.shares.mint(Address::ZERO, Amount::new(locked))?;
    }
    state.shares.mint(to, Amount::new(liquidity))?;
    state.commit_reserves(balance0, balance1);
    state.invariant_last = Amount::new(if protocol.is_on() { new_invariant } else { 0 });

    debug!(
        pool = %state.address,
        curve = %C::KIND,
        %to,
        liquidity,
        protocol_liquidity = protocol.liquidity,
        amount0,
        amount1,
        fee0,
        fee1,
        "mint"
    );
    Ok(MintOutcome::new(
        Amount::new(liquidity),
        Amount::new(protocol.liquidity),
        (Amount::new(amount0), Amount::new(amount1)),
        (Amount::new(fee0), Amount::new(fee1)),
    ))
}

/// Balanced burn figures shared by `burn` and `burn_single`.
struct BurnPlan {
    protocol: ProtocolFee,
    liquidity: u128,
    balance0: u128,
    balance1: u128,
    amount0: u128,
    amount1: u128,
}

fn plan_burn<C, V, F>(curve: &C, state: &PairState, vault: &V, fees: &F) -> Result<BurnPlan>
where
    C: Curve,
    V: BalanceVault + ?Sized,
    F: FeeSource + ?Sized,
{
    let (balance0, balance1) = state.vault_balances(vault);
    let liquidity = state.shares.balance_of(state.address).get();
    if liquidity == 0 {
        return Err(AmmError::InsufficientLiquidityBurned);
    }
    let protocol = protocol_fee(
        state,
        state.id::<C>(),
        fees,
        curve.invariant(balance0, balance1)?,
    )?;
    let supply = protocol.supply_after(&state.shares)?;
    let amount0 = mul_div(liquidity, balance0, supply, "burn amount overflow")?;
    let amount1 = mul_div(liquidity, balance1, supply, "burn amount overflow")?;
    Ok(BurnPlan {
        protocol,
        liquidity,
        balance0,
        balance1,
        amount0,
        amount1,
    })
}

fn commit_burn(
    state: &mut PairState,
    plan: &BurnPlan,
    invariant_after: u128,
    balance0: u128,
    balance1: u128,
) -> Result<()> {
    plan.protocol.commit(&mut state.shares)?;
    state
        .shares
        .burn(state.address, Amount::new(plan.liquidity))?;
    state.commit_reserves(balance0, balance1);
    state.invariant_last = Amount::new(invariant_after);
    Ok(())
}

pub(crate) fn burn<C, V, F>(
    curve: &C,
    state: &mut PairState,
    vault: &mut V,
    fees: &F,
    data: &[u8],
) -> Result<BurnOutcome>
where
    C: Curve,
    V: BalanceVault + ?Sized,
    F: FeeSource + ?Sized,
{
    let BurnData { to, withdraw_mode } = BurnData::decode(data)?;
    state.check_recipient(to)?;
    let plan = plan_burn(curve, state, vault, fees)?;
    let rest0 = checked_sub(plan.balance0, plan.amount0, "burn exceeds balance")?;
    let rest1 = checked_sub(plan.balance1, plan.amount1, "burn exceeds balance")?;
    let invariant_after = if plan.protocol.is_on() {
        curve.invariant(rest0, rest1)?
    } else {
        0
    };

    let pool = state.address;
    vault.withdraw_alternative(
        pool,
        Asset::Token(state.pair.token0()),
        to,
        Amount::new(plan.amount0),
        withdraw_mode,
    )?;
    vault.withdraw_alternative(
        pool,
        Asset::Token(state.pair.token1()),
        to,
        Amount::new(plan.amount1),
        withdraw_mode,
    )?;
    commit_burn(state, &plan, invariant_after, rest0, rest1)?;

    debug!(
        pool = %pool,
        curve = %C::KIND,
        %to,
        liquidity = plan.liquidity,
        amount0 = plan.amount0,
        amount1 = plan.amount1,
        "burn"
    );
    Ok(BurnOutcome::new(
        Amount::new(plan.liquidity),
        Amount::new(plan.amount0),
        Amount::new(plan.amount1),
    ))
}

pub(crate) fn burn_single<C, V, F>(
    curve: &C,
    state: &mut PairState,
    vault: &mut V,
    fees: &F,
    sender: Address,
    data: &[u8],
) -> Result<BurnOutcome>
where
    C: Curve,
    V: BalanceVault + ?Sized,
    F: FeeSource + ?Sized,
{
    let BurnSingleData {
        token_out,
        to,
        withdraw_mode,
    } = BurnSingleData::decode(data)?;
    state.check_recipient(to)?;
    let out_is_token0 = state.pair.is_token0(token_out)?;
    let token_in = state.pair.other(token_out)?;
    let plan = plan_burn(curve, state, vault, fees)?;
    let rest0 = checked_sub(plan.balance0, plan.amount0, "burn exceeds balance")?;
    let rest1 = checked_sub(plan.balance1, plan.amount1, "burn exceeds balance")?;

    let fee = fees.swap_fee(state.id::<C>(), sender, Some(token_in), Some(token_out), data);
    let (amount0, amount1, balance0, balance1) = if out_is_token0 {
        let swapped = curve.amount_out(fee, plan.amount1, rest1, rest0, false)?;
        let out = checked_add(plan.amount0, swapped, "burn output overflow")?;
        let left = checked_sub(plan.balance0, out, "burn exceeds balance")?;
        (out, 0, left, plan.balance1)
    } else {
        let swapped = curve.amount_out(fee, plan.amount0, rest0, rest1, true)?;
        let out = checked_add(plan.amount1, swapped, "burn output overflow")?;
        let left = checked_sub(plan.balance1, out, "burn exceeds balance")?;
        (0, out, plan.balance0, left)
    };
    let invariant_after = if plan.protocol.is_on() {
        curve.invariant(balance0, balance1)?
    } else {
        0
    };

    let pool = state.address;
    vault.withdraw_alternative(
        pool,
        Asset::Token(token_out),
        to,
        Amount::new(amount0.max(amount1)),
        withdraw_mode,
    )?;
    commit_burn(state, &plan, invariant_after, balance0, balance1)?;

    debug!(
        pool = %pool,
        curve = %C::KIND,
        %to,
        %token_out,
        liquidity = plan.liquidity,
        amount0,
        amount1,
        "burn single"
    );
    Ok(BurnOutcome::new(
        Amount::new(plan.liquidity),
        Amount::new(amount0),
        Amount::new(amount1),
    ))
}

pub(crate) fn swap<C, V, F>(
    curve: &C,
    state: &mut PairState,
    vault: &mut V,
    fees: &F,
    sender: Address,
    data: &[u8],
) -> Result<SwapOutcome>
where
    C: Curve,
    V: BalanceVault + ?Sized,
    F: FeeSource + ?Sized,
{
    let SwapData {
        token_in,
        to,
        withdraw_mode,
    } = SwapData::decode(data)?;
    state.check_recipient(to)?;
    let token0_in = state.pair.is_token0(token_in)?;
    let token_out = state.pair.other(token_in)?;
    let (reserve_in, reserve_out) = state.reserves_for(token0_in);
    let (balance0, balance1) = state.vault_balances(vault);
    let (balance_in, balance_out) = if token0_in {
        (balance0, balance1)
    } else {
        (balance1, balance0)
    };

    let amount_in = checked_sub(balance_in, reserve_in, "balance below reserve")?;
    let fee = fees.swap_fee(state.id::<C>(), sender, Some(token_in), Some(token_out), data);
    let amount_out = curve.amount_out(fee, amount_in, reserve_in, reserve_out, token0_in)?;
    if amount_out == 0 {
        return Err(AmmError::InsufficientOutputAmount);
    }
    let balance_out = checked_sub(balance_out, amount_out, "output exceeds balance")?;
    curve.verify_swap(&SwapCheck {
        fee,
        amount_in,
        reserve_in,
        reserve_out,
        balance_in,
        balance_out,
    })?;

    let pool = state.address;
    vault.withdraw_alternative(
        pool,
        Asset::Token(token_out),
        to,
        Amount::new(amount_out),
        withdraw_mode,
    )?;
    if token0_in {
        state.commit_reserves(balance_in, balance_out);
    } else {
        state.commit_reserves(balance_out, balance_in);
    }

    debug!(
        pool = %pool,
        curve = %C::KIND,
        %token_in,
        %token_out,
        amount_in,
        amount_out,
        fee = %fee,
        "swap"
    );
    Ok(SwapOutcome::new(
        token_in,
        token_out,
        Amount::new(amount_in),
        Amount::new(amount_out),
        fee,
    ))
}

pub(crate) fn quote<C, F>(
    curve: &C,
    state: &PairState,
    fees: &F,
    sender: Address,
    token_in: Address,
    amount_in: Amount,
) -> Result<Amount>
where
    C: Curve,
    F: FeeSource + ?Sized,
{
    let token0_in = state.pair.is_token0(token_in)?;
    let token_out = state.pair.other(token_in)?;
    let (reserve_in, reserve_out) = state.reserves_for(token0_in);
    let fee = fees.swap_fee(state.id::<C>(), sender, Some(token_in), Some(token_out), &[]);
    curve
        .amount_out(fee, amount_in.get(), reserve_in, reserve_out, token0_in)
        .map(Amount::new)
}
