//! Property-based tests using `proptest` for engine invariants.
//!
//! 1. **Share conservation**: holder balances always sum to total supply.
//! 2. **Classic invariant growth**: `x · y` never decreases across swaps.
//! 3. **Stable invariant growth**: `D` never decreases across swaps.
//! 4. **Round trip**: mint then burn returns no more than was deposited.
//! 5. **Vault conservation**: ledger entries sum to the tracked reserve,
//!    which never exceeds what the vault actually holds.

use primitive_types::U256;
use proptest::prelude::*;

use super::test_support::{fund_pool, give_shares_to_pool, Harness, E18, VAULT};
use super::{ClassicPool, StablePool};
use crate::domain::{
    Address, Amount, Asset, BurnData, Decimals, MintData, SwapData, TokenPair, WithdrawMode,
};
use crate::math::compute_d;
use crate::traits::Pool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const T0: Address = Address::from_low_u64(0xa);
const T1: Address = Address::from_low_u64(0xb);
const ALICE: Address = Address::from_low_u64(1);
const BOB: Address = Address::from_low_u64(2);

fn pair() -> TokenPair {
    let Ok(pair) = TokenPair::new(T0, T1) else {
        panic!("valid pair");
    };
    pair
}

fn classic() -> Harness<ClassicPool> {
    Harness::new(ClassicPool::new(Address::from_low_u64(0xc1), pair()), T0, T1)
}

fn stable(amplification: u128) -> Harness<StablePool> {
    let Ok(pool) = StablePool::new(
        Address::from_low_u64(0x51),
        pair(),
        Decimals::MAX,
        Decimals::MAX,
        amplification,
    ) else {
        panic!("valid stable pool");
    };
    Harness::new(pool, T0, T1)
}

fn mint_to<P: Pool>(h: &mut Harness<P>, a0: u128, a1: u128, to: Address) -> Option<Amount> {
    fund_pool(h, a0, a1);
    let data = MintData { to }.encode();
    h.pool
        .mint(&mut h.vault, &h.fees, to, &data)
        .ok()
        .map(|o| o.liquidity())
}

fn swap_in<P: Pool>(h: &mut Harness<P>, token0_in: bool, amount: u128) -> bool {
    let token_in = if token0_in { h.token0 } else { h.token1 };
    if token0_in {
        fund_pool(h, amount, 0);
    } else {
        fund_pool(h, 0, amount);
    }
    let data = SwapData {
        token_in,
        to: BOB,
        withdraw_mode: WithdrawMode::Vault,
    }
    .encode();
    h.pool.swap(&mut h.vault, &h.fees, BOB, &data).is_ok()
}

fn product(pool: &impl Pool) -> U256 {
    let (r0, r1) = pool.reserves();
    U256::from(r0.get()) * U256::from(r1.get())
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values between one millionth of a token and ten million tokens.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000_000_000u128..=10_000_000 * E18
}

/// Swap size as a fraction (per mille) of the input reserve.
fn swap_fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=500u128
}

fn amplification_strategy() -> impl Strategy<Value = u128> {
    1u128..=5_000u128
}

// ---------------------------------------------------------------------------
// Property 1: Share Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_shares_sum_to_supply(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        extra in reserve_strategy(),
        fraction in swap_fraction_strategy(),
    ) {
        let mut h = classic();
        let Some(_) = mint_to(&mut h, r0, r1, ALICE) else {
            return Ok(());
        };
        let _ = swap_in(&mut h, true, r0 * fraction / 1_000);
        let _ = mint_to(&mut h, extra, extra / 2, BOB);

        let shares = h.pool.shares();
        prop_assert_eq!(shares.holders_sum(), shares.total_supply());

        let half = shares.balance_of(ALICE).get() / 2;
        give_shares_to_pool(&mut h, ALICE, half);
        let data = BurnData { to: ALICE, withdraw_mode: WithdrawMode::Vault }.encode();
        let _ = h.pool.burn(&mut h.vault, &h.fees, ALICE, &data);

        let shares = h.pool.shares();
        prop_assert_eq!(shares.holders_sum(), shares.total_supply());
    }
}

// ---------------------------------------------------------------------------
// Property 2-3: Invariant Growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_classic_product_never_decreases(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fractions in prop::collection::vec((any::<bool>(), swap_fraction_strategy()), 1..6),
    ) {
        let mut h = classic();
        let Some(_) = mint_to(&mut h, r0, r1, ALICE) else {
            return Ok(());
        };
        for (token0_in, fraction) in fractions {
            let before = product(&h.pool);
            let (res0, res1) = h.pool.reserves();
            let reserve_in = if token0_in { res0.get() } else { res1.get() };
            let amount = (reserve_in * fraction / 1_000).max(1);
            if !swap_in(&mut h, token0_in, amount) {
                continue;
            }
            prop_assert!(product(&h.pool) >= before, "x·y decreased");
        }
    }

    #[test]
    fn prop_stable_d_never_decreases(
        reserve in reserve_strategy(),
        amp in amplification_strategy(),
        fractions in prop::collection::vec((any::<bool>(), swap_fraction_strategy()), 1..6),
    ) {
        let mut h = stable(amp);
        let Some(_) = mint_to(&mut h, reserve, reserve, ALICE) else {
            return Ok(());
        };
        let d_of = |pool: &StablePool| {
            let (r0, r1) = pool.reserves();
            compute_d(amp, U256::from(r0.get()), U256::from(r1.get()))
        };
        for (token0_in, fraction) in fractions {
            let Ok(before) = d_of(&h.pool) else {
                return Ok(());
            };
            let amount = (reserve * fraction / 1_000).max(1);
            if !swap_in(&mut h, token0_in, amount) {
                continue;
            }
            let Ok(after) = d_of(&h.pool) else {
                return Ok(());
            };
            prop_assert!(after >= before, "D decreased: {} < {}", after, before);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Mint / Burn Round Trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_mint_then_burn_returns_at_most_deposit(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        a0 in reserve_strategy(),
    ) {
        let mut h = classic();
        let Some(_) = mint_to(&mut h, r0, r1, ALICE) else {
            return Ok(());
        };
        // proportional second deposit
        let a1 = (U256::from(a0) * U256::from(r1) / U256::from(r0)).low_u128();
        let Some(liquidity) = mint_to(&mut h, a0, a1, BOB) else {
            return Ok(());
        };
        give_shares_to_pool(&mut h, BOB, liquidity.get());
        let data = BurnData { to: BOB, withdraw_mode: WithdrawMode::Vault }.encode();
        let Ok(out) = h.pool.burn(&mut h.vault, &h.fees, BOB, &data) else {
            return Ok(());
        };
        prop_assert!(out.amount0().get() <= a0);
        prop_assert!(out.amount1().get() <= a1);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Vault Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_vault_ledger_matches_reserve(
        deposits in prop::collection::vec((1u128..=E18, any::<bool>()), 1..8),
        donation in 0u128..=E18,
        moved in 0u128..=E18,
    ) {
        let mut h = classic();
        let asset = Asset::Token(T0);
        for (amount, to_alice) in deposits {
            let owner = if to_alice { ALICE } else { BOB };
            let Ok(()) = h.vault.host_mut().mint(T0, owner, Amount::new(amount)) else {
                panic!("host mint");
            };
            h.vault.host_mut().approve(T0, owner, VAULT, Amount::new(amount));
            let _ = h.vault.transfer_and_deposit(owner, asset, owner, Amount::new(amount));
        }
        // tokens sent without a deposit stay outside the ledger
        if donation > 0 {
            let Ok(()) = h.vault.host_mut().mint(T0, VAULT, Amount::new(donation)) else {
                panic!("host mint");
            };
        }
        let _ = h.vault.transfer(ALICE, asset, BOB, Amount::new(moved));

        prop_assert_eq!(h.vault.ledger_total(asset), h.vault.reserve_of(asset));
        prop_assert!(h.vault.reserve_of(asset) <= h.vault.held(asset));
    }

    #[test]
    fn prop_zero_vault_transfer_is_noop(amount in 0u128..=E18) {
        let mut h = classic();
        let asset = Asset::Token(T1);
        let Ok(()) = h.vault.host_mut().mint(T1, VAULT, Amount::new(amount)) else {
            panic!("host mint");
        };
        let _ = h.vault.deposit(ALICE, asset, ALICE, Amount::ZERO);
        let before = h.vault.records();
        let Ok(()) = h.vault.transfer(ALICE, asset, BOB, Amount::ZERO) else {
            panic!("zero transfer");
        };
        prop_assert_eq!(h.vault.records(), before);
    }
}
