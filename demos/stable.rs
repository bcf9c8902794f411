//! StableSwap pool with mixed decimals, driven through a shared vault.
//!
//! Demonstrates a USDC (6 decimals) / DAI (18 decimals) pool: seeding,
//! comparing quotes across amplification, swapping near the peg and a
//! single-sided exit.
//!
//! # Run
//!
//! ```bash
//! cargo run --example stable
//! ```

use vault_amm::config::{FeeConfig, PoolConfig, StablePoolConfig};
use vault_amm::domain::{
    Address, Amount, Asset, BurnSingleData, Decimals, MintData, SwapData, WithdrawMode,
};
use vault_amm::factory::DefaultPoolFactory;
use vault_amm::host::InMemoryHost;
use vault_amm::pools::PoolBox;
use vault_amm::traits::{AssetHost, Pool};
use vault_amm::vault::Vault;

const USDC_UNIT: u128 = 1_000_000;
const DAI_UNIT: u128 = 1_000_000_000_000_000_000;

fn stable_pool(
    address: u64,
    usdc: (Address, Decimals),
    dai: (Address, Decimals),
    amplification: u128,
) -> Result<PoolBox, Box<dyn std::error::Error>> {
    let config = StablePoolConfig::new(Address::from_low_u64(address), usdc, dai, amplification)?;
    Ok(DefaultPoolFactory::create(&PoolConfig::from(config))?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== StableSwap pool behind a vault ===\n");

    // ── 1. Accounts and tokens ──────────────────────────────────────────
    let vault_address = Address::from_low_u64(0xfa);
    let usdc = (Address::from_low_u64(0xc0), Decimals::new(6)?);
    let dai = (Address::from_low_u64(0xd1), Decimals::new(18)?);
    let lp = Address::from_low_u64(1);
    let trader = Address::from_low_u64(2);

    let mut vault = Vault::new(vault_address, InMemoryHost::new(Address::from_low_u64(0xeeee)));
    for user in [lp, trader] {
        vault.host_mut().mint(usdc.0, user, Amount::new(2_000_000 * USDC_UNIT))?;
        vault.host_mut().mint(dai.0, user, Amount::new(2_000_000 * DAI_UNIT))?;
        vault.host_mut().approve(usdc.0, user, vault_address, Amount::MAX);
        vault.host_mut().approve(dai.0, user, vault_address, Amount::MAX);
    }
    let fees = FeeConfig::default();

    // ── 2. Two pools over the same vault, different amplification ──────
    let mut pools = vec![stable_pool(0x51, usdc, dai, 10)?, stable_pool(0x52, usdc, dai, 1_000)?];
    for pool in &mut pools {
        vault.transfer_and_deposit(
            lp,
            Asset::Token(usdc.0),
            pool.address(),
            Amount::new(1_000_000 * USDC_UNIT),
        )?;
        vault.transfer_and_deposit(
            lp,
            Asset::Token(dai.0),
            pool.address(),
            Amount::new(1_000_000 * DAI_UNIT),
        )?;
        let minted = pool.mint(&mut vault, &fees, lp, &MintData { to: lp }.encode())?;
        println!(
            "Seeded {} with 1M USDC + 1M DAI, A = {:?}: {} LP",
            pool.address(),
            pool.record().amplification,
            minted.liquidity()
        );
    }

    // ── 3. Quote 100 000 USDC on both curves ────────────────────────────
    let amount_in = Amount::new(100_000 * USDC_UNIT);
    println!("\n--- Quotes for {amount_in} USDC units ---");
    for pool in &pools {
        let out = pool.get_amount_out(&fees, trader, usdc.0, amount_in)?;
        println!("  {} -> {out} DAI units", pool.address());
    }

    // ── 4. Swap on the high-A pool, DAI leaves the vault ────────────────
    let pool = &mut pools[1];
    vault.transfer_and_deposit(trader, Asset::Token(usdc.0), pool.address(), amount_in)?;
    let data = SwapData {
        token_in: usdc.0,
        to: trader,
        withdraw_mode: WithdrawMode::Wrapped,
    };
    let swap = pool.swap(&mut vault, &fees, trader, &data.encode())?;
    println!("\n--- Swap ---");
    println!("  {swap}");
    println!("  Trader DAI:  {}", vault.host().token_balance(dai.0, trader));

    // ── 5. Single-sided exit into DAI ───────────────────────────────────
    let shares = Amount::new(pool.shares().balance_of(lp).get() / 10);
    pool.transfer_shares(lp, pool.address(), shares)?;
    let data = BurnSingleData {
        token_out: dai.0,
        to: lp,
        withdraw_mode: WithdrawMode::Vault,
    };
    let burned = pool.burn_single(&mut vault, &fees, lp, &data.encode())?;
    println!("\n--- Burn single ({shares} LP) ---");
    println!("  Returned:    {} / {}", burned.amount0(), burned.amount1());
    println!("  LP DAI in vault: {}", vault.balance_of(Asset::Token(dai.0), lp));
    println!("  Reserves:    {:?}", pool.reserves());

    println!("\n=== Done ===");
    Ok(())
}
