//! Classic constant-product pool driven through a shared vault.
//!
//! Demonstrates funding a vault, creating a classic pool via the factory,
//! adding liquidity, swapping, exiting and inspecting the persisted
//! records.
//!
//! # Run
//!
//! ```bash
//! cargo run --example classic
//! ```

use vault_amm::config::{ClassicPoolConfig, FeeConfig, PoolConfig};
use vault_amm::domain::{Address, Amount, Asset, BurnData, MintData, SwapData, WithdrawMode};
use vault_amm::factory::DefaultPoolFactory;
use vault_amm::host::InMemoryHost;
use vault_amm::traits::{AssetHost, Pool};
use vault_amm::vault::Vault;

const E18: u128 = 1_000_000_000_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Classic pool (x · y = k) behind a vault ===\n");

    // ── 1. Accounts and tokens ──────────────────────────────────────────
    let vault_address: Address = "0x00000000000000000000000000000000000000fa".parse()?;
    let weth: Address = "0x000000000000000000000000000000000000eeee".parse()?;
    let dai = Address::from_low_u64(0xd1);
    let usdc = Address::from_low_u64(0xc0);
    let alice = Address::from_low_u64(1);
    let bob = Address::from_low_u64(2);
    let treasury = Address::from_low_u64(0xfee);

    let mut vault = Vault::new(vault_address, InMemoryHost::new(weth));
    for user in [alice, bob] {
        for token in [dai, usdc] {
            vault.host_mut().mint(token, user, Amount::new(1_000 * E18))?;
            vault.host_mut().approve(token, user, vault_address, Amount::MAX);
        }
    }
    println!("Alice and Bob hold 1 000 DAI and 1 000 USDC each");

    // ── 2. Create the pool and the fee schedule ─────────────────────────
    let pool_address = Address::from_low_u64(0xc1);
    let config = PoolConfig::from(ClassicPoolConfig::new(pool_address, dai, usdc)?);
    let mut pool = DefaultPoolFactory::create(&config)?;
    let fees = FeeConfig::default().with_fee_recipient(treasury);
    println!("\nPool config: {config}");
    println!("  Address:     {}", pool.address());
    println!("  token0:      {}", pool.token0());
    println!("  token1:      {}", pool.token1());

    // ── 3. Alice seeds 100 DAI + 400 USDC ───────────────────────────────
    vault.transfer_and_deposit(alice, Asset::Token(dai), pool.address(), Amount::new(100 * E18))?;
    vault.transfer_and_deposit(alice, Asset::Token(usdc), pool.address(), Amount::new(400 * E18))?;
    let minted = pool.mint(&mut vault, &fees, alice, &MintData { to: alice }.encode())?;
    println!("\n--- Mint ---");
    println!("  LP minted:   {}", minted.liquidity());
    println!("  Total:       {}", pool.shares().total_supply());

    // ── 4. Bob sells 10 DAI and takes USDC out of the vault ─────────────
    let amount_in = Amount::new(10 * E18);
    let quoted = pool.get_amount_out(&fees, bob, dai, amount_in)?;
    vault.transfer_and_deposit(bob, Asset::Token(dai), pool.address(), amount_in)?;
    let data = SwapData {
        token_in: dai,
        to: bob,
        withdraw_mode: WithdrawMode::Wrapped,
    };
    let swap = pool.swap(&mut vault, &fees, bob, &data.encode())?;
    println!("\n--- Swap: sell {amount_in} DAI ---");
    println!("  Quoted:      {quoted}");
    println!("  Result:      {swap}");
    println!("  Bob's USDC:  {}", vault.host().token_balance(usdc, bob));

    // ── 5. Alice exits; swap fees mint protocol shares first ────────────
    let shares = pool.shares().balance_of(alice);
    pool.transfer_shares(alice, pool.address(), shares)?;
    let data = BurnData {
        to: alice,
        withdraw_mode: WithdrawMode::Vault,
    };
    let burned = pool.burn(&mut vault, &fees, alice, &data.encode())?;
    println!("\n--- Burn ---");
    println!("  Returned:    {} DAI + {} USDC", burned.amount0(), burned.amount1());
    println!("  Treasury LP: {}", pool.shares().balance_of(treasury));
    println!("  Reserves:    {:?}", pool.reserves());

    // ── 6. Alice withdraws her vault balance ────────────────────────────
    let held = vault.balance_of(Asset::Token(dai), alice);
    vault.withdraw(alice, Asset::Token(dai), alice, held)?;
    println!("\nAlice withdrew {held} DAI");

    // ── 7. Persisted state ──────────────────────────────────────────────
    println!("\nPool record:\n{}", serde_json::to_string_pretty(&pool.record())?);
    println!("Vault records:\n{}", serde_json::to_string_pretty(&vault.records())?);

    println!("\n=== Done ===");
    Ok(())
}
