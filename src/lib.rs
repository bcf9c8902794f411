//! # Vault AMM
//!
//! Automated market maker engine built around a shared balance vault.
//!
//! Every pool keeps its tokens as ledger entries in one [`Vault`]; users
//! move tokens into the vault and credit them to a pool, then call the
//! pool, which prices the difference between its vault balance and its
//! cached reserves.  Two pricing curves are provided:
//!
//! - **Classic** (constant product, `x · y = k`): `classic` feature
//! - **Stable** (StableSwap with amplification): `stable` feature
//!
//! Both pools issue an ERC-20 style share token, support proportional and
//! single-sided withdrawal, and mint a protocol fee from invariant growth
//! when a fee recipient is configured.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `classic` | yes | Constant-product pool |
//! | `stable` | yes | StableSwap pool |
//! | `all-pools` | yes | Enables both curves |
//!
//! ## Create a pool, add liquidity and swap
//!
//! ```rust
//! use vault_amm::config::{ClassicPoolConfig, FeeConfig, PoolConfig};
//! use vault_amm::domain::{Address, Amount, Asset, MintData, SwapData, WithdrawMode};
//! use vault_amm::factory::DefaultPoolFactory;
//! use vault_amm::host::InMemoryHost;
//! use vault_amm::traits::Pool;
//! use vault_amm::vault::Vault;
//!
//! let (usdc, dai) = (Address::from_low_u64(0xa), Address::from_low_u64(0xb));
//! let user = Address::from_low_u64(1);
//! let vault_addr = Address::from_low_u64(0xfa);
//!
//! // 1. A vault backed by the in-memory host, and a funded user
//! let mut vault = Vault::new(vault_addr, InMemoryHost::new(Address::from_low_u64(0xeeee)));
//! for token in [usdc, dai] {
//!     vault.host_mut().mint(token, user, Amount::new(1_000_000)).expect("mint");
//!     vault.host_mut().approve(token, user, vault_addr, Amount::MAX);
//! }
//!
//! // 2. An empty classic pool from configuration
//! let cfg = ClassicPoolConfig::new(Address::from_low_u64(0xc1), usdc, dai).expect("valid");
//! let mut pool = DefaultPoolFactory::create(&PoolConfig::Classic(cfg)).expect("pool");
//! let fees = FeeConfig::default();
//!
//! // 3. Credit both tokens to the pool, then mint shares
//! for token in [usdc, dai] {
//!     vault
//!         .transfer_and_deposit(user, Asset::Token(token), pool.address(), Amount::new(100_000))
//!         .expect("deposit");
//! }
//! let minted = pool
//!     .mint(&mut vault, &fees, user, &MintData { to: user }.encode())
//!     .expect("mint");
//! assert_eq!(minted.liquidity(), Amount::new(99_000));
//!
//! // 4. Credit the input, then swap it for the other token
//! vault
//!     .transfer_and_deposit(user, Asset::Token(usdc), pool.address(), Amount::new(1_000))
//!     .expect("deposit");
//! let data = SwapData { token_in: usdc, to: user, withdraw_mode: WithdrawMode::Vault };
//! let swapped = pool.swap(&mut vault, &fees, user, &data.encode()).expect("swap");
//! assert_eq!(swapped.amount_out(), Amount::new(987));
//! assert_eq!(vault.balance_of(Asset::Token(dai), user), Amount::new(987));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Caller     │  deposits into the vault, then calls a pool
//! └──────┬──────┘
//!        │ mint / burn / burn_single / swap
//!        ▼
//! ┌─────────────┐      ┌─────────────┐
//! │    Pools     │ ───▶ │  FeeSource   │  swap fee, protocol fee, recipient
//! └──────┬──────┘      └─────────────┘
//!        │ BalanceVault
//!        ▼
//! ┌─────────────┐
//! │    Vault     │  per-(asset, owner) ledger, native/wrapped duality
//! └──────┬──────┘
//!        │ AssetHost
//!        ▼
//! ┌─────────────┐
//! │    Host      │  token and native-coin balances
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Asset`](domain::Asset), call data, outcomes |
//! | [`traits`] | [`Pool`](traits::Pool), [`BalanceVault`](traits::BalanceVault), [`AssetHost`](traits::AssetHost), [`FeeSource`](traits::FeeSource), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig), per-curve configs, [`FeeConfig`](config::FeeConfig) |
//! | [`pools`] | [`ClassicPool`](pools::ClassicPool), [`StablePool`](pools::StablePool), [`PoolBox`](pools::PoolBox) |
//! | [`vault`] | [`Vault`] balance ledger |
//! | [`host`] | [`InMemoryHost`](host::InMemoryHost) |
//! | [`factory`] | [`DefaultPoolFactory`](factory::DefaultPoolFactory) |
//! | [`math`] | Integer square root, StableSwap solvers, 256-bit helpers |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! [`Vault`]: vault::Vault

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod host;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
pub mod vault;
