//! Client interfaces for calls between Bastion contracts.
//!
//! Each trait mirrors the subset of a contract's public surface that other
//! contracts invoke. `#[contractclient]` generates the `*Client` type used at
//! the call site. A failing callee aborts the whole invocation, so the
//! interfaces declare plain return types.

#![no_std]

use soroban_sdk::{contractclient, Address, Env};

#[cfg(any(test, feature = "testutils"))]
pub mod mocks;

/// Constant-product AMM pair, consumed as a reserve oracle only.
#[contractclient(name = "LiquidityPoolClient")]
pub trait LiquidityPool {
    fn get_reserves(env: Env) -> (i128, i128);
    fn token_0(env: Env) -> Address;
    fn token_1(env: Env) -> Address;
    fn total_supply(env: Env) -> i128;
}

/// Fair-value oracle for pooled liquidity positions.
#[contractclient(name = "ReserveValuatorClient")]
pub trait ReserveValuator {
    fn fair_value(env: Env, pool: Address) -> i128;
    fn valuation(env: Env, pool: Address, amount: i128) -> i128;
    fn markdown(env: Env, pool: Address) -> i128;
}

/// Issuance ledger. Only the operations other contracts drive.
#[contractclient(name = "TreasuryClient")]
pub trait Treasury {
    fn deposit(env: Env, depositor: Address, amount: i128, asset: Address, profit: i128) -> i128;
    fn value_of(env: Env, asset: Address, amount: i128) -> i128;
    fn mint_rewards(env: Env, manager: Address, recipient: Address, amount: i128);
    fn issuance_supply(env: Env) -> i128;
    fn excess_reserves(env: Env) -> i128;
}

/// Per-epoch reward minting.
#[contractclient(name = "DistributorClient")]
pub trait Distributor {
    fn distribute(env: Env) -> bool;
}

/// Rebase staking entry point used by the bond market's auto-stake path.
#[contractclient(name = "StakingClient")]
pub trait Staking {
    fn stake(env: Env, from: Address, amount: i128, recipient: Address) -> i128;
}
