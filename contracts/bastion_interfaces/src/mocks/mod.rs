//! Test doubles for the external collaborators: a token whose decimals can be
//! chosen freely, and a pair contract that is both an LP token and a reserve
//! oracle.

use soroban_sdk::{contracttype, Address, Env};

mod pool;
mod token;

pub use pool::{MockPool, MockPoolClient};
pub use token::{MockToken, MockTokenClient};

#[contracttype]
#[derive(Clone)]
pub enum MockKey {
    Decimals,
    Token0,
    Token1,
    Reserves,
    Supply,
    Balance(Address),
    Allowance(Address, Address),
}

pub(crate) fn read_i128(e: &Env, key: &MockKey) -> i128 {
    e.storage().instance().get(key).unwrap_or(0)
}
