use soroban_sdk::{contract, contractimpl, Address, Env};

use super::{read_i128, MockKey};

/// Pair with settable reserves and a minimal token ledger for its shares.
#[contract]
pub struct MockPool;

#[contractimpl]
impl MockPool {
    pub fn initialize(e: Env, token_0: Address, token_1: Address, decimals: u32) {
        let s = e.storage().instance();
        s.set(&MockKey::Token0, &token_0);
        s.set(&MockKey::Token1, &token_1);
        s.set(&MockKey::Decimals, &decimals);
        s.set(&MockKey::Reserves, &(0_i128, 0_i128));
    }

    pub fn set_reserves(e: Env, reserve_0: i128, reserve_1: i128) {
        e.storage()
            .instance()
            .set(&MockKey::Reserves, &(reserve_0, reserve_1));
    }

    /// Mints pool shares and grows the total supply.
    pub fn mint(e: Env, to: Address, amount: i128) {
        let key = MockKey::Balance(to);
        let balance = read_i128(&e, &key);
        e.storage().instance().set(&key, &(balance + amount));
        let supply = read_i128(&e, &MockKey::Supply);
        e.storage().instance().set(&MockKey::Supply, &(supply + amount));
    }

    pub fn get_reserves(e: Env) -> (i128, i128) {
        e.storage()
            .instance()
            .get(&MockKey::Reserves)
            .unwrap_or((0, 0))
    }

    pub fn token_0(e: Env) -> Address {
        e.storage()
            .instance()
            .get(&MockKey::Token0)
            .unwrap_or_else(|| panic!("pool not initialized"))
    }

    pub fn token_1(e: Env) -> Address {
        e.storage()
            .instance()
            .get(&MockKey::Token1)
            .unwrap_or_else(|| panic!("pool not initialized"))
    }

    pub fn total_supply(e: Env) -> i128 {
        read_i128(&e, &MockKey::Supply)
    }

    pub fn decimals(e: Env) -> u32 {
        e.storage().instance().get(&MockKey::Decimals).unwrap_or(18)
    }

    pub fn balance(e: Env, id: Address) -> i128 {
        read_i128(&e, &MockKey::Balance(id))
    }

    pub fn approve(e: Env, from: Address, spender: Address, amount: i128, _expiration_ledger: u32) {
        from.require_auth();
        e.storage()
            .instance()
            .set(&MockKey::Allowance(from, spender), &amount);
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        move_balance(&e, &from, &to, amount);
    }

    pub fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        let key = MockKey::Allowance(from.clone(), spender);
        let allowance = read_i128(&e, &key);
        if allowance < amount {
            panic!("insufficient allowance");
        }
        e.storage().instance().set(&key, &(allowance - amount));
        move_balance(&e, &from, &to, amount);
    }
}

fn move_balance(e: &Env, from: &Address, to: &Address, amount: i128) {
    let from_key = MockKey::Balance(from.clone());
    let from_balance = read_i128(e, &from_key);
    if from_balance < amount {
        panic!("insufficient balance");
    }
    e.storage()
        .instance()
        .set(&from_key, &(from_balance - amount));
    let to_key = MockKey::Balance(to.clone());
    let to_balance = read_i128(e, &to_key);
    e.storage().instance().set(&to_key, &(to_balance + amount));
}
