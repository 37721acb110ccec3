use soroban_sdk::{contract, contractimpl, Env};

use super::MockKey;

/// Metadata-only token; the valuator only asks it for `decimals`.
#[contract]
pub struct MockToken;

#[contractimpl]
impl MockToken {
    pub fn initialize(e: Env, decimals: u32) {
        e.storage().instance().set(&MockKey::Decimals, &decimals);
    }

    pub fn decimals(e: Env) -> u32 {
        e.storage().instance().get(&MockKey::Decimals).unwrap_or(7)
    }
}
