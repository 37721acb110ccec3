use bastion_errors::ContractError;
use bastion_math::Index;
use soroban_sdk::{Address, Env};

use crate::types::{Claim, DataKey, Epoch};

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;

pub fn require_admin(e: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let stored: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)?;
    if stored != *caller {
        return Err(ContractError::NotAdmin);
    }
    Ok(())
}

pub fn issuance_token(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::IssuanceToken)
        .ok_or(ContractError::NotInitialized)
}

pub fn epoch(e: &Env) -> Result<Epoch, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Epoch)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_epoch(e: &Env, epoch: &Epoch) {
    e.storage().instance().set(&DataKey::Epoch, epoch);
}

pub fn index(e: &Env) -> Index {
    e.storage()
        .instance()
        .get(&DataKey::Index)
        .map(Index::from_raw)
        .unwrap_or_default()
}

pub fn set_index(e: &Env, index: Index) {
    e.storage().instance().set(&DataKey::Index, &index.raw());
}

pub fn total_shares(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalShares)
        .unwrap_or(0)
}

pub fn set_total_shares(e: &Env, shares: i128) {
    e.storage().instance().set(&DataKey::TotalShares, &shares);
}

pub fn distributor(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Distributor)
}

pub fn warmup_period(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::WarmupPeriod)
        .unwrap_or(0)
}

pub fn warmup_supply(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::WarmupSupply)
        .unwrap_or(0)
}

pub fn set_warmup_supply(e: &Env, amount: i128) {
    e.storage().instance().set(&DataKey::WarmupSupply, &amount);
}

// ─── Per-address records ───────────────────────────────────────────────────

pub fn shares(e: &Env, holder: &Address) -> i128 {
    let key = DataKey::Shares(holder.clone());
    let storage = e.storage().persistent();
    match storage.get::<_, i128>(&key) {
        Some(s) => {
            storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            s
        }
        None => 0,
    }
}

pub fn set_shares(e: &Env, holder: &Address, amount: i128) {
    let key = DataKey::Shares(holder.clone());
    if amount == 0 {
        e.storage().persistent().remove(&key);
        return;
    }
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

pub fn claim(e: &Env, recipient: &Address) -> Claim {
    let key = DataKey::Claim(recipient.clone());
    let storage = e.storage().persistent();
    match storage.get::<_, Claim>(&key) {
        Some(c) => {
            storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            c
        }
        None => Claim::empty(),
    }
}

/// Persist a claim; an empty, unlocked claim is deleted.
pub fn set_claim(e: &Env, recipient: &Address, claim: &Claim) {
    let key = DataKey::Claim(recipient.clone());
    if claim.deposit == 0 && !claim.lock {
        e.storage().persistent().remove(&key);
        return;
    }
    e.storage().persistent().set(&key, claim);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}
