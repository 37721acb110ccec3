//! Storage accessors. Globals live in `instance()`; per-asset and
//! per-capability records live in `persistent()` and have their TTL bumped on
//! every read and write.

use bastion_errors::ContractError;
use soroban_sdk::{Address, Env, Vec};

use crate::types::{DataKey, Permission, ReserveAsset, Role};

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;

// ─── Config ────────────────────────────────────────────────────────────────

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Admin)
}

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

pub fn issuance_decimals(e: &Env) -> Result<u32, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::IssuanceDecimals)
        .ok_or(ContractError::NotInitialized)
}

pub fn valuator(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Valuator)
        .ok_or(ContractError::NotInitialized)
}

pub fn queue_delay(e: &Env) -> Result<u64, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::QueueDelay)
        .ok_or(ContractError::NotInitialized)
}

// ─── Ledger totals ─────────────────────────────────────────────────────────

pub fn total_reserves(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalReserves)
        .unwrap_or(0)
}

pub fn set_total_reserves(e: &Env, value: i128) {
    e.storage().instance().set(&DataKey::TotalReserves, &value);
}

pub fn issuance_supply(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::IssuanceSupply)
        .unwrap_or(0)
}

pub fn set_issuance_supply(e: &Env, value: i128) {
    e.storage().instance().set(&DataKey::IssuanceSupply, &value);
}

// ─── Assets ────────────────────────────────────────────────────────────────

pub fn asset_list(e: &Env) -> Vec<Address> {
    e.storage()
        .instance()
        .get(&DataKey::Assets)
        .unwrap_or_else(|| Vec::new(e))
}

pub fn has_asset(e: &Env, asset: &Address) -> bool {
    e.storage()
        .persistent()
        .has(&DataKey::Asset(asset.clone()))
}

/// Registered asset record, or `AssetNotAccepted`.
pub fn load_asset(e: &Env, asset: &Address) -> Result<ReserveAsset, ContractError> {
    let key = DataKey::Asset(asset.clone());
    let storage = e.storage().persistent();
    let record: ReserveAsset = storage.get(&key).ok_or(ContractError::AssetNotAccepted)?;
    storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    Ok(record)
}

pub fn save_asset(e: &Env, record: &ReserveAsset) {
    let key = DataKey::Asset(record.asset.clone());
    e.storage().persistent().set(&key, record);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

pub fn push_asset(e: &Env, asset: &Address) {
    let mut list = asset_list(e);
    list.push_back(asset.clone());
    e.storage().instance().set(&DataKey::Assets, &list);
}

pub fn holdings(e: &Env, asset: &Address) -> i128 {
    let key = DataKey::Holdings(asset.clone());
    let storage = e.storage().persistent();
    match storage.get::<_, i128>(&key) {
        Some(amount) => {
            storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            amount
        }
        None => 0,
    }
}

pub fn set_holdings(e: &Env, asset: &Address, amount: i128) {
    let key = DataKey::Holdings(asset.clone());
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

// ─── Permissions ───────────────────────────────────────────────────────────

pub fn load_permission(e: &Env, role: Role, who: &Address) -> Permission {
    let key = DataKey::Permission(role, who.clone());
    let storage = e.storage().persistent();
    match storage.get::<_, Permission>(&key) {
        Some(p) => {
            storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            p
        }
        None => Permission::inactive(),
    }
}

pub fn save_permission(e: &Env, role: Role, who: &Address, permission: &Permission) {
    let key = DataKey::Permission(role, who.clone());
    e.storage().persistent().set(&key, permission);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}
