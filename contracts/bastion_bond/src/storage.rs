use bastion_errors::ContractError;
use soroban_sdk::{Address, Env};

use crate::state::{BondState, TermsState};
use crate::types::{Adjustment, BondRecord, BondTerms, DataKey};

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

fn address(e: &Env, key: &DataKey) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(key)
        .ok_or(ContractError::NotInitialized)
}

pub fn issuance_token(e: &Env) -> Result<Address, ContractError> {
    address(e, &DataKey::IssuanceToken)
}

pub fn principle(e: &Env) -> Result<Address, ContractError> {
    address(e, &DataKey::Principle)
}

pub fn principle_decimals(e: &Env) -> Result<u32, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::PrincipleDecimals)
        .ok_or(ContractError::NotInitialized)
}

pub fn treasury(e: &Env) -> Result<Address, ContractError> {
    address(e, &DataKey::Treasury)
}

pub fn fee_recipient(e: &Env) -> Result<Address, ContractError> {
    address(e, &DataKey::FeeRecipient)
}

pub fn valuator(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Valuator)
}

pub fn staking(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Staking)
}

// ─── Terms and debt ────────────────────────────────────────────────────────

pub fn terms_state(e: &Env) -> TermsState {
    TermsState::from_stored(e.storage().instance().get(&DataKey::Terms))
}

pub fn terms(e: &Env) -> Result<BondTerms, ContractError> {
    terms_state(e).active()
}

pub fn set_terms(e: &Env, terms: &BondTerms) {
    e.storage().instance().set(&DataKey::Terms, terms);
}

pub fn total_debt(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalDebt)
        .unwrap_or(0)
}

pub fn set_total_debt(e: &Env, debt: i128) {
    e.storage().instance().set(&DataKey::TotalDebt, &debt);
}

pub fn last_decay(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::LastDecay)
        .unwrap_or(0)
}

pub fn set_last_decay(e: &Env, ledger: u32) {
    e.storage().instance().set(&DataKey::LastDecay, &ledger);
}

pub fn adjustment(e: &Env) -> Option<Adjustment> {
    e.storage().instance().get(&DataKey::Adjustment)
}

pub fn set_adjustment(e: &Env, adjustment: &Adjustment) {
    e.storage().instance().set(&DataKey::Adjustment, adjustment);
}

// ─── Per-depositor bonds ───────────────────────────────────────────────────

pub fn bond(e: &Env, depositor: &Address) -> BondState {
    let key = DataKey::Bond(depositor.clone());
    let storage = e.storage().persistent();
    let record = storage.get::<_, BondRecord>(&key);
    if record.is_some() {
        storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    }
    BondState::from_stored(record)
}

/// Persist an open bond; any other state deletes the record.
pub fn set_bond(e: &Env, depositor: &Address, state: &BondState) {
    let key = DataKey::Bond(depositor.clone());
    match state.record() {
        Some(record) => {
            e.storage().persistent().set(&key, record);
            e.storage()
                .persistent()
                .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
        }
        None => e.storage().persistent().remove(&key),
    }
}
