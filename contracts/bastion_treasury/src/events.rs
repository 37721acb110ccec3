use soroban_sdk::{Address, Env, Symbol};

use crate::types::Role;

/// Emitted when collateral is deposited and issuance minted against it.
///
/// # Topics
/// * `Symbol` - "reserves_deposited"
/// * `Address` - The depositor
///
/// # Data
/// * `Address` - The reserve asset
/// * `i128` - Raw asset amount
/// * `i128` - Value in issuance units
/// * `i128` - Issuance minted to the depositor
pub fn emit_deposit(
    e: &Env,
    depositor: &Address,
    asset: &Address,
    amount: i128,
    value: i128,
    minted: i128,
) {
    let topics = (Symbol::new(e, "reserves_deposited"), depositor.clone());
    let data = (asset.clone(), amount, value, minted);
    e.events().publish(topics, data);
}

/// Emitted when a manager withdraws collateral against excess reserves.
///
/// # Topics
/// * `Symbol` - "reserves_withdrawn"
/// * `Address` - The manager
///
/// # Data
/// * `Address` - The reserve asset
/// * `i128` - Raw asset amount
/// * `i128` - Value removed from total reserves
pub fn emit_withdrawal(e: &Env, manager: &Address, asset: &Address, amount: i128, value: i128) {
    let topics = (Symbol::new(e, "reserves_withdrawn"), manager.clone());
    let data = (asset.clone(), amount, value);
    e.events().publish(topics, data);
}

/// Emitted when a spender burns issuance to take collateral back.
///
/// # Topics
/// * `Symbol` - "reserves_redeemed"
/// * `Address` - The spender
///
/// # Data
/// * `Address` - The reserve asset
/// * `i128` - Raw asset amount released
/// * `i128` - Issuance burned
pub fn emit_redeemed(e: &Env, spender: &Address, asset: &Address, amount: i128, burned: i128) {
    let topics = (Symbol::new(e, "reserves_redeemed"), spender.clone());
    let data = (asset.clone(), amount, burned);
    e.events().publish(topics, data);
}

/// Emitted when rewards are minted out of excess reserves.
///
/// # Topics
/// * `Symbol` - "rewards_minted"
/// * `Address` - The recipient
///
/// # Data
/// * `Address` - The reward manager
/// * `i128` - Amount minted
pub fn emit_rewards_minted(e: &Env, manager: &Address, recipient: &Address, amount: i128) {
    let topics = (Symbol::new(e, "rewards_minted"), recipient.clone());
    let data = (manager.clone(), amount);
    e.events().publish(topics, data);
}

/// # Topics
/// * `Symbol` - "permission_queued"
/// * `Role` - The capability
///
/// # Data
/// * `Address` - Grantee
/// * `u64` - Earliest activation timestamp
pub fn emit_permission_queued(e: &Env, role: Role, who: &Address, eta: u64) {
    let topics = (Symbol::new(e, "permission_queued"), role);
    let data = (who.clone(), eta);
    e.events().publish(topics, data);
}

/// # Topics
/// * `Symbol` - "permission_toggled"
/// * `Role` - The capability
///
/// # Data
/// * `Address` - Grantee
/// * `bool` - New active flag
pub fn emit_permission_toggled(e: &Env, role: Role, who: &Address, active: bool) {
    let topics = (Symbol::new(e, "permission_toggled"), role);
    let data = (who.clone(), active);
    e.events().publish(topics, data);
}

pub fn emit_asset_registered(e: &Env, asset: &Address, decimals: u32, pooled: bool) {
    let topics = (Symbol::new(e, "asset_registered"), asset.clone());
    e.events().publish(topics, (decimals, pooled));
}

pub fn emit_reserves_audited(e: &Env, total_reserves: i128) {
    let topics = (Symbol::new(e, "reserves_audited"),);
    e.events().publish(topics, total_reserves);
}
