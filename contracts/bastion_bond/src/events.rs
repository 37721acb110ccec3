use soroban_sdk::{Address, Env, Symbol};

/// Emitted on every bond purchase.
///
/// # Topics
/// * `Symbol` - "bond_created"
/// * `Address` - The depositor credited
///
/// # Data
/// * `i128` - Principle deposited
/// * `i128` - Payout credited after fee
/// * `u32` - Ledger at which the merged bond fully vests
/// * `i128` - Bond price in principle units
pub fn emit_bond_created(
    e: &Env,
    depositor: &Address,
    amount: i128,
    payout: i128,
    expires: u32,
    price_in_usd: i128,
) {
    let topics = (Symbol::new(e, "bond_created"), depositor.clone());
    e.events()
        .publish(topics, (amount, payout, expires, price_in_usd));
}

/// Emitted on every redemption.
///
/// # Data
/// * `i128` - Amount released
/// * `i128` - Payout still vesting (0 once the bond closes)
pub fn emit_bond_redeemed(e: &Env, recipient: &Address, released: i128, remaining: i128) {
    let topics = (Symbol::new(e, "bond_redeemed"), recipient.clone());
    e.events().publish(topics, (released, remaining));
}

/// # Data
/// * `i128` - Bond price in principle units
/// * `i128` - Debt ratio (9 decimals)
pub fn emit_price_changed(e: &Env, price_in_usd: i128, debt_ratio: i128) {
    let topics = (Symbol::new(e, "price_changed"),);
    e.events().publish(topics, (price_in_usd, debt_ratio));
}

/// Emitted when a scheduled adjustment steps the control variable.
///
/// # Data
/// * `i128` - Control variable before the step
/// * `i128` - Control variable after the step
/// * `i128` - Remaining step rate (0 once the target is reached)
/// * `bool` - Direction
pub fn emit_control_variable_adjusted(e: &Env, initial: i128, adjusted: i128, rate: i128, add: bool) {
    let topics = (Symbol::new(e, "control_variable_adjusted"),);
    e.events().publish(topics, (initial, adjusted, rate, add));
}

/// # Topics
/// * `Symbol` - "bond_terms_set"
///
/// # Data
/// * `u32` - `BondParameter` discriminant
/// * `i128` - New value
pub fn emit_bond_term_set(e: &Env, parameter: u32, value: i128) {
    let topics = (Symbol::new(e, "bond_terms_set"),);
    e.events().publish(topics, (parameter, value));
}
