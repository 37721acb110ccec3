use soroban_sdk::{Address, Env, Symbol};

/// Emitted when issuance enters the engine.
///
/// # Topics
/// * `Symbol` - "staked"
/// * `Address` - The recipient credited
///
/// # Data
/// * `Address` - The payer
/// * `i128` - Amount staked
/// * `u32` - Epoch from which the claim converts
pub fn emit_staked(e: &Env, from: &Address, recipient: &Address, amount: i128, expiry: u32) {
    let topics = (Symbol::new(e, "staked"), recipient.clone());
    e.events().publish(topics, (from.clone(), amount, expiry));
}

/// Emitted when a warmup claim converts into shares.
///
/// # Data
/// * `i128` - Deposit converted
/// * `i128` - Shares credited
pub fn emit_claimed(e: &Env, recipient: &Address, amount: i128, shares: i128) {
    let topics = (Symbol::new(e, "claimed"), recipient.clone());
    e.events().publish(topics, (amount, shares));
}

pub fn emit_forfeited(e: &Env, recipient: &Address, amount: i128) {
    let topics = (Symbol::new(e, "forfeited"), recipient.clone());
    e.events().publish(topics, amount);
}

/// # Data
/// * `i128` - Issuance returned
/// * `i128` - Shares burned
pub fn emit_unstaked(e: &Env, holder: &Address, amount: i128, shares: i128) {
    let topics = (Symbol::new(e, "unstaked"), holder.clone());
    e.events().publish(topics, (amount, shares));
}

pub fn emit_transferred(e: &Env, from: &Address, to: &Address, amount: i128) {
    let topics = (Symbol::new(e, "stake_transferred"), from.clone(), to.clone());
    e.events().publish(topics, amount);
}

/// Emitted on every effective rebase.
///
/// # Topics
/// * `Symbol` - "rebase"
/// * `u32` - The new epoch number
///
/// # Data
/// * `i128` - Amount compounded into the index
/// * `i128` - New index
/// * `i128` - Reward queued for the next rebase
pub fn emit_rebase(e: &Env, number: u32, distributed: i128, index: i128, next_distribute: i128) {
    let topics = (Symbol::new(e, "rebase"), number);
    e.events()
        .publish(topics, (distributed, index, next_distribute));
}
