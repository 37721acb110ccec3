use soroban_sdk::{Address, Env, Symbol};

/// Emitted once per recipient paid during a distribution.
///
/// # Topics
/// * `Symbol` - "distributed"
/// * `Address` - The recipient
///
/// # Data
/// * `i128` - Reward minted
/// * `u64` - Next epoch time after this distribution
pub fn emit_distributed(e: &Env, recipient: &Address, reward: i128, next_epoch_time: u64) {
    let topics = (Symbol::new(e, "distributed"), recipient.clone());
    e.events().publish(topics, (reward, next_epoch_time));
}

/// # Topics
/// * `Symbol` - "recipient_added"
/// * `Address` - The recipient
///
/// # Data
/// * `i128` - Rate in millionths of supply
pub fn emit_recipient_added(e: &Env, recipient: &Address, rate: i128) {
    let topics = (Symbol::new(e, "recipient_added"), recipient.clone());
    e.events().publish(topics, rate);
}

pub fn emit_recipient_removed(e: &Env, recipient: &Address, index: u32) {
    let topics = (Symbol::new(e, "recipient_removed"), recipient.clone());
    e.events().publish(topics, index);
}

/// Emitted when a recipient's rate moves by its scheduled adjustment.
///
/// # Data
/// * `i128` - Old rate
/// * `i128` - New rate
pub fn emit_rate_adjusted(e: &Env, recipient: &Address, old_rate: i128, new_rate: i128) {
    let topics = (Symbol::new(e, "rate_adjusted"), recipient.clone());
    e.events().publish(topics, (old_rate, new_rate));
}
