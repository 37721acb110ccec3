//! Distributor Contract
//!
//! Mints a fixed fraction of issuance supply to each registered recipient
//! once per epoch, out of the treasury's excess reserves. The rebase engine
//! is normally the main recipient and triggers `distribute` from its own
//! epoch rollover.
//!
//! Recipient rates may be stepped toward a target by one adjustment per
//! epoch, so reward schedules can change gradually.

#![no_std]

mod events;
pub mod types;

pub use types::{DistributionRecipient, RateAdjustment};

use bastion_errors::ContractError;
use bastion_interfaces::TreasuryClient;
use bastion_math::{add, add_u64, mul_div, sub};
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};
use types::DataKey;



/// Rate denominator: `1_000_000` = 100% of supply per epoch.
pub const RATE_DENOMINATOR: i128 = 1_000_000;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn require_admin(e: &Env, caller: &Address) -> Result<(), ContractError> {
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

fn get_treasury(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Treasury)
        .ok_or(ContractError::NotInitialized)
}

fn load_recipients(e: &Env) -> Vec<DistributionRecipient> {
    e.storage()
        .instance()
        .get(&DataKey::Recipients)
        .unwrap_or_else(|| Vec::new(e))
}

fn save_recipients(e: &Env, list: &Vec<DistributionRecipient>) {
    e.storage().instance().set(&DataKey::Recipients, list);
}

fn reward_at(e: &Env, rate: i128) -> Result<i128, ContractError> {
    let supply = TreasuryClient::new(e, &get_treasury(e)?).issuance_supply();
    let reward = mul_div(supply, rate, RATE_DENOMINATOR)?;
    let cap: Option<i128> = e.storage().instance().get(&DataKey::RewardCap);
    Ok(match cap {
        Some(cap) if reward > cap => cap,
        _ => reward,
    })
}

/// Move the recipient's rate one step toward its target, clearing the
/// adjustment once the target is reached.
fn apply_adjustment(info: &mut DistributionRecipient) -> Result<Option<i128>, ContractError> {
    if !info.adjustment.is_active() {
        return Ok(None);
    }
    let mut adj = info.adjustment.clone();
    let old = info.rate;
    if adj.add {
        let next = add(info.rate, adj.rate)?;
        info.rate = if next >= adj.target { adj.target } else { next };
        if info.rate >= adj.target {
            adj.rate = 0;
        }
    } else {
        let next = sub(info.rate, adj.rate)?;
        info.rate = if next <= adj.target { adj.target } else { next };
        if info.rate <= adj.target {
            adj.rate = 0;
        }
    }
    info.adjustment = if adj.is_active() { adj } else { RateAdjustment::inactive() };
    Ok(Some(old))
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct Distributor;

#[contractimpl]
impl Distributor {
    pub fn initialize(
        e: Env,
        admin: Address,
        treasury: Address,
        epoch_length: u64,
        next_epoch_time: u64,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        if epoch_length == 0 {
            return Err(ContractError::InvalidParameter);
        }
        let s = e.storage().instance();
        s.set(&DataKey::Admin, &admin);
        s.set(&DataKey::Treasury, &treasury);
        s.set(&DataKey::EpochLength, &epoch_length);
        s.set(&DataKey::NextEpochTime, &next_epoch_time);
        Ok(())
    }

    // ── Recipients ─────────────────────────────────────────────────────────

    /// Append a reward stream. Returns its index.
    pub fn add_recipient(e: Env, admin: Address, recipient: Address, rate: i128) -> Result<u32, ContractError> {
        require_admin(&e, &admin)?;
        if rate < 0 {
            return Err(ContractError::InvalidParameter);
        }
        let mut list = load_recipients(&e);
        list.push_back(DistributionRecipient {
            recipient: recipient.clone(),
            rate,
            adjustment: RateAdjustment::inactive(),
        });
        save_recipients(&e, &list);
        events::emit_recipient_added(&e, &recipient, rate);
        Ok(list.len() - 1)
    }

    /// Remove the stream at `index`. `recipient` must match the entry, which
    /// guards against removing a shifted index.
    pub fn remove_recipient(e: Env, admin: Address, index: u32, recipient: Address) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        let mut list = load_recipients(&e);
        match list.get(index) {
            Some(info) if info.recipient == recipient => {
                list.remove(index);
                save_recipients(&e, &list);
                events::emit_recipient_removed(&e, &recipient, index);
                Ok(())
            }
            _ => Err(ContractError::RecipientNotFound),
        }
    }

    /// Schedule a per-epoch step of `rate` toward `target` for the stream at
    /// `index`.
    pub fn set_adjustment(
        e: Env,
        admin: Address,
        index: u32,
        add: bool,
        rate: i128,
        target: i128,
    ) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        if rate < 0 || target < 0 {
            return Err(ContractError::InvalidParameter);
        }
        let mut list = load_recipients(&e);
        let mut info = list.get(index).ok_or(ContractError::RecipientNotFound)?;
        info.adjustment = RateAdjustment { add, rate, target };
        list.set(index, info);
        save_recipients(&e, &list);
        Ok(())
    }

    /// Upper bound on any single reward. `None` removes the cap.
    pub fn set_reward_cap(e: Env, admin: Address, cap: Option<i128>) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        match cap {
            Some(c) if c < 0 => return Err(ContractError::InvalidParameter),
            Some(c) => e.storage().instance().set(&DataKey::RewardCap, &c),
            None => e.storage().instance().remove(&DataKey::RewardCap),
        }
        Ok(())
    }

    // ── Distribution ───────────────────────────────────────────────────────

    /// Pay every stream if the epoch is due. Returns `false` (and changes
    /// nothing) before `next_epoch_time`.
    ///
    /// Each reward is bounded by the treasury's excess reserves at the time
    /// it is minted, so a thinly backed treasury pays less rather than
    /// blocking the rebase that triggered it.
    pub fn distribute(e: Env) -> Result<bool, ContractError> {
        let now = e.ledger().timestamp();
        let next: u64 = e
            .storage()
            .instance()
            .get(&DataKey::NextEpochTime)
            .ok_or(ContractError::NotInitialized)?;
        if now < next {
            return Ok(false);
        }
        let length: u64 = e
            .storage()
            .instance()
            .get(&DataKey::EpochLength)
            .ok_or(ContractError::NotInitialized)?;
        let next = add_u64(next, length)?;
        e.storage().instance().set(&DataKey::NextEpochTime, &next);

        let treasury = TreasuryClient::new(&e, &get_treasury(&e)?);
        let this = e.current_contract_address();
        let mut list = load_recipients(&e);
        for i in 0..list.len() {
            let Some(mut info) = list.get(i) else {
                continue;
            };
            if info.rate > 0 {
                let mut reward = reward_at(&e, info.rate)?;
                let excess = treasury.excess_reserves();
                if reward > excess {
                    reward = excess;
                }
                if reward > 0 {
                    treasury.mint_rewards(&this, &info.recipient, &reward);
                }
                events::emit_distributed(&e, &info.recipient, reward, next);
            }
            if let Some(old) = apply_adjustment(&mut info)? {
                events::emit_rate_adjusted(&e, &info.recipient, old, info.rate);
                list.set(i, info);
            }
        }
        save_recipients(&e, &list);
        Ok(true)
    }

    // ── Views ──────────────────────────────────────────────────────────────

    /// `issuance_supply * rate / 1_000_000`, bounded by the reward cap.
    pub fn next_reward_at(e: Env, rate: i128) -> Result<i128, ContractError> {
        reward_at(&e, rate)
    }

    /// Sum of the next rewards of every stream paying `recipient`.
    pub fn next_reward_for(e: Env, recipient: Address) -> Result<i128, ContractError> {
        let mut total = 0_i128;
        for info in load_recipients(&e).iter() {
            if info.recipient == recipient {
                total = add(total, reward_at(&e, info.rate)?)?;
            }
        }
        Ok(total)
    }

    pub fn recipients(e: Env) -> Vec<DistributionRecipient> {
        load_recipients(&e)
    }

    pub fn next_epoch_time(e: Env) -> Result<u64, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::NextEpochTime)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn reward_cap(e: Env) -> Option<i128> {
        e.storage().instance().get(&DataKey::RewardCap)
    }
}
