//! Rebase Staking Contract
//!
//! Stakers hold shares; their balance is `shares * index`. Once per epoch
//! `rebase` compounds the reward queued during the previous epoch into the
//! index, growing every staked balance in one write, then asks the
//! distributor for the next reward.
//!
//! ## Key design decisions
//!
//! - **Rewards lag one epoch**: the amount compounded by a rebase is the
//!   surplus measured at the end of the previous rebase.
//! - **Anchored schedule**: `end_time` always advances by exactly `length`,
//!   so a late rebase does not shift later epochs. One epoch per call.
//! - **Warmup** deposits sit outside the share ledger and do not earn until
//!   claimed; they convert at the index current at claim time.
//! - **Rounding favors the pool**: credits round shares down, debits round
//!   shares up.

#![no_std]

mod events;
mod storage;
pub mod types;

pub use types::{Claim, Epoch};

use bastion_errors::ContractError;
use bastion_interfaces::DistributorClient;
use bastion_math::{add, sub, Index};
use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Env};
use types::DataKey;




// ─── Helpers ───────────────────────────────────────────────────────────────

fn require_positive(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::AmountMustBePositive);
    }
    Ok(())
}

fn circulating(e: &Env) -> Result<i128, ContractError> {
    storage::index(e).to_balance(storage::total_shares(e))
}

fn credit_shares(e: &Env, holder: &Address, shares: i128) -> Result<(), ContractError> {
    storage::set_shares(e, holder, add(storage::shares(e, holder), shares)?);
    storage::set_total_shares(e, add(storage::total_shares(e), shares)?);
    Ok(())
}

fn debit_shares(e: &Env, holder: &Address, shares: i128) -> Result<(), ContractError> {
    let held = storage::shares(e, holder);
    if held < shares {
        return Err(ContractError::InsufficientStakedBalance);
    }
    storage::set_shares(e, holder, held - shares);
    storage::set_total_shares(e, sub(storage::total_shares(e), shares)?);
    Ok(())
}

fn do_rebase(e: &Env) -> Result<i128, ContractError> {
    let mut epoch = storage::epoch(e)?;
    if e.ledger().timestamp() < epoch.end_time {
        return Ok(0);
    }
    let distributor = storage::distributor(e).ok_or(ContractError::DistributorNotConfigured)?;

    // With nobody staked the index stays put and the reward is re-offered.
    let staked = circulating(e)?;
    let distributed = if staked > 0 { epoch.distribute } else { 0 };
    let index = storage::index(e).compound(staked, distributed)?;
    storage::set_index(e, index);

    epoch.number = epoch
        .number
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;
    epoch.end_time = bastion_math::add_u64(epoch.end_time, epoch.length)?;

    DistributorClient::new(e, &distributor).distribute();

    let balance = TokenClient::new(e, &storage::issuance_token(e)?).balance(&e.current_contract_address());
    let liabilities = add(circulating(e)?, storage::warmup_supply(e))?;
    epoch.distribute = if balance > liabilities { balance - liabilities } else { 0 };
    storage::set_epoch(e, &epoch);

    events::emit_rebase(e, epoch.number, distributed, index.raw(), epoch.distribute);
    Ok(distributed)
}

/// Convert a matured claim into shares. Returns the amount converted.
fn do_claim(e: &Env, recipient: &Address) -> Result<i128, ContractError> {
    let mut claim = storage::claim(e, recipient);
    if claim.deposit == 0 || storage::epoch(e)?.number < claim.expiry {
        return Ok(0);
    }
    let amount = claim.deposit;
    let shares = storage::index(e).to_shares(amount)?;
    credit_shares(e, recipient, shares)?;
    storage::set_warmup_supply(e, sub(storage::warmup_supply(e), amount)?);

    claim.deposit = 0;
    claim.expiry = 0;
    storage::set_claim(e, recipient, &claim);

    events::emit_claimed(e, recipient, amount, shares);
    Ok(amount)
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct Staking;

#[contractimpl]
impl Staking {
    // ── Admin setup ────────────────────────────────────────────────────────

    pub fn initialize(
        e: Env,
        admin: Address,
        issuance_token: Address,
        epoch_length: u64,
        first_epoch_number: u32,
        first_epoch_time: u64,
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
        s.set(&DataKey::IssuanceToken, &issuance_token);
        storage::set_epoch(
            &e,
            &Epoch {
                length: epoch_length,
                number: first_epoch_number,
                end_time: first_epoch_time,
                distribute: 0,
            },
        );
        storage::set_index(&e, Index::INITIAL);
        storage::set_total_shares(&e, 0);
        Ok(())
    }

    pub fn set_distributor(e: Env, admin: Address, distributor: Address) -> Result<(), ContractError> {
        storage::require_admin(&e, &admin)?;
        e.storage().instance().set(&DataKey::Distributor, &distributor);
        Ok(())
    }

    /// Warmup length in epochs. Applies to stakes made after the change.
    pub fn set_warmup(e: Env, admin: Address, period: u32) -> Result<(), ContractError> {
        storage::require_admin(&e, &admin)?;
        e.storage().instance().set(&DataKey::WarmupPeriod, &period);
        Ok(())
    }

    // ── Staking ────────────────────────────────────────────────────────────

    /// Pull `amount` issuance from `from` into `recipient`'s warmup claim.
    ///
    /// Runs `rebase` first. With a zero warmup the claim converts at once and
    /// the converted amount is returned; otherwise returns 0.
    ///
    /// # Errors
    /// * `DepositsLocked` - recipient locked their claim and `from != recipient`
    pub fn stake(e: Env, from: Address, amount: i128, recipient: Address) -> Result<i128, ContractError> {
        from.require_auth();
        require_positive(amount)?;
        do_rebase(&e)?;

        let mut claim = storage::claim(&e, &recipient);
        if claim.lock && from != recipient {
            return Err(ContractError::DepositsLocked);
        }
        let number = storage::epoch(&e)?.number;
        claim.deposit = add(claim.deposit, amount)?;
        claim.expiry = number
            .checked_add(storage::warmup_period(&e))
            .ok_or(ContractError::Overflow)?;
        storage::set_claim(&e, &recipient, &claim);
        storage::set_warmup_supply(&e, add(storage::warmup_supply(&e), amount)?);

        let this = e.current_contract_address();
        TokenClient::new(&e, &storage::issuance_token(&e)?).transfer_from(&this, &from, &this, &amount);
        events::emit_staked(&e, &from, &recipient, amount, claim.expiry);

        if storage::warmup_period(&e) == 0 {
            do_claim(&e, &recipient)
        } else {
            Ok(0)
        }
    }

    /// Convert `recipient`'s matured claim. No-op returning 0 before expiry.
    pub fn claim(e: Env, recipient: Address) -> Result<i128, ContractError> {
        do_claim(&e, &recipient)
    }

    /// Abandon the warmup claim and take the deposit back.
    pub fn forfeit(e: Env, recipient: Address) -> Result<i128, ContractError> {
        recipient.require_auth();
        let mut claim = storage::claim(&e, &recipient);
        let amount = claim.deposit;
        if amount == 0 {
            return Ok(0);
        }
        claim.deposit = 0;
        claim.expiry = 0;
        storage::set_claim(&e, &recipient, &claim);
        storage::set_warmup_supply(&e, sub(storage::warmup_supply(&e), amount)?);

        let this = e.current_contract_address();
        TokenClient::new(&e, &storage::issuance_token(&e)?).transfer(&this, &recipient, &amount);
        events::emit_forfeited(&e, &recipient, amount);
        Ok(amount)
    }

    /// Prevent (or allow again) third parties from adding to the caller's
    /// warmup claim. Returns the new lock flag.
    pub fn toggle_deposit_lock(e: Env, recipient: Address) -> bool {
        recipient.require_auth();
        let mut claim = storage::claim(&e, &recipient);
        claim.lock = !claim.lock;
        storage::set_claim(&e, &recipient, &claim);
        claim.lock
    }

    /// Burn the shares backing `amount` (rounded up) and return the issuance.
    pub fn unstake(e: Env, holder: Address, amount: i128, trigger: bool) -> Result<i128, ContractError> {
        holder.require_auth();
        require_positive(amount)?;
        if trigger {
            do_rebase(&e)?;
        }
        let shares = storage::index(&e).to_shares_ceil(amount)?;
        debit_shares(&e, &holder, shares)?;

        let this = e.current_contract_address();
        TokenClient::new(&e, &storage::issuance_token(&e)?).transfer(&this, &holder, &amount);
        events::emit_unstaked(&e, &holder, amount, shares);
        Ok(amount)
    }

    /// Move `amount` of staked balance between holders.
    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        from.require_auth();
        require_positive(amount)?;
        let shares = storage::index(&e).to_shares_ceil(amount)?;
        debit_shares(&e, &from, shares)?;
        credit_shares(&e, &to, shares)?;
        events::emit_transferred(&e, &from, &to, amount);
        Ok(())
    }

    // ── Rebase ─────────────────────────────────────────────────────────────

    /// Close the current epoch if it has ended. Returns the amount compounded
    /// into the index, or 0 when the epoch is still running or nothing is
    /// staked.
    ///
    /// # Errors
    /// * `DistributorNotConfigured` - the epoch is due but no distributor is set
    pub fn rebase(e: Env) -> Result<i128, ContractError> {
        do_rebase(&e)
    }

    // ── Views ──────────────────────────────────────────────────────────────

    pub fn epoch(e: Env) -> Result<Epoch, ContractError> {
        storage::epoch(&e)
    }

    pub fn index(e: Env) -> i128 {
        storage::index(&e).raw()
    }

    pub fn balance(e: Env, holder: Address) -> Result<i128, ContractError> {
        storage::index(&e).to_balance(storage::shares(&e, &holder))
    }

    pub fn shares(e: Env, holder: Address) -> i128 {
        storage::shares(&e, &holder)
    }

    /// Balance represented by all shares. Excludes warmup deposits.
    pub fn circulating_supply(e: Env) -> Result<i128, ContractError> {
        circulating(&e)
    }

    pub fn warmup_info(e: Env, recipient: Address) -> Claim {
        storage::claim(&e, &recipient)
    }

    pub fn supply_in_warmup(e: Env) -> i128 {
        storage::warmup_supply(&e)
    }
}
