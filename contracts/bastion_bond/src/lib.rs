//! Bond Market Contract
//!
//! Sells issuance forward for a principle asset. Each deposit is valued by
//! the treasury, priced off the market's outstanding debt, minted by the
//! treasury and vested linearly to the depositor over `vesting_term`
//! ledgers.
//!
//! ## Pricing
//!
//! `debt_ratio = current_debt * 1e9 / issuance_supply`, and the price in
//! hundredths of a principle unit is
//! `max(minimum_price, (control_variable * debt_ratio + 1e9) / 1e7)`.
//! Debt decays linearly over one vesting term, so the price relaxes as bonds
//! vest out. The floor is dropped the first time the market price clears it.
//!
//! ## Storage Layout
//!
//! | Key                 | Tier           |
//! |---------------------|----------------|
//! | configuration keys  | `instance()`   |
//! | `DataKey::Terms`    | `instance()`   |
//! | `DataKey::TotalDebt`| `instance()`   |
//! | `DataKey::Bond(..)` | `persistent()` |

#![no_std]

mod events;
pub mod state;
mod storage;
pub mod types;

pub use state::{BondState, TermsState};
pub use types::{Adjustment, BondParameter, BondRecord, BondTerms};

use bastion_errors::ContractError;
use bastion_interfaces::{ReserveValuatorClient, StakingClient, TreasuryClient};
use bastion_math::{add, mul, mul_div, pow10, sub};
use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Env};
use types::DataKey;

#[cfg(test)]
mod test_helpers;



#[cfg(test)]
mod test_redeem;


/// Scale of the debt ratio and of valuator markdowns.
const RATIO_SCALE: i128 = 1_000_000_000;
/// Added to `control_variable * debt_ratio`: a price floor of 1.00.
const PRICE_OFFSET: i128 = 1_000_000_000;
const PRICE_DIVISOR: i128 = 10_000_000;
/// Prices are quoted in hundredths.
const PRICE_PRECISION: i128 = 100;
/// Smallest payout sold: 0.01 issuance token.
const MIN_PAYOUT: i128 = 10_000_000;
const MAX_PAYOUT_DENOMINATOR: i128 = 100_000;
/// Fee scale. A fee must stay below it so every bond vests something.
const FEE_DENOMINATOR: i128 = 1_000_000;

const MIN_VESTING_TERM: i128 = 10_000;
const MAX_PAYOUT_TERM: i128 = 1_000;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn require_positive(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::AmountMustBePositive);
    }
    Ok(())
}

fn validate_terms(terms: &BondTerms, initial_debt: i128) -> Result<(), ContractError> {
    let valid = terms.control_variable > 0
        && terms.vesting_term > 0
        && terms.minimum_price >= 0
        && terms.max_payout > 0
        && terms.max_payout <= MAX_PAYOUT_DENOMINATOR
        && terms.fee >= 0
        && terms.fee < FEE_DENOMINATOR
        && terms.max_debt > 0
        && initial_debt >= 0;
    if !valid {
        return Err(ContractError::InvalidTerms);
    }
    Ok(())
}

fn treasury(e: &Env) -> Result<TreasuryClient<'_>, ContractError> {
    Ok(TreasuryClient::new(e, &storage::treasury(e)?))
}

/// Debt that has vested out since the last decay, capped at the total.
fn pending_decay(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    let debt = storage::total_debt(e);
    let elapsed = e.ledger().sequence().saturating_sub(storage::last_decay(e));
    let decay = mul_div(debt, elapsed as i128, terms.vesting_term as i128)?;
    Ok(decay.min(debt))
}

fn outstanding_debt(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    sub(storage::total_debt(e), pending_decay(e, terms)?)
}

fn decay(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    let debt = outstanding_debt(e, terms)?;
    storage::set_total_debt(e, debt);
    storage::set_last_decay(e, e.ledger().sequence());
    Ok(debt)
}

fn ratio_of(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    let supply = treasury(e)?.issuance_supply();
    if supply == 0 {
        return Ok(0);
    }
    mul_div(outstanding_debt(e, terms)?, RATIO_SCALE, supply)
}

/// Price before the floor is applied.
fn market_price(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    let scaled = add(mul(terms.control_variable, ratio_of(e, terms)?)?, PRICE_OFFSET)?;
    Ok(scaled / PRICE_DIVISOR)
}

fn price(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    Ok(market_price(e, terms)?.max(terms.minimum_price))
}

fn price_in_usd(e: &Env, price: i128) -> Result<i128, ContractError> {
    let unit = match storage::valuator(e) {
        Some(valuator) => ReserveValuatorClient::new(e, &valuator).markdown(&storage::principle(e)?),
        None => pow10(storage::principle_decimals(e)?)?,
    };
    mul_div(price, unit, PRICE_PRECISION)
}

fn price_in_usd_now(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    price_in_usd(e, price(e, terms)?)
}

fn payout_limit(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    mul_div(
        treasury(e)?.issuance_supply(),
        terms.max_payout,
        MAX_PAYOUT_DENOMINATOR,
    )
}

/// Step the control variable toward the scheduled target, once per buffer.
fn adjust(e: &Env, terms: &mut BondTerms) -> Result<(), ContractError> {
    let mut adjustment = match storage::adjustment(e) {
        Some(a) if a.rate != 0 => a,
        _ => return Ok(()),
    };
    let now = e.ledger().sequence();
    if now < adjustment.last_ledger.saturating_add(adjustment.buffer) {
        return Ok(());
    }

    let initial = terms.control_variable;
    let next = if adjustment.add {
        add(initial, adjustment.rate)?
    } else {
        sub(initial, adjustment.rate)?
    };
    let reached = if adjustment.add {
        next >= adjustment.target
    } else {
        next <= adjustment.target
    };
    terms.control_variable = if reached { adjustment.target } else { next };
    if reached {
        adjustment.rate = 0;
    }
    adjustment.last_ledger = now;
    storage::set_adjustment(e, &adjustment);

    events::emit_control_variable_adjusted(
        e,
        initial,
        terms.control_variable,
        adjustment.rate,
        adjustment.add,
    );
    Ok(())
}

/// Hand `amount` of vested issuance to `recipient`, directly or staked.
fn send_payout(e: &Env, recipient: &Address, amount: i128, stake: bool) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let this = e.current_contract_address();
    let issuance = TokenClient::new(e, &storage::issuance_token(e)?);
    if stake {
        let staking = storage::staking(e).ok_or(ContractError::StakingNotConfigured)?;
        issuance.approve(&this, &staking, &amount, &e.ledger().sequence());
        StakingClient::new(e, &staking).stake(&this, &amount, recipient);
    } else {
        issuance.transfer(&this, recipient, &amount);
    }
    Ok(())
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct BondMarket;

#[contractimpl]
impl BondMarket {
    // ── Admin setup ────────────────────────────────────────────────────────

    /// One-time setup. Passing a `valuator` makes this a liquidity bond whose
    /// principle is a pool share.
    pub fn initialize(
        e: Env,
        admin: Address,
        issuance_token: Address,
        principle: Address,
        principle_decimals: u32,
        treasury: Address,
        fee_recipient: Address,
        valuator: Option<Address>,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        let s = e.storage().instance();
        s.set(&DataKey::Admin, &admin);
        s.set(&DataKey::IssuanceToken, &issuance_token);
        s.set(&DataKey::Principle, &principle);
        s.set(&DataKey::PrincipleDecimals, &principle_decimals);
        s.set(&DataKey::Treasury, &treasury);
        s.set(&DataKey::FeeRecipient, &fee_recipient);
        if let Some(v) = valuator {
            s.set(&DataKey::Valuator, &v);
        }
        Ok(())
    }

    /// Open the market.
    ///
    /// # Errors
    /// * `InvalidTerms` - a parameter is out of range
    /// * `AlreadyInitialized` - terms were set before
    pub fn initialize_bond_terms(
        e: Env,
        admin: Address,
        control_variable: i128,
        vesting_term: u32,
        minimum_price: i128,
        max_payout: i128,
        fee: i128,
        max_debt: i128,
        initial_debt: i128,
    ) -> Result<(), ContractError> {
        storage::require_admin(&e, &admin)?;
        let terms = BondTerms {
            control_variable,
            vesting_term,
            minimum_price,
            max_payout,
            fee,
            max_debt,
        };
        validate_terms(&terms, initial_debt)?;
        let terms = storage::terms_state(&e).activate(terms)?;

        storage::set_terms(&e, &terms);
        storage::set_total_debt(&e, initial_debt);
        storage::set_last_decay(&e, e.ledger().sequence());
        Ok(())
    }

    /// Change one market parameter.
    ///
    /// # Errors
    /// * `InvalidParameter` - vesting under 10_000 ledgers, payout over 1%,
    ///   fee over 100%, or a non-positive value
    pub fn set_bond_term(
        e: Env,
        admin: Address,
        parameter: BondParameter,
        value: i128,
    ) -> Result<(), ContractError> {
        storage::require_admin(&e, &admin)?;
        let mut terms = storage::terms(&e)?;
        match parameter {
            BondParameter::Vesting => {
                if value < MIN_VESTING_TERM {
                    return Err(ContractError::InvalidParameter);
                }
                terms.vesting_term =
                    u32::try_from(value).map_err(|_| ContractError::InvalidParameter)?;
            }
            BondParameter::Payout => {
                if value <= 0 || value > MAX_PAYOUT_TERM {
                    return Err(ContractError::InvalidParameter);
                }
                terms.max_payout = value;
            }
            BondParameter::Fee => {
                if !(0..FEE_DENOMINATOR).contains(&value) {
                    return Err(ContractError::InvalidParameter);
                }
                terms.fee = value;
            }
            BondParameter::Debt => {
                if value <= 0 {
                    return Err(ContractError::InvalidParameter);
                }
                terms.max_debt = value;
            }
        }
        storage::set_terms(&e, &terms);
        events::emit_bond_term_set(&e, parameter as u32, value);
        Ok(())
    }

    /// Schedule a stepwise move of the control variable toward `target`,
    /// one `rate` step per deposit at most every `buffer` ledgers.
    ///
    /// # Errors
    /// * `IncrementTooLarge` - `rate` exceeds 2.5% of the control variable
    pub fn set_adjustment(
        e: Env,
        admin: Address,
        add: bool,
        rate: i128,
        target: i128,
        buffer: u32,
    ) -> Result<(), ContractError> {
        storage::require_admin(&e, &admin)?;
        let terms = storage::terms(&e)?;
        if rate < 0 || target <= 0 {
            return Err(ContractError::InvalidParameter);
        }
        if rate > mul_div(terms.control_variable, 25, 1_000)? {
            return Err(ContractError::IncrementTooLarge);
        }
        storage::set_adjustment(
            &e,
            &Adjustment {
                add,
                rate,
                target,
                buffer,
                last_ledger: e.ledger().sequence(),
            },
        );
        Ok(())
    }

    pub fn set_staking(e: Env, admin: Address, staking: Address) -> Result<(), ContractError> {
        storage::require_admin(&e, &admin)?;
        e.storage().instance().set(&DataKey::Staking, &staking);
        Ok(())
    }

    // ── Bonding ────────────────────────────────────────────────────────────

    /// Buy a bond with `amount` principle pulled from `payer`, credited to
    /// `depositor`. Returns the payout credited after the fee.
    ///
    /// # Errors
    /// * `MaxDebtExceeded` - the deposit's value would overflow `max_debt`
    /// * `SlippageExceeded` - the bond price is above `max_price`
    /// * `BondTooSmall` - payout under 0.01 issuance
    /// * `MaxPayoutExceeded` - payout over the per-bond supply fraction
    pub fn deposit(
        e: Env,
        payer: Address,
        amount: i128,
        max_price: i128,
        depositor: Address,
    ) -> Result<i128, ContractError> {
        payer.require_auth();
        require_positive(amount)?;
        let mut terms = storage::terms(&e)?;
        let total_debt = decay(&e, &terms)?;

        let principle = storage::principle(&e)?;
        let treasury = treasury(&e)?;
        let value = treasury.value_of(&principle, &amount);
        if add(total_debt, value)? > terms.max_debt {
            return Err(ContractError::MaxDebtExceeded);
        }

        let market = market_price(&e, &terms)?;
        let price = market.max(terms.minimum_price);
        if price > max_price {
            return Err(ContractError::SlippageExceeded);
        }
        let price_in_usd = price_in_usd(&e, price)?;

        let payout = mul_div(value, PRICE_PRECISION, price)?;
        if payout < MIN_PAYOUT {
            return Err(ContractError::BondTooSmall);
        }
        if payout > payout_limit(&e, &terms)? {
            return Err(ContractError::MaxPayoutExceeded);
        }
        let fee = mul_div(payout, terms.fee, FEE_DENOMINATOR)?;
        let net = payout - fee;

        let this = e.current_contract_address();
        let principle_token = TokenClient::new(&e, &principle);
        principle_token.transfer_from(&this, &payer, &this, &amount);
        principle_token.approve(&this, &treasury.address, &amount, &e.ledger().sequence());
        treasury.deposit(&this, &amount, &principle, &sub(value, payout)?);
        if fee > 0 {
            TokenClient::new(&e, &storage::issuance_token(&e)?).transfer(
                &this,
                &storage::fee_recipient(&e)?,
                &fee,
            );
        }

        storage::set_total_debt(&e, add(total_debt, value)?);

        let now = e.ledger().sequence();
        let bond = storage::bond(&e, &depositor).deposit(net, terms.vesting_term, price_in_usd, now)?;
        storage::set_bond(&e, &depositor, &bond);
        let expires = bond
            .record()
            .map(|r| now.saturating_add(r.vesting))
            .unwrap_or(now);

        events::emit_bond_created(&e, &depositor, amount, net, expires, price_in_usd);
        events::emit_price_changed(&e, price_in_usd_now(&e, &terms)?, ratio_of(&e, &terms)?);

        if terms.minimum_price != 0 && market > terms.minimum_price {
            terms.minimum_price = 0;
        }
        adjust(&e, &mut terms)?;
        storage::set_terms(&e, &terms);
        Ok(net)
    }

    /// Release `recipient`'s vested payout, staking it when `stake` is set.
    ///
    /// # Errors
    /// * `NothingToRedeem` - no open bond
    /// * `StakingNotConfigured` - `stake` requested without a staking contract
    pub fn redeem(e: Env, recipient: Address, stake: bool) -> Result<i128, ContractError> {
        recipient.require_auth();
        if stake && storage::staking(&e).is_none() {
            return Err(ContractError::StakingNotConfigured);
        }
        let (bond, released) = storage::bond(&e, &recipient).redeem(e.ledger().sequence())?;
        storage::set_bond(&e, &recipient, &bond);

        let remaining = bond.record().map(|r| r.payout).unwrap_or(0);
        events::emit_bond_redeemed(&e, &recipient, released, remaining);
        send_payout(&e, &recipient, released, stake)?;
        Ok(released)
    }

    /// Apply pending debt decay. Returns the decayed total debt.
    pub fn decay_debt(e: Env) -> Result<i128, ContractError> {
        let terms = storage::terms(&e)?;
        decay(&e, &terms)
    }

    // ── Views ──────────────────────────────────────────────────────────────

    pub fn terms(e: Env) -> Result<BondTerms, ContractError> {
        storage::terms(&e)
    }

    pub fn adjustment(e: Env) -> Option<Adjustment> {
        storage::adjustment(&e)
    }

    pub fn bond_info(e: Env, depositor: Address) -> Option<BondRecord> {
        storage::bond(&e, &depositor).record().cloned()
    }

    /// Vesting progress in basis points; 0 without an open bond.
    pub fn percent_vested_for(e: Env, depositor: Address) -> i128 {
        storage::bond(&e, &depositor).percent_vested(e.ledger().sequence())
    }

    /// Amount `redeem` would release now.
    pub fn pending_payout_for(e: Env, depositor: Address) -> Result<i128, ContractError> {
        storage::bond(&e, &depositor).pending_payout(e.ledger().sequence())
    }

    /// Price in hundredths of a principle unit per issuance token.
    pub fn bond_price(e: Env) -> Result<i128, ContractError> {
        price(&e, &storage::terms(&e)?)
    }

    /// Price of one issuance token in principle base units.
    pub fn bond_price_in_usd(e: Env) -> Result<i128, ContractError> {
        price_in_usd_now(&e, &storage::terms(&e)?)
    }

    /// Recorded debt, without pending decay.
    pub fn total_debt(e: Env) -> i128 {
        storage::total_debt(&e)
    }

    pub fn current_debt(e: Env) -> Result<i128, ContractError> {
        outstanding_debt(&e, &storage::terms(&e)?)
    }

    pub fn debt_decay(e: Env) -> Result<i128, ContractError> {
        pending_decay(&e, &storage::terms(&e)?)
    }

    pub fn debt_ratio(e: Env) -> Result<i128, ContractError> {
        ratio_of(&e, &storage::terms(&e)?)
    }

    /// Debt ratio in principle terms. Liquidity bonds scale by the markdown.
    pub fn standardized_debt_ratio(e: Env) -> Result<i128, ContractError> {
        let ratio = ratio_of(&e, &storage::terms(&e)?)?;
        match storage::valuator(&e) {
            Some(valuator) => {
                let markdown = ReserveValuatorClient::new(&e, &valuator).markdown(&storage::principle(&e)?);
                mul_div(ratio, markdown, RATIO_SCALE)
            }
            None => Ok(ratio),
        }
    }

    /// Largest payout a single deposit may receive right now.
    pub fn max_payout(e: Env) -> Result<i128, ContractError> {
        payout_limit(&e, &storage::terms(&e)?)
    }

    /// Payout (before fee) for a deposit worth `value` issuance.
    pub fn payout_for(e: Env, value: i128) -> Result<i128, ContractError> {
        let price = price(&e, &storage::terms(&e)?)?;
        mul_div(value, PRICE_PRECISION, price)
    }
}
