//! Lifecycles of the market terms and of each depositor's bond.
//!
//! Terms move `Uninitialized → Active` once. A depositor's bond moves
//! `NoBond → Open → Closed`; a closed bond's record is deleted, so the next
//! deposit starts a fresh cycle from `NoBond`.

use bastion_errors::ContractError;
use bastion_math::{add, mul, mul_div, mul_div_ceil};

use crate::types::{BondRecord, BondTerms};

/// Vesting progress denominator: 10_000 = fully vested.
pub const FULLY_VESTED: i128 = bastion_math::BPS;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TermsState {
    Uninitialized,
    Active(BondTerms),
}

impl TermsState {
    pub fn from_stored(terms: Option<BondTerms>) -> Self {
        match terms {
            Some(t) => TermsState::Active(t),
            None => TermsState::Uninitialized,
        }
    }

    /// `Uninitialized → Active`. Terms cannot be initialized twice.
    pub fn activate(self, terms: BondTerms) -> Result<BondTerms, ContractError> {
        match self {
            TermsState::Uninitialized => Ok(terms),
            TermsState::Active(_) => Err(ContractError::AlreadyInitialized),
        }
    }

    pub fn active(self) -> Result<BondTerms, ContractError> {
        match self {
            TermsState::Active(t) => Ok(t),
            TermsState::Uninitialized => Err(ContractError::NotInitialized),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BondState {
    NoBond,
    Open(BondRecord),
    /// Fully redeemed. Never persisted.
    Closed,
}

impl BondState {
    pub fn from_stored(record: Option<BondRecord>) -> Self {
        match record {
            Some(r) => BondState::Open(r),
            None => BondState::NoBond,
        }
    }

    pub fn record(&self) -> Option<&BondRecord> {
        match self {
            BondState::Open(r) => Some(r),
            _ => None,
        }
    }

    /// Basis points of the open payout that have vested by ledger `now`.
    pub fn percent_vested(&self, now: u32) -> i128 {
        match self {
            BondState::Open(r) => {
                if r.vesting == 0 {
                    return FULLY_VESTED;
                }
                let elapsed = now.saturating_sub(r.last_ledger) as i128;
                let percent = elapsed * FULLY_VESTED / r.vesting as i128;
                percent.min(FULLY_VESTED)
            }
            _ => 0,
        }
    }

    /// Amount a redemption at `now` would release.
    pub fn pending_payout(&self, now: u32) -> Result<i128, ContractError> {
        match self {
            BondState::Open(r) => {
                let percent = self.percent_vested(now);
                if percent >= FULLY_VESTED {
                    Ok(r.payout)
                } else {
                    mul_div(r.payout, percent, FULLY_VESTED)
                }
            }
            _ => Ok(0),
        }
    }

    /// Credit `net` payout vesting over `vesting_term` ledgers from `now`.
    ///
    /// Merging into an open bond weights the remaining vesting of the old
    /// payout against the full term of the new one, rounding up.
    pub fn deposit(
        self,
        net: i128,
        vesting_term: u32,
        price_paid: i128,
        now: u32,
    ) -> Result<BondState, ContractError> {
        let record = match self {
            BondState::NoBond | BondState::Closed => BondRecord {
                payout: net,
                vesting: vesting_term,
                last_ledger: now,
                price_paid,
            },
            BondState::Open(old) => {
                let elapsed = now.saturating_sub(old.last_ledger);
                let remaining = old.vesting.saturating_sub(elapsed) as i128;
                let weighted = add(mul(old.payout, remaining)?, mul(net, vesting_term as i128)?)?;
                let payout = add(old.payout, net)?;
                let vesting = mul_div_ceil(weighted, 1, payout)?;
                BondRecord {
                    payout,
                    vesting: u32::try_from(vesting).map_err(|_| ContractError::Overflow)?,
                    last_ledger: now,
                    price_paid,
                }
            }
        };
        Ok(BondState::Open(record))
    }

    /// Release what has vested by `now`. Returns the next state and the
    /// amount released.
    ///
    /// A partial redemption shortens `vesting` by the ledgers elapsed, so the
    /// full-vest ledger stays where it was.
    pub fn redeem(self, now: u32) -> Result<(BondState, i128), ContractError> {
        let percent = self.percent_vested(now);
        let mut record = match self {
            BondState::Open(r) => r,
            _ => return Err(ContractError::NothingToRedeem),
        };
        if percent >= FULLY_VESTED {
            return Ok((BondState::Closed, record.payout));
        }

        let released = mul_div(record.payout, percent, FULLY_VESTED)?;
        let elapsed = now.saturating_sub(record.last_ledger);
        record.payout -= released;
        record.vesting = record.vesting.saturating_sub(elapsed);
        record.last_ledger = now;
        Ok((BondState::Open(record), released))
    }
}
