//! Shares-times-index fixed point.
//!
//! Balances are never stored. A holder owns `shares`, and
//! `balance = shares * index / SHARE_SCALE`. Compounding every holder at once
//! is a single write to the index.

use bastion_errors::ContractError;

use crate::{add, mul_div, mul_div_ceil};

/// Fixed-point scale of the share ledger: `shares = amount * SHARE_SCALE / index`.
pub const SHARE_SCALE: i128 = 1_000_000_000_000_000_000;

/// Global rebase multiplier, 9-decimal mantissa (`1_000_000_000` = 1.0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Index(i128);

impl Index {
    pub const INITIAL: Index = Index(1_000_000_000);

    pub fn from_raw(raw: i128) -> Self {
        Index(raw)
    }

    pub fn raw(self) -> i128 {
        self.0
    }

    /// Shares credited for `amount`, rounded down.
    pub fn to_shares(self, amount: i128) -> Result<i128, ContractError> {
        mul_div(amount, SHARE_SCALE, self.0)
    }

    /// Shares that must be burned to release `amount`, rounded up so a holder
    /// can never withdraw more than they own.
    pub fn to_shares_ceil(self, amount: i128) -> Result<i128, ContractError> {
        mul_div_ceil(amount, SHARE_SCALE, self.0)
    }

    /// Balance represented by `shares`, rounded down.
    pub fn to_balance(self, shares: i128) -> Result<i128, ContractError> {
        mul_div(shares, self.0, SHARE_SCALE)
    }

    /// Index after distributing `distributed` over `circulating` balance.
    ///
    /// Returns `self` unchanged when nothing circulates, so the index never
    /// decreases.
    pub fn compound(self, circulating: i128, distributed: i128) -> Result<Index, ContractError> {
        if circulating <= 0 || distributed <= 0 {
            return Ok(self);
        }
        let grown = mul_div(self.0, add(circulating, distributed)?, circulating)?;
        Ok(Index(grown))
    }
}

impl Default for Index {
    fn default() -> Self {
        Index::INITIAL
    }
}
