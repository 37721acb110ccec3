use soroban_sdk::{contracttype, Address};

// ─── Terms ─────────────────────────────────────────────────────────────────

/// Market parameters, fixed by `initialize_bond_terms` and tunable only
/// through `set_bond_term` / the control-variable adjustment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondTerms {
    /// Scales the debt ratio's effect on price.
    pub control_variable: i128,
    /// Ledgers for a bond to vest fully.
    pub vesting_term: u32,
    /// Price floor in hundredths; cleared once the market price exceeds it.
    pub minimum_price: i128,
    /// Largest single payout, in thousandths of a percent of supply
    /// (`1000` = 1%).
    pub max_payout: i128,
    /// Fee on each payout, in millionths (`10_000` = 1%).
    pub fee: i128,
    /// Ceiling on outstanding debt, in issuance units.
    pub max_debt: i128,
}

/// Scheduled per-deposit step of the control variable toward `target`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Adjustment {
    pub add: bool,
    /// Step size. Zero once the target is reached.
    pub rate: i128,
    pub target: i128,
    /// Minimum ledgers between two steps.
    pub buffer: u32,
    /// Ledger of the last step (or of scheduling).
    pub last_ledger: u32,
}

/// Parameter selector for `set_bond_term`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BondParameter {
    Vesting = 0,
    Payout = 1,
    Fee = 2,
    Debt = 3,
}

// ─── Bonds ─────────────────────────────────────────────────────────────────

/// One depositor's open bond.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondRecord {
    /// Issuance still owed.
    pub payout: i128,
    /// Ledgers left until fully vested, measured from `last_ledger`.
    pub vesting: u32,
    /// Ledger of the last deposit or redemption.
    pub last_ledger: u32,
    /// Principle price paid on the latest deposit. Informational.
    pub price_paid: i128,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    IssuanceToken,
    /// Asset accepted as payment.
    Principle,
    PrincipleDecimals,
    Treasury,
    FeeRecipient,
    /// Set for liquidity bonds only.
    Valuator,
    Staking,
    Terms,
    TotalDebt,
    /// Ledger of the last debt decay.
    LastDecay,
    Adjustment,
    /// Per-depositor open bond. Stored in `persistent()`.
    Bond(Address),
}
