use soroban_sdk::{contracttype, Address};

// ─── Epoch ─────────────────────────────────────────────────────────────────

/// Rebase schedule.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Epoch {
    /// Seconds per epoch. Never changes after `initialize`.
    pub length: u64,
    /// Increases by exactly one per effective rebase.
    pub number: u32,
    /// Timestamp at which the current epoch closes. Advances by `length`.
    pub end_time: u64,
    /// Reward the next rebase compounds into the index.
    pub distribute: i128,
}

// ─── Warmup ────────────────────────────────────────────────────────────────

/// Stake waiting out the warmup period. It does not earn rebases until
/// claimed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claim {
    /// Issuance tokens deposited and not yet converted to shares.
    pub deposit: i128,
    /// Epoch number from which the claim may be converted.
    pub expiry: u32,
    /// When set, only the recipient may add to this claim.
    pub lock: bool,
}

impl Claim {
    pub fn empty() -> Self {
        Claim {
            deposit: 0,
            expiry: 0,
            lock: false,
        }
    }
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    IssuanceToken,
    Epoch,
    /// Raw `Index` mantissa.
    Index,
    TotalShares,
    Distributor,
    /// Warmup length in epochs.
    WarmupPeriod,
    /// Sum of all unconverted claim deposits.
    WarmupSupply,
    /// Per-holder shares. Stored in `persistent()`.
    Shares(Address),
    /// Per-recipient warmup claim. Stored in `persistent()`.
    Claim(Address),
}
