use soroban_sdk::{contracttype, Address};

// ─── Capabilities ──────────────────────────────────────────────────────────

/// Capability held by an address (or, for the `*Token` roles, by an asset).
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// May deposit plain reserve assets.
    ReserveDepositor = 0,
    /// May burn issuance to redeem reserve assets.
    ReserveSpender = 1,
    /// Marks a plain asset as accepted collateral.
    ReserveToken = 2,
    /// May withdraw plain reserve assets against excess reserves.
    ReserveManager = 3,
    /// May deposit pooled-liquidity assets.
    LiquidityDepositor = 4,
    /// Marks a pooled-liquidity asset as accepted collateral.
    LiquidityToken = 5,
    /// May withdraw pooled-liquidity assets against excess reserves.
    LiquidityManager = 6,
    /// May mint issuance rewards out of excess reserves.
    RewardManager = 7,
}

impl Role {
    pub fn depositor(pooled: bool) -> Role {
        if pooled {
            Role::LiquidityDepositor
        } else {
            Role::ReserveDepositor
        }
    }

    pub fn token(pooled: bool) -> Role {
        if pooled {
            Role::LiquidityToken
        } else {
            Role::ReserveToken
        }
    }

    pub fn manager(pooled: bool) -> Role {
        if pooled {
            Role::LiquidityManager
        } else {
            Role::ReserveManager
        }
    }

    pub fn is_token_role(self) -> bool {
        matches!(self, Role::ReserveToken | Role::LiquidityToken)
    }
}

/// Two-phase grant: `queue` stamps `pending_since`, `toggle` activates once
/// `eta` has passed and clears the stamp.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Permission {
    pub active: bool,
    /// Ledger timestamp of the outstanding `queue` call, if any.
    pub pending_since: Option<u64>,
    /// Earliest timestamp at which the pending grant may be toggled on.
    pub eta: u64,
}

impl Permission {
    pub fn inactive() -> Self {
        Permission {
            active: false,
            pending_since: None,
            eta: 0,
        }
    }
}

// ─── Reserves ──────────────────────────────────────────────────────────────

/// Registered collateral. `asset`, `decimals` and `is_pooled_liquidity` never
/// change after `register_asset`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveAsset {
    pub asset: Address,
    pub decimals: u32,
    pub is_pooled_liquidity: bool,
    /// Valuator override bound when the `LiquidityToken` grant is toggled on.
    pub calculator: Option<Address>,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract admin address.
    Admin,
    /// Issuance token (this contract is its mint admin).
    IssuanceToken,
    IssuanceDecimals,
    /// Default valuator for pooled-liquidity assets.
    Valuator,
    /// Seconds between `queue` and the earliest `toggle`.
    QueueDelay,
    /// Aggregate reserve value in issuance units.
    TotalReserves,
    /// Issuance minted minus issuance burned by this contract.
    IssuanceSupply,
    /// Registration order of reserve assets (`Vec<Address>`).
    Assets,
    /// Per-asset registration record. Stored in `persistent()`.
    Asset(Address),
    /// Raw amount of each asset held. Stored in `persistent()`.
    Holdings(Address),
    /// Capability table. Stored in `persistent()`.
    Permission(Role, Address),
}
