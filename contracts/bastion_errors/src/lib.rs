#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup, initialization and parameter validation (codes 1-99).
    Initialization,
    /// Caller identity and capability errors (codes 100-199).
    Authorization,
    /// Reserve and issuance accounting errors (codes 200-299).
    Treasury,
    /// Bond market errors (codes 300-399).
    Bond,
    /// Rebase staking errors (codes 400-499).
    Staking,
    /// Reward distribution errors (codes 500-599).
    Distribution,
    /// Fixed-point and checked-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by all Bastion smart contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///         Use the ErrorExt trait to retrieve the category and description.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Treasury
///   300 - 399 : Bond
///   400 - 499 : Staking
///   500 - 599 : Distribution
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    /// Contracts: all
    NotInitialized = 1,

    /// Contract (or its bond terms) has already been initialized.
    /// Contracts: all
    AlreadyInitialized = 2,

    /// Bond terms failed validation.
    /// Contracts: bond
    InvalidTerms = 3,

    /// A configuration parameter is out of its allowed range.
    /// Contracts: bond, staking, distributor, treasury
    InvalidParameter = 4,

    // --- Authorization (100-199) ---
    /// Caller is not the admin.
    /// Contracts: all
    NotAdmin = 100,

    /// Caller does not hold an active capability for the operation.
    /// Contracts: treasury
    PermissionDenied = 101,

    /// `toggle` was called for a grant that was never queued.
    /// Contracts: treasury
    NoPendingGrant = 102,

    /// `toggle` was called before the queued grant's activation time.
    /// Contracts: treasury
    QueueNotExpired = 103,

    // --- Treasury (200-299) ---
    /// Amount argument must be strictly positive (> 0).
    /// Contracts: treasury, bond, staking
    AmountMustBePositive = 200,

    /// Reserve asset is already registered; registration is immutable.
    /// Contracts: treasury
    AssetAlreadyRegistered = 201,

    /// Asset is not registered or its token capability is inactive.
    /// Contracts: treasury
    AssetNotAccepted = 202,

    /// Claimed profit exceeds the deposit's value.
    /// Contracts: treasury
    InsufficientValue = 203,

    /// Operation would draw on reserves that back issuance supply.
    /// Contracts: treasury
    ExceedsExcessReserves = 204,

    /// Treasury does not hold enough of the requested asset.
    /// Contracts: treasury
    InsufficientReserves = 205,

    // --- Bond (300-399) ---
    /// Bond price is above the depositor's maximum acceptable price.
    /// Contracts: bond
    SlippageExceeded = 300,

    /// Deposit would push outstanding debt above the configured maximum.
    /// Contracts: bond
    MaxDebtExceeded = 301,

    /// Payout is larger than the allowed fraction of issuance supply.
    /// Contracts: bond
    MaxPayoutExceeded = 302,

    /// Payout is below the minimum bond size.
    /// Contracts: bond
    BondTooSmall = 303,

    /// Depositor has no open bond to redeem.
    /// Contracts: bond
    NothingToRedeem = 304,

    /// Auto-stake requested but no staking contract is configured.
    /// Contracts: bond
    StakingNotConfigured = 305,

    /// Control variable adjustment step is too large.
    /// Contracts: bond
    IncrementTooLarge = 306,

    // --- Staking (400-499) ---
    /// Holder's staked balance is insufficient.
    /// Contracts: staking
    InsufficientStakedBalance = 400,

    /// Recipient locked their warmup claim against third-party deposits.
    /// Contracts: staking
    DepositsLocked = 401,

    /// No distributor has been configured for the rebase engine.
    /// Contracts: staking
    DistributorNotConfigured = 402,

    // --- Distribution (500-599) ---
    /// No distribution recipient matches the given index/address.
    /// Contracts: distributor
    RecipientNotFound = 500,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    /// Contracts: all
    Overflow = 700,

    /// Integer underflow detected during a checked arithmetic operation.
    /// Contracts: all
    Underflow = 701,

    /// Division by zero, e.g. valuing a pool with zero share supply.
    /// Contracts: valuator, bond, staking
    DivisionByZero = 702,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
/// @dev    Use this for structured logging, monitoring, and off-chain display.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidTerms
            | ContractError::InvalidParameter => ErrorCategory::Initialization,

            ContractError::NotAdmin
            | ContractError::PermissionDenied
            | ContractError::NoPendingGrant
            | ContractError::QueueNotExpired => ErrorCategory::Authorization,

            ContractError::AmountMustBePositive
            | ContractError::AssetAlreadyRegistered
            | ContractError::AssetNotAccepted
            | ContractError::InsufficientValue
            | ContractError::ExceedsExcessReserves
            | ContractError::InsufficientReserves => ErrorCategory::Treasury,

            ContractError::SlippageExceeded
            | ContractError::MaxDebtExceeded
            | ContractError::MaxPayoutExceeded
            | ContractError::BondTooSmall
            | ContractError::NothingToRedeem
            | ContractError::StakingNotConfigured
            | ContractError::IncrementTooLarge => ErrorCategory::Bond,

            ContractError::InsufficientStakedBalance
            | ContractError::DepositsLocked
            | ContractError::DistributorNotConfigured => ErrorCategory::Staking,

            ContractError::RecipientNotFound => ErrorCategory::Distribution,

            ContractError::Overflow | ContractError::Underflow | ContractError::DivisionByZero => {
                ErrorCategory::Arithmetic
            }
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::InvalidTerms => "Bond terms are invalid",
            ContractError::InvalidParameter => "Parameter is out of its allowed range",
            ContractError::NotAdmin => "Caller is not the admin",
            ContractError::PermissionDenied => "Caller does not hold an active capability",
            ContractError::NoPendingGrant => "Capability must be queued before it is toggled",
            ContractError::QueueNotExpired => "Queued capability is not yet activatable",
            ContractError::AmountMustBePositive => "Amount must be strictly positive (> 0)",
            ContractError::AssetAlreadyRegistered => "Reserve asset is already registered",
            ContractError::AssetNotAccepted => "Asset is not an accepted reserve",
            ContractError::InsufficientValue => "Profit exceeds the deposited value",
            ContractError::ExceedsExcessReserves => "Insufficient excess reserves",
            ContractError::InsufficientReserves => "Treasury holds too little of the asset",
            ContractError::SlippageExceeded => "Bond price is above the maximum price",
            ContractError::MaxDebtExceeded => "Bond capacity reached",
            ContractError::MaxPayoutExceeded => "Bond payout is too large",
            ContractError::BondTooSmall => "Bond payout is too small",
            ContractError::NothingToRedeem => "No open bond to redeem",
            ContractError::StakingNotConfigured => "Staking contract is not configured",
            ContractError::IncrementTooLarge => "Adjustment increment is too large",
            ContractError::InsufficientStakedBalance => "Insufficient staked balance",
            ContractError::DepositsLocked => "Deposits for this account are locked",
            ContractError::DistributorNotConfigured => "Distributor is not configured",
            ContractError::RecipientNotFound => "Distribution recipient not found",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
            ContractError::Underflow => "Integer underflow in checked arithmetic",
            ContractError::DivisionByZero => "Division by zero",
        }
    }
}
