//! Treasury Contract
//!
//! Custodian of the reserve assets backing the issuance token. Depositors
//! hand in collateral and receive issuance minted against its value; managers
//! may only take out what is not needed to back outstanding issuance.
//!
//! ## Key design decisions
//!
//! - **Treasury owns minting**: it is the issuance token's mint admin, and
//!   `issuance_supply` counts exactly what it minted minus what it burned.
//! - **Capabilities are a single table** keyed by `(Role, Address)`. Asset
//!   acceptance is the same table with the asset as grantee.
//! - **Two-step grants**: `queue` then `toggle` after `queue_delay` seconds.
//! - **Checks-Effects-Interactions**: guards first, then storage, then token
//!   calls. A failed invocation is rolled back by the host.
//!
//! ## Storage Layout
//!
//! | Key                            | Tier           |
//! |--------------------------------|----------------|
//! | `Admin`, `IssuanceToken`, ...  | `instance()`   |
//! | `TotalReserves`, `IssuanceSupply`, `Assets` | `instance()` |
//! | `Asset(addr)`, `Holdings(addr)`| `persistent()` |
//! | `Permission(role, addr)`       | `persistent()` |

#![no_std]

mod events;
mod permissions;
mod storage;
pub mod types;

pub use types::{Permission, ReserveAsset, Role};

use bastion_errors::ContractError;
use bastion_interfaces::ReserveValuatorClient;
use bastion_math::{add, scale_decimals, sub};
use soroban_sdk::{
    contract, contractimpl,
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};
use types::DataKey;



#[cfg(test)]
mod test_treasury;


// ─── Helpers ───────────────────────────────────────────────────────────────

fn require_positive(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::AmountMustBePositive);
    }
    Ok(())
}

fn value_in_issuance(e: &Env, record: &ReserveAsset, amount: i128) -> Result<i128, ContractError> {
    if record.is_pooled_liquidity {
        let calculator = match &record.calculator {
            Some(c) => c.clone(),
            None => storage::valuator(e)?,
        };
        Ok(ReserveValuatorClient::new(e, &calculator).valuation(&record.asset, &amount))
    } else {
        scale_decimals(amount, record.decimals, storage::issuance_decimals(e)?)
    }
}

fn excess(e: &Env) -> i128 {
    let total = storage::total_reserves(e);
    let supply = storage::issuance_supply(e);
    if total > supply {
        total - supply
    } else {
        0
    }
}

fn mint_issuance(e: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
    StellarAssetClient::new(e, &storage::issuance_token(e)?).mint(to, &amount);
    storage::set_issuance_supply(e, add(storage::issuance_supply(e), amount)?);
    Ok(())
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct Treasury;

#[contractimpl]
impl Treasury {
    // ── Admin setup ────────────────────────────────────────────────────────

    /// One-time initialization.
    ///
    /// The caller must separately make this contract the issuance token's
    /// admin (`set_admin`) before any deposit can mint.
    pub fn initialize(
        e: Env,
        admin: Address,
        issuance_token: Address,
        issuance_decimals: u32,
        valuator: Address,
        queue_delay: u64,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&e) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        let s = e.storage().instance();
        s.set(&DataKey::Admin, &admin);
        s.set(&DataKey::IssuanceToken, &issuance_token);
        s.set(&DataKey::IssuanceDecimals, &issuance_decimals);
        s.set(&DataKey::Valuator, &valuator);
        s.set(&DataKey::QueueDelay, &queue_delay);
        storage::set_total_reserves(&e, 0);
        storage::set_issuance_supply(&e, 0);
        Ok(())
    }

    /// Register a reserve asset. Registration alone does not make it
    /// depositable; its `ReserveToken` / `LiquidityToken` grant must also be
    /// active.
    pub fn register_asset(
        e: Env,
        admin: Address,
        asset: Address,
        decimals: u32,
        is_pooled_liquidity: bool,
    ) -> Result<(), ContractError> {
        storage::require_admin(&e, &admin)?;
        if storage::has_asset(&e, &asset) {
            return Err(ContractError::AssetAlreadyRegistered);
        }
        let record = ReserveAsset {
            asset: asset.clone(),
            decimals,
            is_pooled_liquidity,
            calculator: None,
        };
        storage::save_asset(&e, &record);
        storage::push_asset(&e, &asset);
        events::emit_asset_registered(&e, &asset, decimals, is_pooled_liquidity);
        Ok(())
    }

    // ── Capabilities ───────────────────────────────────────────────────────

    /// Queue `role` for `address`. Returns the earliest `toggle` timestamp.
    pub fn queue(e: Env, admin: Address, role: Role, address: Address) -> Result<u64, ContractError> {
        storage::require_admin(&e, &admin)?;
        let eta = permissions::queue(&e, role, &address)?;
        events::emit_permission_queued(&e, role, &address, eta);
        Ok(eta)
    }

    /// Activate a matured queued grant, or deactivate an active one.
    ///
    /// `calculator` is bound as the asset's valuator when `role` is
    /// `LiquidityToken` and the grant is being activated.
    ///
    /// # Errors
    /// * `NoPendingGrant` - activation without a prior `queue`
    /// * `QueueNotExpired` - activation before the eta
    /// * `AssetNotAccepted` - a token role for an unregistered asset
    pub fn toggle(
        e: Env,
        admin: Address,
        role: Role,
        address: Address,
        calculator: Option<Address>,
    ) -> Result<bool, ContractError> {
        storage::require_admin(&e, &admin)?;
        if role.is_token_role() && !storage::has_asset(&e, &address) {
            return Err(ContractError::AssetNotAccepted);
        }
        let active = permissions::toggle(&e, role, &address)?;
        if active && role == Role::LiquidityToken && calculator.is_some() {
            let mut record = storage::load_asset(&e, &address)?;
            record.calculator = calculator;
            storage::save_asset(&e, &record);
        }
        events::emit_permission_toggled(&e, role, &address, active);
        Ok(active)
    }

    pub fn is_authorized(e: Env, role: Role, address: Address) -> bool {
        permissions::is_authorized(&e, role, &address)
    }

    // ── Reserve flows ──────────────────────────────────────────────────────

    /// Deposit `amount` of `asset` and mint `value - profit` issuance to the
    /// depositor. Returns the amount minted.
    ///
    /// # Errors
    /// * `PermissionDenied` - depositor lacks the matching depositor grant
    /// * `AssetNotAccepted` - asset unregistered or its token grant inactive
    /// * `InsufficientValue` - `profit` exceeds the deposit's value
    pub fn deposit(
        e: Env,
        depositor: Address,
        amount: i128,
        asset: Address,
        profit: i128,
    ) -> Result<i128, ContractError> {
        depositor.require_auth();
        require_positive(amount)?;
        if profit < 0 {
            return Err(ContractError::InvalidParameter);
        }
        let record = storage::load_asset(&e, &asset)?;
        let pooled = record.is_pooled_liquidity;
        permissions::require(&e, Role::depositor(pooled), &depositor)?;
        if !permissions::is_authorized(&e, Role::token(pooled), &asset) {
            return Err(ContractError::AssetNotAccepted);
        }

        let value = value_in_issuance(&e, &record, amount)?;
        if profit > value {
            return Err(ContractError::InsufficientValue);
        }
        let minted = value - profit;

        storage::set_holdings(&e, &asset, add(storage::holdings(&e, &asset), amount)?);
        storage::set_total_reserves(&e, add(storage::total_reserves(&e), value)?);

        let contract = e.current_contract_address();
        TokenClient::new(&e, &asset).transfer_from(&contract, &depositor, &contract, &amount);
        if minted > 0 {
            mint_issuance(&e, &depositor, minted)?;
        }

        events::emit_deposit(&e, &depositor, &asset, amount, value, minted);
        Ok(minted)
    }

    /// Withdraw collateral against excess reserves.
    ///
    /// # Errors
    /// * `PermissionDenied` - manager lacks `ReserveManager` / `LiquidityManager`
    /// * `ExceedsExcessReserves` - the withdrawal would under-back issuance
    /// * `InsufficientReserves` - holdings of the asset are short
    pub fn withdraw(e: Env, manager: Address, asset: Address, amount: i128) -> Result<(), ContractError> {
        manager.require_auth();
        require_positive(amount)?;
        let record = storage::load_asset(&e, &asset)?;
        permissions::require(&e, Role::manager(record.is_pooled_liquidity), &manager)?;

        let value = value_in_issuance(&e, &record, amount)?;
        if value > excess(&e) {
            return Err(ContractError::ExceedsExcessReserves);
        }
        let held = storage::holdings(&e, &asset);
        if held < amount {
            return Err(ContractError::InsufficientReserves);
        }

        storage::set_holdings(&e, &asset, held - amount);
        storage::set_total_reserves(&e, sub(storage::total_reserves(&e), value)?);

        let contract = e.current_contract_address();
        TokenClient::new(&e, &asset).transfer(&contract, &manager, &amount);

        events::emit_withdrawal(&e, &manager, &asset, amount, value);
        Ok(())
    }

    /// Burn issuance worth `amount` of a plain reserve asset from the spender
    /// (who must have approved this contract) and release the asset to them.
    /// Returns the issuance burned.
    pub fn redeem_reserves(
        e: Env,
        spender: Address,
        asset: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        spender.require_auth();
        require_positive(amount)?;
        permissions::require(&e, Role::ReserveSpender, &spender)?;
        let record = storage::load_asset(&e, &asset)?;
        if record.is_pooled_liquidity || !permissions::is_authorized(&e, Role::ReserveToken, &asset) {
            return Err(ContractError::AssetNotAccepted);
        }

        let value = value_in_issuance(&e, &record, amount)?;
        let held = storage::holdings(&e, &asset);
        if held < amount {
            return Err(ContractError::InsufficientReserves);
        }

        storage::set_holdings(&e, &asset, held - amount);
        storage::set_total_reserves(&e, sub(storage::total_reserves(&e), value)?);
        storage::set_issuance_supply(&e, sub(storage::issuance_supply(&e), value)?);

        let contract = e.current_contract_address();
        TokenClient::new(&e, &storage::issuance_token(&e)?).burn_from(&contract, &spender, &value);
        TokenClient::new(&e, &asset).transfer(&contract, &spender, &amount);

        events::emit_redeemed(&e, &spender, &asset, amount, value);
        Ok(value)
    }

    /// Mint `amount` issuance to `recipient` out of excess reserves.
    pub fn mint_rewards(
        e: Env,
        manager: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        manager.require_auth();
        require_positive(amount)?;
        permissions::require(&e, Role::RewardManager, &manager)?;
        if amount > excess(&e) {
            return Err(ContractError::ExceedsExcessReserves);
        }
        mint_issuance(&e, &recipient, amount)?;
        events::emit_rewards_minted(&e, &manager, &recipient, amount);
        Ok(())
    }

    /// Recompute `total_reserves` from current holdings at current
    /// valuations. Returns the new total.
    pub fn audit_reserves(e: Env, admin: Address) -> Result<i128, ContractError> {
        storage::require_admin(&e, &admin)?;
        let mut total = 0_i128;
        for asset in storage::asset_list(&e).iter() {
            let held = storage::holdings(&e, &asset);
            if held == 0 {
                continue;
            }
            let record = storage::load_asset(&e, &asset)?;
            total = add(total, value_in_issuance(&e, &record, held)?)?;
        }
        storage::set_total_reserves(&e, total);
        events::emit_reserves_audited(&e, total);
        Ok(total)
    }

    // ── Views ──────────────────────────────────────────────────────────────

    /// Value of `amount` of a registered asset in issuance units.
    pub fn value_of(e: Env, asset: Address, amount: i128) -> Result<i128, ContractError> {
        let record = storage::load_asset(&e, &asset)?;
        value_in_issuance(&e, &record, amount)
    }

    /// Reserve value not needed to back issuance supply, floored at zero.
    pub fn excess_reserves(e: Env) -> i128 {
        excess(&e)
    }

    pub fn total_reserves(e: Env) -> i128 {
        storage::total_reserves(&e)
    }

    pub fn holdings(e: Env, asset: Address) -> i128 {
        storage::holdings(&e, &asset)
    }

    pub fn issuance_supply(e: Env) -> i128 {
        storage::issuance_supply(&e)
    }

    pub fn issuance_token(e: Env) -> Result<Address, ContractError> {
        storage::issuance_token(&e)
    }

    pub fn get_permission(e: Env, role: Role, address: Address) -> Permission {
        storage::load_permission(&e, role, &address)
    }

    pub fn get_asset(e: Env, asset: Address) -> Result<ReserveAsset, ContractError> {
        storage::load_asset(&e, &asset)
    }
}
