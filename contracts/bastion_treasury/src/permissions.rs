//! Two-step capability grants.
//!
//! A grant is `queue`d by the admin, becomes eligible once `queue_delay`
//! seconds have passed, and is switched on by `toggle`. Toggling an active
//! grant switches it off again. Activation consumes the queue stamp, so a
//! grant that was switched off must be queued anew before it can return.

use bastion_errors::ContractError;
use bastion_math::add_u64;
use soroban_sdk::{Address, Env};

use crate::storage;
use crate::types::{Permission, Role};

/// The single activation rule: only an active grant authorizes.
pub fn is_authorized(e: &Env, role: Role, who: &Address) -> bool {
    storage::load_permission(e, role, who).active
}

pub fn require(e: &Env, role: Role, who: &Address) -> Result<(), ContractError> {
    if is_authorized(e, role, who) {
        Ok(())
    } else {
        Err(ContractError::PermissionDenied)
    }
}

/// Stamp a pending grant and return its eta.
pub fn queue(e: &Env, role: Role, who: &Address) -> Result<u64, ContractError> {
    let now = e.ledger().timestamp();
    let eta = add_u64(now, storage::queue_delay(e)?)?;
    let mut permission = storage::load_permission(e, role, who);
    permission.pending_since = Some(now);
    permission.eta = eta;
    storage::save_permission(e, role, who, &permission);
    Ok(eta)
}

/// Flip the grant. Returns the new `active` flag.
pub fn toggle(e: &Env, role: Role, who: &Address) -> Result<bool, ContractError> {
    let mut permission = storage::load_permission(e, role, who);
    if permission.active {
        permission.active = false;
    } else {
        activate(e, &mut permission)?;
    }
    storage::save_permission(e, role, who, &permission);
    Ok(permission.active)
}

fn activate(e: &Env, permission: &mut Permission) -> Result<(), ContractError> {
    if permission.pending_since.is_none() {
        return Err(ContractError::NoPendingGrant);
    }
    if e.ledger().timestamp() < permission.eta {
        return Err(ContractError::QueueNotExpired);
    }
    permission.active = true;
    permission.pending_since = None;
    Ok(())
}
