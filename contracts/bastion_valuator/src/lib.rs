//! Reserve Valuator Contract
//!
//! Prices liquidity-pool shares without trusting the pool's spot ratio.
//! The fair value of a constant-product pair is twice the geometric mean of
//! its reserves, which an attacker cannot move by trading against the pool.
//!
//! ## Storage Layout
//!
//! | Key                         | Tier         |
//! |-----------------------------|--------------|
//! | `DataKey::Admin`            | `instance()` |
//! | `DataKey::IssuanceToken`    | `instance()` |
//! | `DataKey::IssuanceDecimals` | `instance()` |

#![no_std]

use bastion_errors::ContractError;
use bastion_interfaces::LiquidityPoolClient;
use bastion_math::{mul, pow10, sqrt};
use soroban_sdk::{contract, contractimpl, contracttype, token::TokenClient, Address, Env, I256};



#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    IssuanceToken,
    IssuanceDecimals,
}

// ─── Helpers ───────────────────────────────────────────────────────────────

fn issuance_token(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::IssuanceToken)
        .ok_or(ContractError::NotInitialized)
}

fn issuance_decimals(e: &Env) -> Result<u32, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::IssuanceDecimals)
        .ok_or(ContractError::NotInitialized)
}

/// `a * b / d` through a 256-bit intermediate. Reserve products of
/// 18-decimal tokens leave `i128` range long before the quotient does.
fn wide_mul_div(e: &Env, a: i128, b: i128, d: i128) -> Result<i128, ContractError> {
    if d == 0 {
        return Err(ContractError::DivisionByZero);
    }
    I256::from_i128(e, a)
        .mul(&I256::from_i128(e, b))
        .div(&I256::from_i128(e, d))
        .to_i128()
        .ok_or(ContractError::Overflow)
}

/// `reserve0 * reserve1`, normalised to the pool share's decimals.
fn constant_product(e: &Env, pool: &Address) -> Result<i128, ContractError> {
    let pair = LiquidityPoolClient::new(e, pool);
    let (reserve_0, reserve_1) = pair.get_reserves();

    let token_decimals = TokenClient::new(e, &pair.token_0()).decimals()
        + TokenClient::new(e, &pair.token_1()).decimals();
    let pool_decimals = TokenClient::new(e, pool).decimals();
    let adjust = token_decimals
        .checked_sub(pool_decimals)
        .ok_or(ContractError::Underflow)?;

    wide_mul_div(e, reserve_0, reserve_1, pow10(adjust)?)
}

fn total_value(e: &Env, pool: &Address) -> Result<i128, ContractError> {
    mul(sqrt(constant_product(e, pool)?)?, 2)
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct ReserveValuator;

#[contractimpl]
impl ReserveValuator {
    /// One-time setup. `issuance_token` identifies which side of a pair is
    /// the protocol's own token when computing `markdown`.
    pub fn initialize(
        e: Env,
        admin: Address,
        issuance_token: Address,
        issuance_decimals: u32,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        let s = e.storage().instance();
        s.set(&DataKey::Admin, &admin);
        s.set(&DataKey::IssuanceToken, &issuance_token);
        s.set(&DataKey::IssuanceDecimals, &issuance_decimals);
        Ok(())
    }

    /// Constant product `k` of the pair, scaled by
    /// `10^(decimals(token0) + decimals(token1) - decimals(pool))`.
    pub fn pair_constant(e: Env, pool: Address) -> Result<i128, ContractError> {
        constant_product(&e, &pool)
    }

    /// `2 * sqrt(k)`: the value of the whole pool in pool-share units.
    pub fn fair_value(e: Env, pool: Address) -> Result<i128, ContractError> {
        total_value(&e, &pool)
    }

    /// Value of `amount` pool shares.
    pub fn valuation(e: Env, pool: Address, amount: i128) -> Result<i128, ContractError> {
        let supply = LiquidityPoolClient::new(&e, &pool).total_supply();
        if supply == 0 {
            return Err(ContractError::DivisionByZero);
        }
        wide_mul_div(&e, total_value(&e, &pool)?, amount, supply)
    }

    /// Price of one pool-share unit of value in the non-issuance reserve,
    /// scaled by `10^issuance_decimals`. Used to quote liquidity bonds in
    /// principle terms.
    pub fn markdown(e: Env, pool: Address) -> Result<i128, ContractError> {
        let pair = LiquidityPoolClient::new(&e, &pool);
        let (reserve_0, reserve_1) = pair.get_reserves();
        let other = if pair.token_0() == issuance_token(&e)? {
            reserve_1
        } else {
            reserve_0
        };
        wide_mul_div(
            &e,
            mul(other, 2)?,
            pow10(issuance_decimals(&e)?)?,
            total_value(&e, &pool)?,
        )
    }
}
