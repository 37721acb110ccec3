//! Overflow-safe arithmetic for reserve, bond and rebase accounting.
//!
//! Every helper returns `Result<_, ContractError>` so callers can propagate
//! arithmetic failures with `?` instead of trapping the host.

#![no_std]

use bastion_errors::ContractError;

mod index;

pub use index::{Index, SHARE_SCALE};

/// Basis-point denominator (100% = 10_000).
pub const BPS: i128 = 10_000;

/// Checked `i128` addition.
#[inline]
pub fn add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// Checked `i128` subtraction.
#[inline]
pub fn sub(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::Underflow)
}

/// Checked `i128` multiplication.
#[inline]
pub fn mul(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::Overflow)
}

/// Checked `i128` division (floor toward zero).
#[inline]
pub fn div(a: i128, b: i128) -> Result<i128, ContractError> {
    if b == 0 {
        return Err(ContractError::DivisionByZero);
    }
    a.checked_div(b).ok_or(ContractError::Overflow)
}

/// `a * b / d`, rounded down.
#[inline]
pub fn mul_div(a: i128, b: i128, d: i128) -> Result<i128, ContractError> {
    div(mul(a, b)?, d)
}

/// `a * b / d`, rounded up. Operands are expected to be non-negative.
pub fn mul_div_ceil(a: i128, b: i128, d: i128) -> Result<i128, ContractError> {
    let product = mul(a, b)?;
    let q = div(product, d)?;
    if product % d != 0 {
        add(q, 1)
    } else {
        Ok(q)
    }
}

/// `10^exp` as `i128`.
pub fn pow10(exp: u32) -> Result<i128, ContractError> {
    10_i128.checked_pow(exp).ok_or(ContractError::Overflow)
}

/// Integer square root, rounded down (Babylonian iteration).
pub fn sqrt(x: i128) -> Result<i128, ContractError> {
    if x < 0 {
        return Err(ContractError::Underflow);
    }
    if x < 2 {
        return Ok(x);
    }
    let mut z = x;
    let mut y = x / 2 + 1;
    while y < z {
        z = y;
        y = (x / y + y) / 2;
    }
    Ok(z)
}

/// Rescale `amount` from `from` decimals to `to` decimals, truncating when
/// precision is lost.
pub fn scale_decimals(amount: i128, from: u32, to: u32) -> Result<i128, ContractError> {
    if from == to {
        Ok(amount)
    } else if from > to {
        div(amount, pow10(from - to)?)
    } else {
        mul(amount, pow10(to - from)?)
    }
}

/// `amount * bps / 10_000`.
#[inline]
pub fn bps(amount: i128, bps: i128) -> Result<i128, ContractError> {
    mul_div(amount, bps, BPS)
}

/// Checked `u32` subtraction (ledger sequence arithmetic).
#[inline]
pub fn sub_u32(a: u32, b: u32) -> Result<u32, ContractError> {
    a.checked_sub(b).ok_or(ContractError::Underflow)
}

/// Checked `u64` addition (timestamp arithmetic).
#[inline]
pub fn add_u64(a: u64, b: u64) -> Result<u64, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}
