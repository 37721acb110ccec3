#![cfg(test)]

use crate::test_helpers::*;
use bastion_errors::ContractError;
use soroban_sdk::{testutils::Address as _, Address, Env};

fn bonded(e: &Env) -> BondSetup<'_> {
    let s = setup(e);
    s.bond.deposit(&s.payer, &(100 * DAI), &MINIMUM_PRICE, &s.payer);
    s
}

#[test]
fn test_partial_redeem() {
    let e = Env::default();
    let s = bonded(&e);
    advance_ledgers(&e, 2);

    assert_eq!(s.bond.percent_vested_for(&s.payer), 2_000);
    assert_eq!(s.bond.pending_payout_for(&s.payer), 4_950_000_000);

    let released = s.bond.redeem(&s.payer, &false);
    assert_eq!(released, 4_950_000_000);
    assert_eq!(issuance_balance(&e, &s, &s.payer), 2_500 * TOKEN + released);

    let record = s.bond.bond_info(&s.payer).unwrap();
    assert_eq!(record.payout, 19_800_000_000);
    assert_eq!(record.vesting, 8);
    assert_eq!(record.last_ledger, e.ledger().sequence());
}

#[test]
fn test_partial_then_full_redeem() {
    let e = Env::default();
    let s = bonded(&e);
    advance_ledgers(&e, 2);
    let first = s.bond.redeem(&s.payer, &false);

    // The horizon is unchanged: 8 more ledgers vest the rest.
    advance_ledgers(&e, 8);
    assert_eq!(s.bond.percent_vested_for(&s.payer), 10_000);
    let second = s.bond.redeem(&s.payer, &false);

    assert_eq!(first + second, 24_750_000_000);
    assert!(s.bond.bond_info(&s.payer).is_none());
    assert_eq!(issuance_balance(&e, &s, &s.bond.address), 0);
    assert_eq!(
        s.bond.try_redeem(&s.payer, &false),
        Err(Ok(ContractError::NothingToRedeem))
    );
}

#[test]
fn test_redeem_long_after_vesting() {
    let e = Env::default();
    let s = bonded(&e);
    advance_ledgers(&e, 1_000);
    assert_eq!(s.bond.redeem(&s.payer, &false), 24_750_000_000);
}

#[test]
fn test_redeem_without_bond() {
    let e = Env::default();
    let s = setup(&e);
    let stranger = Address::generate(&e);
    assert_eq!(s.bond.percent_vested_for(&stranger), 0);
    assert_eq!(s.bond.pending_payout_for(&stranger), 0);
    assert_eq!(
        s.bond.try_redeem(&stranger, &false),
        Err(Ok(ContractError::NothingToRedeem))
    );
}

#[test]
fn test_redeem_same_ledger() {
    let e = Env::default();
    let s = bonded(&e);
    assert_eq!(s.bond.redeem(&s.payer, &false), 0);
    assert_eq!(s.bond.bond_info(&s.payer).unwrap().payout, 24_750_000_000);
}

#[test]
fn test_closed_bond_starts_fresh_cycle() {
    let e = Env::default();
    let s = bonded(&e);
    advance_ledgers(&e, VESTING_TERM);
    s.bond.redeem(&s.payer, &false);

    s.bond.deposit(&s.payer, &(10 * DAI), &10_000, &s.payer);
    let record = s.bond.bond_info(&s.payer).unwrap();
    assert_eq!(record.vesting, VESTING_TERM);
    assert_eq!(record.last_ledger, e.ledger().sequence());
}

// --- Auto-stake ---

#[test]
fn test_redeem_into_staking() {
    let e = Env::default();
    let (s, staking) = setup_with_staking(&e);
    s.bond.deposit(&s.payer, &(100 * DAI), &MINIMUM_PRICE, &s.payer);
    advance_ledgers(&e, 2);
    let before = issuance_balance(&e, &s, &s.payer);

    let released = s.bond.redeem(&s.payer, &true);
    assert_eq!(released, 4_950_000_000);
    assert_eq!(staking.balance(&s.payer), 4_950_000_000);
    assert_eq!(issuance_balance(&e, &s, &s.payer), before);
    assert_eq!(issuance_balance(&e, &s, &staking.address), 4_950_000_000);
}

#[test]
fn test_stake_without_staking() {
    let e = Env::default();
    let s = bonded(&e);
    advance_ledgers(&e, 2);
    assert_eq!(
        s.bond.try_redeem(&s.payer, &true),
        Err(Ok(ContractError::StakingNotConfigured))
    );
    // Nothing was released.
    assert_eq!(s.bond.bond_info(&s.payer).unwrap().payout, 24_750_000_000);
}
