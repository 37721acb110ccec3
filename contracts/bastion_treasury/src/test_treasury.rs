//! Tests for reserve deposits, withdrawals, redemptions, reward minting and
//! valuation.

#![cfg(test)]

use crate::test_helpers::*;
use crate::{Role, Treasury, TreasuryClient};
use bastion_errors::ContractError;
use bastion_valuator::{ReserveValuator, ReserveValuatorClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};

// ═══ 1. Initialization & registration ═══

#[test]
fn test_initialize_twice_fails() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.treasury
            .try_initialize(&s.admin, &s.issuance, &9, &s.valuator, &0),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_uninitialized_register_fails() {
    let e = Env::default();
    e.mock_all_auths();
    let treasury = TreasuryClient::new(&e, &e.register(Treasury, ()));
    let admin = Address::generate(&e);
    let asset = Address::generate(&e);
    assert_eq!(
        treasury.try_register_asset(&admin, &asset, &18, &false),
        Err(Ok(ContractError::NotInitialized))
    );
}

#[test]
fn test_register_asset_is_immutable() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.treasury.try_register_asset(&s.admin, &s.dai, &6, &true),
        Err(Ok(ContractError::AssetAlreadyRegistered))
    );
    let record = s.treasury.get_asset(&s.dai);
    assert_eq!(record.decimals, 18);
    assert!(!record.is_pooled_liquidity);
}

#[test]
fn test_register_asset_requires_admin() {
    let e = Env::default();
    let s = setup(&e);
    let intruder = Address::generate(&e);
    let asset = Address::generate(&e);
    assert_eq!(
        s.treasury.try_register_asset(&intruder, &asset, &18, &false),
        Err(Ok(ContractError::NotAdmin))
    );
}

// ═══ 2. Valuation ═══

#[test]
fn test_value_of_scales_decimals() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(s.treasury.value_of(&s.dai, &(1_000 * DAI)), 1_000 * TOKEN);

    let usdc = Address::generate(&e);
    s.treasury.register_asset(&s.admin, &usdc, &6, &false);
    assert_eq!(s.treasury.value_of(&usdc, &5_000_000), 5 * TOKEN);
}

#[test]
fn test_value_of_unregistered_asset_fails() {
    let e = Env::default();
    let s = setup(&e);
    let unknown = Address::generate(&e);
    assert_eq!(
        s.treasury.try_value_of(&unknown, &1),
        Err(Ok(ContractError::AssetNotAccepted))
    );
}

// ═══ 3. Deposit ═══

#[test]
fn test_deposit_without_profit_mints_full_value() {
    let e = Env::default();
    let s = setup_with_dai(&e, 1_000 * DAI);

    let minted = s.treasury.deposit(&s.depositor, &(1_000 * DAI), &s.dai, &0);

    assert_eq!(minted, 1_000 * TOKEN);
    assert_eq!(issuance_balance(&e, &s, &s.depositor), 1_000 * TOKEN);
    assert_eq!(s.treasury.issuance_supply(), 1_000 * TOKEN);
    assert_eq!(s.treasury.total_reserves(), 1_000 * TOKEN);
    assert_eq!(s.treasury.excess_reserves(), 0);
}

#[test]
fn test_reference_deposit_with_profit() {
    let e = Env::default();
    let s = setup_reference_deposit(&e);

    assert_eq!(issuance_balance(&e, &s, &s.depositor), 250_000 * TOKEN);
    assert_eq!(s.treasury.issuance_supply(), 250_000 * TOKEN);
    assert_eq!(s.treasury.total_reserves(), 1_000_000 * TOKEN);
    assert_eq!(s.treasury.excess_reserves(), 750_000 * TOKEN);
    assert_eq!(s.treasury.holdings(&s.dai), 1_000_000 * DAI);
    assert_eq!(
        TokenClient::new(&e, &s.dai).balance(&s.treasury.address),
        1_000_000 * DAI
    );
}

#[test]
fn test_deposit_profit_exceeding_value_fails() {
    let e = Env::default();
    let s = setup_with_dai(&e, 10 * DAI);
    assert_eq!(
        s.treasury
            .try_deposit(&s.depositor, &(10 * DAI), &s.dai, &(10 * TOKEN + 1)),
        Err(Ok(ContractError::InsufficientValue))
    );
}

#[test]
fn test_deposit_whole_value_as_profit_mints_nothing() {
    let e = Env::default();
    let s = setup_with_dai(&e, 10 * DAI);
    let minted = s
        .treasury
        .deposit(&s.depositor, &(10 * DAI), &s.dai, &(10 * TOKEN));
    assert_eq!(minted, 0);
    assert_eq!(s.treasury.excess_reserves(), 10 * TOKEN);
}

#[test]
fn test_deposit_requires_depositor_grant() {
    let e = Env::default();
    let s = setup_with_dai(&e, 10 * DAI);
    let stranger = Address::generate(&e);
    fund_dai(&e, &s, &stranger, 10 * DAI);
    assert_eq!(
        s.treasury.try_deposit(&stranger, &(10 * DAI), &s.dai, &0),
        Err(Ok(ContractError::PermissionDenied))
    );
}

#[test]
fn test_deposit_requires_accepted_asset() {
    let e = Env::default();
    let s = setup(&e);
    grant(&e, &s, Role::ReserveDepositor, &s.depositor);
    fund_dai(&e, &s, &s.depositor, 10 * DAI);
    // Registered but the ReserveToken grant was never toggled on.
    assert_eq!(
        s.treasury.try_deposit(&s.depositor, &(10 * DAI), &s.dai, &0),
        Err(Ok(ContractError::AssetNotAccepted))
    );

    let unknown = Address::generate(&e);
    assert_eq!(
        s.treasury.try_deposit(&s.depositor, &1, &unknown, &0),
        Err(Ok(ContractError::AssetNotAccepted))
    );
}

#[test]
fn test_deposit_rejects_zero_amount() {
    let e = Env::default();
    let s = setup_with_dai(&e, DAI);
    assert_eq!(
        s.treasury.try_deposit(&s.depositor, &0, &s.dai, &0),
        Err(Ok(ContractError::AmountMustBePositive))
    );
}

#[test]
fn test_reserve_depositor_cannot_deposit_liquidity() {
    let e = Env::default();
    let s = setup_with_dai(&e, DAI);
    let pool = setup_pool(&e, &s, &s.depositor, 100 * TOKEN);
    s.treasury.register_asset(&s.admin, &pool.address, &18, &true);
    grant(&e, &s, Role::LiquidityToken, &pool.address);
    assert_eq!(
        s.treasury
            .try_deposit(&s.depositor, &(100 * TOKEN), &pool.address, &0),
        Err(Ok(ContractError::PermissionDenied))
    );
}

// ═══ 4. Pooled liquidity ═══

#[test]
fn test_liquidity_deposit_uses_fair_value() {
    let e = Env::default();
    let s = setup(&e);
    let lp_holder = Address::generate(&e);
    let pool = setup_pool(&e, &s, &lp_holder, 200 * TOKEN);
    s.treasury.register_asset(&s.admin, &pool.address, &18, &true);
    grant(&e, &s, Role::LiquidityToken, &pool.address);
    grant(&e, &s, Role::LiquidityDepositor, &lp_holder);

    // Half the shares of a pool worth 400 tokens.
    assert_eq!(s.treasury.value_of(&pool.address, &(100 * TOKEN)), 200 * TOKEN);
    let minted = s
        .treasury
        .deposit(&lp_holder, &(100 * TOKEN), &pool.address, &(150 * TOKEN));

    assert_eq!(minted, 50 * TOKEN);
    assert_eq!(s.treasury.total_reserves(), 200 * TOKEN);
    assert_eq!(s.treasury.holdings(&pool.address), 100 * TOKEN);
    assert_eq!(pool.balance(&s.treasury.address), 100 * TOKEN);
}

#[test]
fn test_liquidity_valuation_uses_bound_calculator() {
    let e = Env::default();
    let s = setup(&e);
    let lp_holder = Address::generate(&e);
    let pool = setup_pool(&e, &s, &lp_holder, 200 * TOKEN);
    s.treasury.register_asset(&s.admin, &pool.address, &18, &true);

    let calculator = e.register(ReserveValuator, ());
    ReserveValuatorClient::new(&e, &calculator).initialize(&s.admin, &s.issuance, &9);
    s.treasury
        .queue(&s.admin, &Role::LiquidityToken, &pool.address);
    advance_time(&e, QUEUE_DELAY);
    s.treasury.toggle(
        &s.admin,
        &Role::LiquidityToken,
        &pool.address,
        &Some(calculator.clone()),
    );

    assert_eq!(s.treasury.get_asset(&pool.address).calculator, Some(calculator));
    assert_eq!(s.treasury.value_of(&pool.address, &(200 * TOKEN)), 400 * TOKEN);
}

#[test]
fn test_liquidity_withdraw_requires_liquidity_manager() {
    let e = Env::default();
    let s = setup(&e);
    let lp_holder = Address::generate(&e);
    let pool = setup_pool(&e, &s, &lp_holder, 200 * TOKEN);
    s.treasury.register_asset(&s.admin, &pool.address, &18, &true);
    grant(&e, &s, Role::LiquidityToken, &pool.address);
    grant(&e, &s, Role::LiquidityDepositor, &lp_holder);
    s.treasury
        .deposit(&lp_holder, &(200 * TOKEN), &pool.address, &(400 * TOKEN));

    let manager = Address::generate(&e);
    grant(&e, &s, Role::ReserveManager, &manager);
    assert_eq!(
        s.treasury.try_withdraw(&manager, &pool.address, &TOKEN),
        Err(Ok(ContractError::PermissionDenied))
    );

    grant(&e, &s, Role::LiquidityManager, &manager);
    s.treasury.withdraw(&manager, &pool.address, &(50 * TOKEN));
    assert_eq!(pool.balance(&manager), 50 * TOKEN);
    assert_eq!(s.treasury.total_reserves(), 300 * TOKEN);
}

// ═══ 5. Withdraw ═══

#[test]
fn test_withdraw_against_excess_reserves() {
    let e = Env::default();
    let s = setup_reference_deposit(&e);
    let manager = Address::generate(&e);
    grant(&e, &s, Role::ReserveManager, &manager);

    s.treasury.withdraw(&manager, &s.dai, &(100_000 * DAI));

    assert_eq!(TokenClient::new(&e, &s.dai).balance(&manager), 100_000 * DAI);
    assert_eq!(s.treasury.holdings(&s.dai), 900_000 * DAI);
    assert_eq!(s.treasury.total_reserves(), 900_000 * TOKEN);
    assert_eq!(s.treasury.excess_reserves(), 650_000 * TOKEN);
}

#[test]
fn test_withdraw_beyond_excess_fails() {
    let e = Env::default();
    let s = setup_reference_deposit(&e);
    let manager = Address::generate(&e);
    grant(&e, &s, Role::ReserveManager, &manager);

    assert_eq!(
        s.treasury
            .try_withdraw(&manager, &s.dai, &(750_000 * DAI + 1_000_000_000)),
        Err(Ok(ContractError::ExceedsExcessReserves))
    );
    s.treasury.withdraw(&manager, &s.dai, &(750_000 * DAI));
    assert_eq!(s.treasury.excess_reserves(), 0);
}

#[test]
fn test_withdraw_requires_manager() {
    let e = Env::default();
    let s = setup_reference_deposit(&e);
    assert_eq!(
        s.treasury.try_withdraw(&s.depositor, &s.dai, &DAI),
        Err(Ok(ContractError::PermissionDenied))
    );
}

// ═══ 6. Redeem reserves ═══

#[test]
fn test_redeem_reserves_burns_issuance_and_keeps_backing() {
    let e = Env::default();
    let s = setup_reference_deposit(&e);
    grant(&e, &s, Role::ReserveSpender, &s.depositor);
    TokenClient::new(&e, &s.issuance).approve(
        &s.depositor,
        &s.treasury.address,
        &(1_000 * TOKEN),
        &(e.ledger().sequence() + 10_000),
    );
    let excess_before = s.treasury.excess_reserves();

    let burned = s.treasury.redeem_reserves(&s.depositor, &s.dai, &(1_000 * DAI));

    assert_eq!(burned, 1_000 * TOKEN);
    assert_eq!(issuance_balance(&e, &s, &s.depositor), 249_000 * TOKEN);
    assert_eq!(s.treasury.issuance_supply(), 249_000 * TOKEN);
    assert_eq!(TokenClient::new(&e, &s.dai).balance(&s.depositor), 1_000 * DAI);
    assert_eq!(s.treasury.excess_reserves(), excess_before);
}

#[test]
fn test_redeem_reserves_requires_spender() {
    let e = Env::default();
    let s = setup_reference_deposit(&e);
    assert_eq!(
        s.treasury.try_redeem_reserves(&s.depositor, &s.dai, &DAI),
        Err(Ok(ContractError::PermissionDenied))
    );
}

// ═══ 7. Rewards ═══

#[test]
fn test_mint_rewards_out_of_excess() {
    let e = Env::default();
    let s = setup_reference_deposit(&e);
    let manager = Address::generate(&e);
    let recipient = Address::generate(&e);
    grant(&e, &s, Role::RewardManager, &manager);

    s.treasury.mint_rewards(&manager, &recipient, &(750 * TOKEN));

    assert_eq!(issuance_balance(&e, &s, &recipient), 750 * TOKEN);
    assert_eq!(s.treasury.issuance_supply(), 250_750 * TOKEN);
    assert_eq!(s.treasury.excess_reserves(), 749_250 * TOKEN);
}

#[test]
fn test_mint_rewards_beyond_excess_fails() {
    let e = Env::default();
    let s = setup_reference_deposit(&e);
    let manager = Address::generate(&e);
    let recipient = Address::generate(&e);
    grant(&e, &s, Role::RewardManager, &manager);
    assert_eq!(
        s.treasury
            .try_mint_rewards(&manager, &recipient, &(750_000 * TOKEN + 1)),
        Err(Ok(ContractError::ExceedsExcessReserves))
    );
}

#[test]
fn test_mint_rewards_requires_reward_manager() {
    let e = Env::default();
    let s = setup_reference_deposit(&e);
    let recipient = Address::generate(&e);
    assert_eq!(
        s.treasury.try_mint_rewards(&s.depositor, &recipient, &1),
        Err(Ok(ContractError::PermissionDenied))
    );
}

// ═══ 8. Audit ═══

#[test]
fn test_audit_reserves_revalues_liquidity() {
    let e = Env::default();
    let s = setup_with_dai(&e, 1_000 * DAI);
    s.treasury.deposit(&s.depositor, &(1_000 * DAI), &s.dai, &0);

    let lp_holder = Address::generate(&e);
    let pool = setup_pool(&e, &s, &lp_holder, 200 * TOKEN);
    s.treasury.register_asset(&s.admin, &pool.address, &18, &true);
    grant(&e, &s, Role::LiquidityToken, &pool.address);
    grant(&e, &s, Role::LiquidityDepositor, &lp_holder);
    s.treasury
        .deposit(&lp_holder, &(200 * TOKEN), &pool.address, &0);
    assert_eq!(s.treasury.total_reserves(), 1_400 * TOKEN);

    // k quadruples, so fair value doubles.
    pool.set_reserves(&200_000_000_000, &800_000_000_000_000_000_000);
    assert_eq!(s.treasury.audit_reserves(&s.admin), 1_800 * TOKEN);
    assert_eq!(s.treasury.total_reserves(), 1_800 * TOKEN);
}

#[test]
fn test_audit_reserves_requires_admin() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.treasury.try_audit_reserves(&s.depositor),
        Err(Ok(ContractError::NotAdmin))
    );
}
