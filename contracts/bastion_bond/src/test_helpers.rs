//! Shared test helpers for bond market tests.
//!
//! `setup` reproduces a small launch: the treasury holds 10,000 DAI backing
//! 2,500 issued tokens, and a DAI bond opens at a 4.00 floor price with a
//! 10-ledger vesting term and a 1% fee.

#![cfg(test)]

use crate::{BondMarket, BondMarketClient};
use bastion_interfaces::mocks::{MockPool, MockPoolClient, MockToken, MockTokenClient};
use bastion_staking::{Staking, StakingClient};
use bastion_treasury::{Role, Treasury, TreasuryClient};
use bastion_valuator::{ReserveValuator, ReserveValuatorClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

pub const TOKEN: i128 = 1_000_000_000;
pub const DAI: i128 = 1_000_000_000_000_000_000;
pub const QUEUE_DELAY: u64 = 100;
pub const EPOCH: u64 = 28_800;

pub const CONTROL_VARIABLE: i128 = 300;
pub const VESTING_TERM: u32 = 10;
pub const MINIMUM_PRICE: i128 = 400;
pub const MAX_PAYOUT: i128 = 1_000;
pub const FEE: i128 = 10_000;
pub const MAX_DEBT: i128 = 8_000_000_000_000_000;

pub struct BondSetup<'a> {
    pub bond: BondMarketClient<'a>,
    pub treasury: TreasuryClient<'a>,
    pub admin: Address,
    pub issuance: Address,
    pub dai: Address,
    pub valuator: Address,
    /// Made the treasury's seed deposit and pays for bonds.
    pub payer: Address,
    pub fee_recipient: Address,
}

pub fn advance_ledgers(e: &Env, ledgers: u32) {
    e.ledger().with_mut(|li| li.sequence_number += ledgers);
}

fn approve(e: &Env, token: &Address, owner: &Address, spender: &Address, amount: i128) {
    TokenClient::new(e, token).approve(owner, spender, &amount, &(e.ledger().sequence() + 10_000));
}

pub fn grant(e: &Env, treasury: &TreasuryClient, admin: &Address, role: Role, who: &Address) {
    treasury.queue(admin, &role, who);
    e.ledger().with_mut(|li| li.timestamp += QUEUE_DELAY);
    treasury.toggle(admin, &role, who, &None);
}

/// Treasury seeded with 10,000 DAI (7,500 tokens of profit) and a DAI bond
/// allowed to deposit, without terms.
pub fn setup_market(e: &Env) -> BondSetup<'_> {
    e.mock_all_auths();
    let admin = Address::generate(e);
    let payer = Address::generate(e);
    let fee_recipient = Address::generate(e);

    let issuance = e
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let dai = e
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let valuator = e.register(ReserveValuator, ());
    ReserveValuatorClient::new(e, &valuator).initialize(&admin, &issuance, &9);

    let treasury_id = e.register(Treasury, ());
    let treasury = TreasuryClient::new(e, &treasury_id);
    treasury.initialize(&admin, &issuance, &9, &valuator, &QUEUE_DELAY);
    StellarAssetClient::new(e, &issuance).set_admin(&treasury_id);
    treasury.register_asset(&admin, &dai, &18, &false);
    grant(e, &treasury, &admin, Role::ReserveToken, &dai);
    grant(e, &treasury, &admin, Role::ReserveDepositor, &payer);

    StellarAssetClient::new(e, &dai).mint(&payer, &(1_000_000 * DAI));
    approve(e, &dai, &payer, &treasury_id, 10_000 * DAI);
    treasury.deposit(&payer, &(10_000 * DAI), &dai, &(7_500 * TOKEN));

    let bond_id = e.register(BondMarket, ());
    let bond = BondMarketClient::new(e, &bond_id);
    bond.initialize(&admin, &issuance, &dai, &18, &treasury_id, &fee_recipient, &None);
    grant(e, &treasury, &admin, Role::ReserveDepositor, &bond_id);
    approve(e, &dai, &payer, &bond_id, 990_000 * DAI);

    BondSetup {
        bond,
        treasury,
        admin,
        issuance,
        dai,
        valuator,
        payer,
        fee_recipient,
    }
}

pub fn initialize_terms(s: &BondSetup, minimum_price: i128, max_debt: i128, initial_debt: i128) {
    s.bond.initialize_bond_terms(
        &s.admin,
        &CONTROL_VARIABLE,
        &VESTING_TERM,
        &minimum_price,
        &MAX_PAYOUT,
        &FEE,
        &max_debt,
        &initial_debt,
    );
}

/// Market with the reference terms.
pub fn setup(e: &Env) -> BondSetup<'_> {
    let s = setup_market(e);
    initialize_terms(&s, MINIMUM_PRICE, MAX_DEBT, 0);
    s
}

/// Reference market with a staking engine attached. Its first epoch ends one
/// `EPOCH` from now, so no rebase fires while ledgers advance.
pub fn setup_with_staking(e: &Env) -> (BondSetup<'_>, StakingClient<'_>) {
    let s = setup(e);
    let staking_id = e.register(Staking, ());
    let staking = StakingClient::new(e, &staking_id);
    staking.initialize(&s.admin, &s.issuance, &EPOCH, &1, &(e.ledger().timestamp() + EPOCH));
    s.bond.set_staking(&s.admin, &staking_id);
    (s, staking)
}

pub fn issuance_balance(e: &Env, s: &BondSetup, who: &Address) -> i128 {
    TokenClient::new(e, &s.issuance).balance(who)
}

pub struct LiquidityBond<'a> {
    pub bond: BondMarketClient<'a>,
    pub pool: MockPoolClient<'a>,
}

/// A second market taking shares of a mock pair worth 400 tokens (200 shares
/// minted to the payer), priced through the valuator.
pub fn setup_liquidity_bond<'a>(e: &'a Env, s: &BondSetup) -> LiquidityBond<'a> {
    let t0 = e.register(MockToken, ());
    MockTokenClient::new(e, &t0).initialize(&9);
    let t1 = e.register(MockToken, ());
    MockTokenClient::new(e, &t1).initialize(&18);

    let pool_id = e.register(MockPool, ());
    let pool = MockPoolClient::new(e, &pool_id);
    pool.initialize(&t0, &t1, &18);
    pool.set_reserves(&100_000_000_000, &400_000_000_000_000_000_000);
    pool.mint(&s.payer, &(200 * TOKEN));

    s.treasury.register_asset(&s.admin, &pool_id, &18, &true);
    grant(e, &s.treasury, &s.admin, Role::LiquidityToken, &pool_id);

    let bond_id = e.register(BondMarket, ());
    let bond = BondMarketClient::new(e, &bond_id);
    bond.initialize(
        &s.admin,
        &s.issuance,
        &pool_id,
        &18,
        &s.treasury.address,
        &s.fee_recipient,
        &Some(s.valuator.clone()),
    );
    grant(e, &s.treasury, &s.admin, Role::LiquidityDepositor, &bond_id);
    approve(e, &pool_id, &s.payer, &bond_id, 200 * TOKEN);
    bond.initialize_bond_terms(
        &s.admin,
        &CONTROL_VARIABLE,
        &VESTING_TERM,
        &MINIMUM_PRICE,
        &MAX_PAYOUT,
        &FEE,
        &MAX_DEBT,
        &0,
    );

    LiquidityBond { bond, pool }
}
