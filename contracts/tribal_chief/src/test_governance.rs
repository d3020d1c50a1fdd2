extern crate std;

use common::roles::Role;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env, Vec,
};

use crate::{
    multipliers::RewardMultiplier, pool::LockState, ContractError, TribalChief, TribalChiefClient,
};

const STAKE: i128 = 1_000_000;
const RESERVE: i128 = 1_000_000_000;

// ── Test helpers ─────────────────────────────────────────────────────────────

struct Fixture {
    env: Env,
    client: TribalChiefClient<'static>,
    governor: Address,
    treasury: Address,
    lp_token: Address,
    reward_token: Address,
}

fn identity_table(env: &Env) -> Vec<RewardMultiplier> {
    vec![
        env,
        RewardMultiplier {
            lock_length: 0,
            multiplier: 10_000,
        },
    ]
}

/// Deployed and funded contract with a single weight-100 pool.
fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(0);

    let lp_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(TribalChief, ());
    let client = TribalChiefClient::new(&env, &contract_id);

    let governor = Address::generate(&env);
    let treasury = Address::generate(&env);
    client.initialize(&governor, &reward_token, &treasury, &1_000);
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &RESERVE);

    client.add_pool(&governor, &100, &lp_token, &None, &identity_table(&env));

    Fixture {
        env,
        client,
        governor,
        treasury,
        lp_token,
        reward_token,
    }
}

fn funded_user(f: &Fixture, amount: i128) -> Address {
    let user = Address::generate(&f.env);
    StellarAssetClient::new(&f.env, &f.lp_token).mint(&user, &amount);
    user
}

fn expect_err<T: core::fmt::Debug, E: core::fmt::Debug>(
    result: Result<Result<T, E>, Result<ContractError, soroban_sdk::InvokeError>>,
    expected: ContractError,
) {
    match result {
        Err(Ok(e)) => assert_eq!(e, expected),
        other => unreachable!("Expected {:?}, got {:?}", expected, other),
    }
}

// ── add_pool ──────────────────────────────────────────────────────────────────

#[test]
fn test_add_pool_by_governor() {
    let f = setup();
    let pid = f
        .client
        .add_pool(&f.governor, &50, &f.lp_token, &None, &identity_table(&f.env));

    assert_eq!(pid, 1);
    assert_eq!(f.client.num_pools(), 2);
    assert_eq!(f.client.total_alloc_weight(), 150);

    let pool = f.client.pool_info(&1);
    assert_eq!(pool.alloc_weight, 50);
    assert_eq!(pool.lock_state, LockState::Locked);
    assert_eq!(pool.acc_reward_per_share, 0);
}

#[test]
fn test_add_pool_by_non_governor_fails() {
    let f = setup();
    let intruder = Address::generate(&f.env);

    expect_err(
        f.client
            .try_add_pool(&intruder, &100, &f.lp_token, &None, &identity_table(&f.env)),
        ContractError::Unauthorized,
    );
    assert_eq!(f.client.num_pools(), 1);
}

#[test]
fn test_add_pool_with_zero_weight_fails() {
    let f = setup();
    expect_err(
        f.client
            .try_add_pool(&f.governor, &0, &f.lp_token, &None, &identity_table(&f.env)),
        ContractError::ZeroAllocWeight,
    );
}

#[test]
fn test_add_pool_without_multipliers_fails() {
    let f = setup();
    expect_err(
        f.client
            .try_add_pool(&f.governor, &100, &f.lp_token, &None, &Vec::new(&f.env)),
        ContractError::EmptyMultiplierTable,
    );
}

#[test]
fn test_add_pool_with_bad_zero_lock_multiplier_fails() {
    let f = setup();
    let table = vec![
        &f.env,
        RewardMultiplier {
            lock_length: 0,
            multiplier: 0,
        },
    ];
    expect_err(
        f.client
            .try_add_pool(&f.governor, &100, &f.lp_token, &None, &table),
        ContractError::InvalidZeroLockMultiplier,
    );
}

#[test]
fn test_add_pool_with_multiplier_below_scale_fails() {
    let f = setup();
    let table = vec![
        &f.env,
        RewardMultiplier {
            lock_length: 10,
            multiplier: 0,
        },
    ];
    expect_err(
        f.client
            .try_add_pool(&f.governor, &100, &f.lp_token, &None, &table),
        ContractError::MultiplierBelowScale,
    );
}

#[test]
fn test_add_pool_without_zero_lock_entry_fails() {
    let f = setup();
    let table = vec![
        &f.env,
        RewardMultiplier {
            lock_length: 100,
            multiplier: 20_000,
        },
    ];
    expect_err(
        f.client
            .try_add_pool(&f.governor, &100, &f.lp_token, &None, &table),
        ContractError::InvalidZeroLockMultiplier,
    );
}

// ── set_pool ──────────────────────────────────────────────────────────────────

#[test]
fn test_set_pool_updates_weight() {
    let f = setup();
    f.client.set_pool(&f.governor, &0, &10, &None, &true);

    assert_eq!(f.client.pool_info(&0).alloc_weight, 10);
    assert_eq!(f.client.total_alloc_weight(), 10);
}

#[test]
fn test_set_pool_total_weight_zero_fails() {
    let f = setup();
    expect_err(
        f.client.try_set_pool(&f.governor, &0, &0, &None, &true),
        ContractError::ZeroTotalAllocWeight,
    );
    assert_eq!(f.client.total_alloc_weight(), 100);
}

#[test]
fn test_set_pool_by_non_governor_fails() {
    let f = setup();
    let intruder = Address::generate(&f.env);
    expect_err(
        f.client.try_set_pool(&intruder, &0, &100, &None, &true),
        ContractError::Unauthorized,
    );
}

#[test]
fn test_set_pool_with_update_preserves_accrued_rewards() {
    let f = setup();
    f.client
        .add_pool(&f.governor, &100, &f.lp_token, &None, &identity_table(&f.env));
    let user = funded_user(&f, STAKE);
    f.client.deposit(&user, &0, &STAKE, &0);

    // Ten blocks at half the emission.
    f.env.ledger().set_sequence_number(10);
    f.client.set_pool(&f.governor, &1, &300, &None, &true);
    assert_eq!(f.client.pending_rewards(&0, &user), 5_000);

    // Ten blocks at a quarter.
    f.env.ledger().set_sequence_number(20);
    assert_eq!(f.client.pending_rewards(&0, &user), 7_500);
}

// ── reset_rewards ─────────────────────────────────────────────────────────────

#[test]
fn test_reset_rewards_by_governor() {
    let f = setup();
    f.client.reset_rewards(&f.governor, &0);

    let pool = f.client.pool_info(&0);
    assert_eq!(pool.alloc_weight, 0);
    assert_eq!(pool.lock_state, LockState::Unlocked);
    assert_eq!(f.client.total_alloc_weight(), 0);
}

#[test]
fn test_reset_rewards_by_guardian() {
    let f = setup();
    let guardian = Address::generate(&f.env);
    f.client.grant_role(&f.governor, &guardian, &Role::Guardian);

    f.client.reset_rewards(&guardian, &0);
    assert_eq!(f.client.pool_info(&0).alloc_weight, 0);
}

#[test]
fn test_reset_rewards_by_user_fails() {
    let f = setup();
    let intruder = Address::generate(&f.env);
    expect_err(
        f.client.try_reset_rewards(&intruder, &0),
        ContractError::Unauthorized,
    );
}

#[test]
fn test_reset_rewards_keeps_earned_rewards_harvestable() {
    let f = setup();
    let user = funded_user(&f, STAKE);
    f.client.deposit(&user, &0, &STAKE, &0);

    f.env.ledger().set_sequence_number(10);
    f.client.reset_rewards(&f.governor, &0);
    let acc = f.client.pool_info(&0).acc_reward_per_share;

    f.env.ledger().set_sequence_number(50);
    let pool = f.client.update_pool(&0);
    assert_eq!(pool.acc_reward_per_share, acc);
    assert_eq!(pool.last_reward_block, 50);

    assert_eq!(f.client.pending_rewards(&0, &user), 10_000);
    assert_eq!(f.client.withdraw_all_and_harvest(&user, &0, &user), STAKE);
    assert_eq!(
        TokenClient::new(&f.env, &f.reward_token).balance(&user),
        10_000
    );
}

// ── lock_pool / unlock_pool ───────────────────────────────────────────────────

#[test]
fn test_lock_and_unlock_pool_by_governor() {
    let f = setup();

    f.client.unlock_pool(&f.governor, &0);
    assert_eq!(f.client.pool_info(&0).lock_state, LockState::Unlocked);

    f.client.lock_pool(&f.governor, &0);
    assert_eq!(f.client.pool_info(&0).lock_state, LockState::Locked);
}

#[test]
fn test_lock_and_unlock_pool_by_non_governor_fail() {
    let f = setup();
    let guardian = Address::generate(&f.env);
    f.client.grant_role(&f.governor, &guardian, &Role::Guardian);

    expect_err(
        f.client.try_unlock_pool(&guardian, &0),
        ContractError::Unauthorized,
    );
    expect_err(
        f.client.try_lock_pool(&guardian, &0),
        ContractError::Unauthorized,
    );
}

#[test]
fn test_unlock_unknown_pool_fails() {
    let f = setup();
    expect_err(
        f.client.try_unlock_pool(&f.governor, &9),
        ContractError::PoolNotFound,
    );
}

#[test]
fn test_add_pool_multiplier_by_non_governor_fails() {
    let f = setup();
    let intruder = Address::generate(&f.env);
    expect_err(
        f.client.try_add_pool_multiplier(&intruder, &0, &0, &0),
        ContractError::Unauthorized,
    );
}

// ── Emission & reserves ───────────────────────────────────────────────────────

#[test]
fn test_update_block_reward_by_governor() {
    let f = setup();
    for rate in [1_000_000_000i128, 2_000_000_000, 3_000_000_000] {
        f.client.update_block_reward(&f.governor, &rate);
        assert_eq!(f.client.reward_per_block(), rate);
    }
}

#[test]
fn test_update_block_reward_rejects_bad_input() {
    let f = setup();
    let intruder = Address::generate(&f.env);
    expect_err(
        f.client.try_update_block_reward(&intruder, &100_000_000),
        ContractError::Unauthorized,
    );
    expect_err(
        f.client.try_update_block_reward(&f.governor, &-1),
        ContractError::InvalidRewardRate,
    );
    assert_eq!(f.client.reward_per_block(), 1_000);
}

#[test]
fn test_zero_rate_stops_emission() {
    let f = setup();
    let user = funded_user(&f, STAKE);
    f.client.deposit(&user, &0, &STAKE, &0);

    f.env.ledger().set_sequence_number(10);
    f.client.update_pool(&0);
    f.client.update_block_reward(&f.governor, &0);

    f.env.ledger().set_sequence_number(1_000);
    assert_eq!(f.client.pending_rewards(&0, &user), 10_000);
}

#[test]
fn test_governor_withdraw_rewards_to_treasury() {
    let f = setup();
    let token = TokenClient::new(&f.env, &f.reward_token);
    assert_eq!(token.balance(&f.treasury), 0);

    f.client.governor_withdraw_rewards(&f.governor, &RESERVE);

    assert_eq!(token.balance(&f.treasury), RESERVE);
    assert_eq!(token.balance(&f.client.address), 0);
}

#[test]
fn test_governor_withdraw_rewards_rejects_bad_input() {
    let f = setup();
    let intruder = Address::generate(&f.env);
    expect_err(
        f.client.try_governor_withdraw_rewards(&intruder, &100_000_000),
        ContractError::Unauthorized,
    );
    expect_err(
        f.client.try_governor_withdraw_rewards(&f.governor, &0),
        ContractError::NoValueToWithdraw,
    );
    expect_err(
        f.client.try_governor_withdraw_rewards(&f.governor, &-5),
        ContractError::InvalidAmount,
    );
}

// ── Circuit breaker ───────────────────────────────────────────────────────────

#[test]
fn test_pause_blocks_deposits_only() {
    let f = setup();
    let user = funded_user(&f, 2 * STAKE);
    f.client.deposit(&user, &0, &STAKE, &0);

    assert!(!f.client.is_paused());
    f.client.pause(&f.governor);
    assert!(f.client.is_paused());

    expect_err(
        f.client.try_deposit(&user, &0, &STAKE, &0),
        ContractError::Paused,
    );

    // Exits stay open while paused.
    f.env.ledger().set_sequence_number(10);
    assert_eq!(f.client.harvest(&user, &0, &user), 10_000);
    f.client.withdraw_from_deposit(&user, &0, &STAKE, &user, &0);

    f.client.unpause(&f.governor);
    assert_eq!(f.client.deposit(&user, &0, &STAKE, &0), 1);
}

#[test]
fn test_guardian_can_pause_but_user_cannot() {
    let f = setup();
    let guardian = Address::generate(&f.env);
    let user = Address::generate(&f.env);
    f.client.grant_role(&f.governor, &guardian, &Role::Guardian);

    expect_err(f.client.try_pause(&user), ContractError::Unauthorized);

    f.client.pause(&guardian);
    assert!(f.client.is_paused());
    expect_err(f.client.try_unpause(&user), ContractError::Unauthorized);
    f.client.unpause(&guardian);
    assert!(!f.client.is_paused());
}
