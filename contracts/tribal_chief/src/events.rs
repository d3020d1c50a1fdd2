#![allow(deprecated)] // events().publish migration tracked separately

use common::roles::Role;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub governor: Address,
    pub reward_token: Address,
    pub treasury: Address,
    pub reward_per_block: i128,
    pub block: u32,
}

/// Fired when governance opens a new pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pid: u32,
    pub alloc_weight: u64,
    pub lp_token: Address,
    pub rewarder: Option<Address>,
    pub block: u32,
}

/// Fired when a pool's weight or rewarder is reconfigured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSetEvent {
    pub pid: u32,
    pub alloc_weight: u64,
    pub rewarder: Option<Address>,
    pub with_update: bool,
    pub block: u32,
}

/// Fired when a lock length is added to or changed in a pool's table.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolMultiplierEvent {
    pub pid: u32,
    pub lock_length: u32,
    pub multiplier: u64,
    pub block: u32,
}

/// Fired whenever a pool's lock override is set, including the implicit
/// unlocks done by `reset_rewards` and multiplier raises.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolLockedEvent {
    pub pid: u32,
    pub locked: bool,
    pub block: u32,
}

/// Fired when a pool's accumulator advances.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pid: u32,
    pub last_reward_block: u32,
    pub virtual_total_supply: i128,
    pub acc_reward_per_share: i128,
}

/// Fired when a user opens a deposit slot.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub user: Address,
    pub pid: u32,
    pub amount: i128,
    pub deposit_id: u32,
    pub unlock_block: u32,
    pub block: u32,
}

/// Fired when principal leaves a deposit slot.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub user: Address,
    pub pid: u32,
    pub amount: i128,
    pub recipient: Address,
    pub deposit_id: u32,
    pub block: u32,
}

/// Fired when a user exits a pool forfeiting rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub user: Address,
    pub pid: u32,
    pub amount: i128,
    pub recipient: Address,
    pub block: u32,
}

/// Fired when rewards are paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestEvent {
    pub user: Address,
    pub pid: u32,
    pub amount: i128,
    pub recipient: Address,
    pub block: u32,
}

/// Fired when the global emission rate changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewRewardPerBlockEvent {
    pub amount: i128,
    pub block: u32,
}

/// Fired when governance sweeps reward reserves to the treasury.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardWithdrawEvent {
    pub amount: i128,
    pub treasury: Address,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    pub account: Address,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleGrantedEvent {
    pub governor: Address,
    pub target: Address,
    pub role: Role,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRevokedEvent {
    pub governor: Address,
    pub target: Address,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    governor: Address,
    reward_token: Address,
    treasury: Address,
    reward_per_block: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            governor,
            reward_token,
            treasury,
            reward_per_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pid: u32,
    alloc_weight: u64,
    lp_token: Address,
    rewarder: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pid),
        PoolAddedEvent {
            pid,
            alloc_weight,
            lp_token,
            rewarder,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_set(
    env: &Env,
    pid: u32,
    alloc_weight: u64,
    rewarder: Option<Address>,
    with_update: bool,
) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pid),
        PoolSetEvent {
            pid,
            alloc_weight,
            rewarder,
            with_update,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_multiplier(env: &Env, pid: u32, lock_length: u32, multiplier: u64) {
    env.events().publish(
        (symbol_short!("POOL_MULT"), pid),
        PoolMultiplierEvent {
            pid,
            lock_length,
            multiplier,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_locked(env: &Env, pid: u32, locked: bool) {
    env.events().publish(
        (symbol_short!("POOL_LOCK"), pid),
        PoolLockedEvent {
            pid,
            locked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_updated(
    env: &Env,
    pid: u32,
    last_reward_block: u32,
    virtual_total_supply: i128,
    acc_reward_per_share: i128,
) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pid),
        PoolUpdatedEvent {
            pid,
            last_reward_block,
            virtual_total_supply,
            acc_reward_per_share,
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    user: Address,
    pid: u32,
    amount: i128,
    deposit_id: u32,
    unlock_block: u32,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone(), pid),
        DepositEvent {
            user,
            pid,
            amount,
            deposit_id,
            unlock_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdraw(
    env: &Env,
    user: Address,
    pid: u32,
    amount: i128,
    recipient: Address,
    deposit_id: u32,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone(), pid),
        WithdrawEvent {
            user,
            pid,
            amount,
            recipient,
            deposit_id,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_emergency_withdraw(
    env: &Env,
    user: Address,
    pid: u32,
    amount: i128,
    recipient: Address,
) {
    env.events().publish(
        (symbol_short!("EMERG_WD"), user.clone(), pid),
        EmergencyWithdrawEvent {
            user,
            pid,
            amount,
            recipient,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_harvest(env: &Env, user: Address, pid: u32, amount: i128, recipient: Address) {
    env.events().publish(
        (symbol_short!("HARVEST"), user.clone(), pid),
        HarvestEvent {
            user,
            pid,
            amount,
            recipient,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_new_reward_per_block(env: &Env, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_BLK"),),
        NewRewardPerBlockEvent {
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_withdraw(env: &Env, amount: i128, treasury: Address) {
    env.events().publish(
        (symbol_short!("RWD_WD"),),
        RewardWithdrawEvent {
            amount,
            treasury,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_paused(env: &Env, account: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"), account.clone()),
        PauseEvent {
            account,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_unpaused(env: &Env, account: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"), account.clone()),
        PauseEvent {
            account,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_role_granted(env: &Env, governor: Address, target: Address, role: Role) {
    env.events().publish(
        (symbol_short!("ROLE_GRNT"), target.clone()),
        RoleGrantedEvent {
            governor,
            target,
            role,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, governor: Address, target: Address) {
    env.events().publish(
        (symbol_short!("ROLE_RVK"), target.clone()),
        RoleRevokedEvent {
            governor,
            target,
            block: env.ledger().sequence(),
        },
    );
}
