//! Per-user, per-pool deposit slots and the user aggregate.
//!
//! Slots form an append-only index space: closing a slot zeroes it in place
//! and only a full exit (withdraw-all of every slot, or an emergency
//! withdraw) deletes the whole array.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

const DEPOSITS: Symbol = symbol_short!("DEPOSITS");
const USER: Symbol = symbol_short!("USER");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// One lock-scheduled stake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositInfo {
    pub amount: i128,
    pub unlock_block: u32,
    pub multiplier: u64,
}

impl DepositInfo {
    /// A slot whose principal has been fully withdrawn.
    pub fn closed() -> Self {
        DepositInfo {
            amount: 0,
            unlock_block: 0,
            multiplier: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.amount > 0
    }

    /// A slot may be released once its own lock expires, or at any time
    /// while the pool is force-unlocked.
    pub fn is_unlocked(&self, now: u32, pool_unlocked: bool) -> bool {
        pool_unlocked || now >= self.unlock_block
    }
}

/// A user's aggregate position in one pool.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    /// Σ amount × multiplier / SCALE_FACTOR over open slots.
    pub virtual_amount: i128,
    /// Reward already settled against the accumulator. Goes negative when
    /// principal leaves without a harvest.
    pub reward_debt: i128,
}

fn deposits_key(pid: u32, user: &Address) -> (Symbol, u32, Address) {
    (DEPOSITS, pid, user.clone())
}

fn user_key(pid: u32, user: &Address) -> (Symbol, u32, Address) {
    (USER, pid, user.clone())
}

pub fn load_deposits(env: &Env, pid: u32, user: &Address) -> Vec<DepositInfo> {
    env.storage()
        .persistent()
        .get(&deposits_key(pid, user))
        .unwrap_or(Vec::new(env))
}

pub fn store_deposits(env: &Env, pid: u32, user: &Address, deposits: &Vec<DepositInfo>) {
    let key = deposits_key(pid, user);
    env.storage().persistent().set(&key, deposits);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn load_user(env: &Env, pid: u32, user: &Address) -> UserInfo {
    env.storage()
        .persistent()
        .get(&user_key(pid, user))
        .unwrap_or_default()
}

pub fn store_user(env: &Env, pid: u32, user: &Address, info: &UserInfo) {
    let key = user_key(pid, user);
    env.storage().persistent().set(&key, info);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Drop every slot and the aggregate. The user's index space restarts at 0.
pub fn reset(env: &Env, pid: u32, user: &Address) {
    env.storage().persistent().remove(&deposits_key(pid, user));
    env.storage().persistent().remove(&user_key(pid, user));
}

/// Sum of live principal across every slot.
pub fn total_principal(deposits: &Vec<DepositInfo>) -> i128 {
    deposits.iter().map(|d| d.amount).sum()
}
