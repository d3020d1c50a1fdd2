//! Pool table and the per-pool reward accumulator.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{events, rewards, ContractError};

// ── Storage key constants ────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const NUM_POOLS: Symbol = symbol_short!("NUM_POOL");
const TOTAL_ALLOC: Symbol = symbol_short!("TOT_ALOC");
const REWARD_PER_BLOCK: Symbol = symbol_short!("RWD_BLK");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Types ────────────────────────────────────────────────────────────────────

/// Pool-wide withdrawal override.
///
/// `Locked` honours every deposit's own unlock block. `Unlocked` waives them
/// all. The only way back from `Unlocked` is an explicit governor `lock_pool`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LockState {
    Locked,
    Unlocked,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub lp_token: Address,
    pub alloc_weight: u64,
    pub last_reward_block: u32,
    /// Reward per unit of virtual supply, scaled by `ACC_REWARD_PRECISION`.
    pub acc_reward_per_share: i128,
    pub virtual_total_supply: i128,
    pub lock_state: LockState,
    pub rewarder: Option<Address>,
}

impl PoolInfo {
    pub fn is_unlocked(&self) -> bool {
        self.lock_state == LockState::Unlocked
    }

    /// Returns true if the state actually changed.
    pub fn unlock(&mut self) -> bool {
        let changed = self.lock_state == LockState::Locked;
        self.lock_state = LockState::Unlocked;
        changed
    }

    /// Returns true if the state actually changed.
    pub fn lock(&mut self) -> bool {
        let changed = self.lock_state == LockState::Unlocked;
        self.lock_state = LockState::Locked;
        changed
    }

    /// Bring the accumulator up to block `now`.
    ///
    /// With no virtual supply the accumulator is left alone but
    /// `last_reward_block` still moves, so empty blocks are never credited
    /// to a later depositor. Returns false if `now` is not past the last
    /// update.
    pub fn advance(
        &mut self,
        now: u32,
        reward_per_block: i128,
        total_alloc_weight: u64,
    ) -> Result<bool, ContractError> {
        if now <= self.last_reward_block {
            return Ok(false);
        }

        if self.virtual_total_supply > 0 {
            let elapsed = now - self.last_reward_block;
            let reward = rewards::pool_reward(
                elapsed,
                reward_per_block,
                self.alloc_weight,
                total_alloc_weight,
            )
            .ok_or(ContractError::ArithmeticOverflow)?;
            self.acc_reward_per_share =
                rewards::accrue(self.acc_reward_per_share, reward, self.virtual_total_supply)
                    .ok_or(ContractError::ArithmeticOverflow)?;
        }

        self.last_reward_block = now;
        Ok(true)
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn pool_key(pid: u32) -> (Symbol, u32) {
    (POOL, pid)
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&NUM_POOLS).unwrap_or(0)
}

pub fn load(env: &Env, pid: u32) -> Result<PoolInfo, ContractError> {
    env.storage()
        .persistent()
        .get(&pool_key(pid))
        .ok_or(ContractError::PoolNotFound)
}

pub fn store(env: &Env, pid: u32, pool: &PoolInfo) {
    let key = pool_key(pid);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Append a new pool and return its id.
pub fn push(env: &Env, pool: &PoolInfo) -> u32 {
    let pid = pool_count(env);
    store(env, pid, pool);
    env.storage().instance().set(&NUM_POOLS, &(pid + 1));
    pid
}

pub fn total_alloc_weight(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0)
}

pub fn set_total_alloc_weight(env: &Env, total: u64) {
    env.storage().instance().set(&TOTAL_ALLOC, &total);
}

pub fn reward_per_block(env: &Env) -> i128 {
    env.storage().instance().get(&REWARD_PER_BLOCK).unwrap_or(0)
}

pub fn set_reward_per_block(env: &Env, rate: i128) {
    env.storage().instance().set(&REWARD_PER_BLOCK, &rate);
}

// ── Accumulator ──────────────────────────────────────────────────────────────

/// A copy of pool `pid` advanced to the current block, without writing it.
pub fn simulate(env: &Env, pid: u32) -> Result<PoolInfo, ContractError> {
    let mut pool = load(env, pid)?;
    pool.advance(
        env.ledger().sequence(),
        reward_per_block(env),
        total_alloc_weight(env),
    )?;
    Ok(pool)
}

/// Advance pool `pid` to the current block and persist it.
pub fn update_pool(env: &Env, pid: u32) -> Result<PoolInfo, ContractError> {
    let mut pool = load(env, pid)?;
    let advanced = pool.advance(
        env.ledger().sequence(),
        reward_per_block(env),
        total_alloc_weight(env),
    )?;
    if advanced {
        store(env, pid, &pool);
        events::publish_pool_updated(
            env,
            pid,
            pool.last_reward_block,
            pool.virtual_total_supply,
            pool.acc_reward_per_share,
        );
    }
    Ok(pool)
}

/// Advance every pool so they share the same last-updated block.
pub fn update_all(env: &Env) -> Result<(), ContractError> {
    for pid in 0..pool_count(env) {
        update_pool(env, pid)?;
    }
    Ok(())
}
