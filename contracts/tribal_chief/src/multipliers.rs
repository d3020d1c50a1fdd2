//! Per-pool lock-length → reward-multiplier tables.
//!
//! A table is installed at pool creation. Governance may later add lock
//! lengths or move existing ones, always subject to the same floor: lock
//! length 0 stays at exactly 1.0x and no other entry drops below 1.0x.

use soroban_sdk::{contracttype, symbol_short, Env, Map, Symbol, Vec};

use crate::{rewards::SCALE_FACTOR, ContractError};

const MULTIPLIERS: Symbol = symbol_short!("MULT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// One row of a multiplier table as supplied by governance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardMultiplier {
    /// Blocks a deposit stays locked.
    pub lock_length: u32,
    /// Boost applied to the deposit, scaled by `SCALE_FACTOR`.
    pub multiplier: u64,
}

fn table_key(pid: u32) -> (Symbol, u32) {
    (MULTIPLIERS, pid)
}

/// Check a single row. A zero lock length must map to exactly 1.0x; every
/// other lock length must be at least 1.0x.
pub fn validate_entry(lock_length: u32, multiplier: u64) -> Result<(), ContractError> {
    if lock_length == 0 {
        if multiplier != SCALE_FACTOR {
            return Err(ContractError::InvalidZeroLockMultiplier);
        }
    } else if multiplier < SCALE_FACTOR {
        return Err(ContractError::MultiplierBelowScale);
    }
    Ok(())
}

/// Check a whole table supplied at pool creation. Every table must offer
/// an unlocked (zero lock length) option.
pub fn validate_table(entries: &Vec<RewardMultiplier>) -> Result<(), ContractError> {
    if entries.is_empty() {
        return Err(ContractError::EmptyMultiplierTable);
    }
    let mut has_zero_lock = false;
    for entry in entries.iter() {
        validate_entry(entry.lock_length, entry.multiplier)?;
        has_zero_lock |= entry.lock_length == 0;
    }
    if !has_zero_lock {
        return Err(ContractError::InvalidZeroLockMultiplier);
    }
    Ok(())
}

pub fn load_table(env: &Env, pid: u32) -> Map<u32, u64> {
    env.storage()
        .persistent()
        .get(&table_key(pid))
        .unwrap_or(Map::new(env))
}

fn store_table(env: &Env, pid: u32, table: &Map<u32, u64>) {
    let key = table_key(pid);
    env.storage().persistent().set(&key, table);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Install the initial table for a freshly created pool. Later rows win on
/// duplicate lock lengths.
pub fn init_table(env: &Env, pid: u32, entries: &Vec<RewardMultiplier>) {
    let mut table = Map::new(env);
    for entry in entries.iter() {
        table.set(entry.lock_length, entry.multiplier);
    }
    store_table(env, pid, &table);
}

/// Multiplier for `lock_length`, or `None` if the pool does not offer it.
pub fn get_multiplier(env: &Env, pid: u32, lock_length: u32) -> Option<u64> {
    load_table(env, pid).get(lock_length)
}

/// Add a lock length or overwrite an existing one. Returns the previous
/// value, if any.
pub fn set_multiplier(
    env: &Env,
    pid: u32,
    lock_length: u32,
    multiplier: u64,
) -> Result<Option<u64>, ContractError> {
    validate_entry(lock_length, multiplier)?;

    let mut table = load_table(env, pid);
    let previous = table.get(lock_length);
    table.set(lock_length, multiplier);
    store_table(env, pid, &table);
    Ok(previous)
}
