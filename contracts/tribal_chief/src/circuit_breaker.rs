use common::roles;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{events, ContractError};

const PAUSED: Symbol = symbol_short!("PAUSED");

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Rejects the call while the contract is paused.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Engages the circuit breaker. Requires Guardian or Governor.
pub fn pause(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if !roles::is_guardian_or_governor(env, caller) {
        return Err(ContractError::Unauthorized);
    }
    env.storage().instance().set(&PAUSED, &true);
    events::publish_paused(env, caller.clone());
    Ok(())
}

/// Releases the circuit breaker. Requires Guardian or Governor.
pub fn unpause(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if !roles::is_guardian_or_governor(env, caller) {
        return Err(ContractError::Unauthorized);
    }
    env.storage().instance().set(&PAUSED, &false);
    events::publish_unpaused(env, caller.clone());
    Ok(())
}
