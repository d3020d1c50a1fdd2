//! Guardian / Governor role registry.
//!
//! The whole registry is one `Map<Address, Role>` in instance storage. Role
//! holders are few and every privileged call reads them, so they live and
//! expire with the contract instance instead of in per-address entries.

use soroban_sdk::{contracttype, Address, Env, Map, Vec};

#[contracttype]
#[derive(Clone)]
enum RoleKey {
    Registry,
}

/// Privilege levels. A Governor can do anything a Guardian can.
///
/// Guardians hold the circuit breaker (pause, unpause) and may retire a
/// pool's rewards. Governors additionally configure pools and emission,
/// sweep the reserve and manage roles.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Guardian = 1,
    Governor = 2,
}

impl Role {
    /// Whether holding `self` satisfies a check for `required`.
    pub fn covers(&self, required: &Role) -> bool {
        matches!(
            (self, required),
            (Role::Governor, _) | (Role::Guardian, Role::Guardian)
        )
    }
}

fn registry(env: &Env) -> Map<Address, Role> {
    env.storage()
        .instance()
        .get(&RoleKey::Registry)
        .unwrap_or(Map::new(env))
}

fn save(env: &Env, roles: &Map<Address, Role>) {
    env.storage().instance().set(&RoleKey::Registry, roles);
}

/// Assign `role` to `holder`, replacing any role it held. No authorization
/// is checked here.
pub fn set_role(env: &Env, holder: &Address, role: Role) {
    let mut roles = registry(env);
    roles.set(holder.clone(), role);
    save(env, &roles);
}

pub fn get_role(env: &Env, holder: &Address) -> Option<Role> {
    registry(env).get(holder.clone())
}

/// Drop whatever role `holder` has. Returns whether it had one.
pub fn remove_role(env: &Env, holder: &Address) -> bool {
    let mut roles = registry(env);
    if roles.remove(holder.clone()).is_none() {
        return false;
    }
    save(env, &roles);
    true
}

pub fn has_role(env: &Env, caller: &Address, required: &Role) -> bool {
    get_role(env, caller).is_some_and(|role| role.covers(required))
}

pub fn is_governor(env: &Env, caller: &Address) -> bool {
    has_role(env, caller, &Role::Governor)
}

pub fn is_guardian_or_governor(env: &Env, caller: &Address) -> bool {
    has_role(env, caller, &Role::Guardian)
}

/// Governor-gated `set_role`. `false` means `caller` is not a Governor and
/// nothing changed; the caller must already have been authenticated.
pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: Role) -> bool {
    if !is_governor(env, caller) {
        return false;
    }
    set_role(env, target, role);
    true
}

/// Governor-gated `remove_role`. Revoking an address with no role is a
/// successful no-op.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) -> bool {
    if !is_governor(env, caller) {
        return false;
    }
    remove_role(env, target);
    true
}

/// Every address currently holding a role.
pub fn list_role_holders(env: &Env) -> Vec<Address> {
    registry(env).keys()
}
