#![no_std]

pub mod circuit_breaker;
pub mod deposits;
pub mod events;
pub mod multipliers;
pub mod pool;
pub mod rewarder;
pub mod rewards;

use common::roles::{self, Role};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Map, Symbol, Vec,
};

use deposits::{DepositInfo, UserInfo};
use multipliers::RewardMultiplier;
use pool::{LockState, PoolInfo};

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");

// ── Contract errors ──────────────────────────────────────────────────────────

/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authorisation                  |
/// | 20 – 29 | Not found                      |
/// | 30 – 39 | Validation                     |
/// | 40 – 49 | Ledger state                   |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,

    Unauthorized = 10,

    PoolNotFound = 20,
    DepositNotFound = 21,

    InvalidAmount = 30,
    ZeroAllocWeight = 31,
    ZeroTotalAllocWeight = 32,
    InvalidLockLength = 33,
    EmptyMultiplierTable = 34,
    InvalidZeroLockMultiplier = 35,
    MultiplierBelowScale = 36,
    InvalidRewardRate = 38,

    TokensLocked = 40,
    InsufficientDeposit = 41,
    NoValueToWithdraw = 42,
    Paused = 43,
    ArithmeticOverflow = 44,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Addresses fixed at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChiefConfig {
    /// Token paid out as staking rewards. The contract's own balance of it
    /// is the reward reserve.
    pub reward_token: Address,
    /// Destination of governor reserve sweeps.
    pub treasury: Address,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TribalChief;

#[contractimpl]
impl TribalChief {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `governor`         – first holder of the Governor role.
    /// * `reward_token`     – SAC address of the token distributed as rewards.
    /// * `treasury`         – receiver of `governor_withdraw_rewards`.
    /// * `reward_per_block` – rewards emitted per ledger across all pools.
    pub fn initialize(
        env: Env,
        governor: Address,
        reward_token: Address,
        treasury: Address,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_per_block < 0 {
            return Err(ContractError::InvalidRewardRate);
        }

        let config = ChiefConfig {
            reward_token: reward_token.clone(),
            treasury: treasury.clone(),
        };
        env.storage().instance().set(&CONFIG, &config);
        pool::set_reward_per_block(&env, reward_per_block);
        roles::set_role(&env, &governor, Role::Governor);

        events::publish_initialized(&env, governor, reward_token, treasury, reward_per_block);

        Ok(())
    }

    // ── Deposits ────────────────────────────────────────────────────────────

    /// Stake `amount` of pool `pid`'s token, locked for `lock_length` ledgers.
    ///
    /// Opens a new slot at the next free index and returns that index. The
    /// slot's virtual weight is `amount × multiplier / SCALE_FACTOR` where the
    /// multiplier comes from the pool's table entry for `lock_length`.
    pub fn deposit(
        env: Env,
        depositor: Address,
        pid: u32,
        amount: i128,
        lock_length: u32,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        // 1. Flush the accumulator so the new principal earns nothing retroactively.
        let mut pool = pool::update_pool(&env, pid)?;
        let multiplier = multipliers::get_multiplier(&env, pid, lock_length)
            .ok_or(ContractError::InvalidLockLength)?;

        let virtual_delta =
            rewards::virtual_amount(amount, multiplier).ok_or(ContractError::ArithmeticOverflow)?;
        let unlock_block = env
            .ledger()
            .sequence()
            .checked_add(lock_length)
            .ok_or(ContractError::ArithmeticOverflow)?;

        // 2. Append the slot.
        let mut slots = deposits::load_deposits(&env, pid, &depositor);
        let deposit_id = slots.len();
        slots.push_back(DepositInfo {
            amount,
            unlock_block,
            multiplier,
        });

        // 3. Credit virtual weight and settle it against the current accumulator.
        let mut user = deposits::load_user(&env, pid, &depositor);
        let debt_delta = rewards::accumulated(virtual_delta, pool.acc_reward_per_share)
            .ok_or(ContractError::ArithmeticOverflow)?;
        user.virtual_amount = checked_add(user.virtual_amount, virtual_delta)?;
        user.reward_debt = checked_add(user.reward_debt, debt_delta)?;
        pool.virtual_total_supply = checked_add(pool.virtual_total_supply, virtual_delta)?;

        deposits::store_deposits(&env, pid, &depositor, &slots);
        deposits::store_user(&env, pid, &depositor, &user);
        pool::store(&env, pid, &pool);

        // 4. Pull the principal into custody.
        token::Client::new(&env, &pool.lp_token).transfer(
            &depositor,
            &env.current_contract_address(),
            &amount,
        );

        rewarder::notify(&env, &pool, pid, &depositor, &depositor, 0, user.virtual_amount);
        events::publish_deposit(&env, depositor, pid, amount, deposit_id, unlock_block);

        Ok(deposit_id)
    }

    // ── Withdrawals ─────────────────────────────────────────────────────────

    /// Withdraw `amount` of principal from slot `deposit_id` to `recipient`.
    ///
    /// Rewards are not harvested. The user's reward debt drops by the
    /// settled value of the removed virtual weight and may go negative, so
    /// a later harvest still pays everything earned before the withdrawal.
    pub fn withdraw_from_deposit(
        env: Env,
        withdrawer: Address,
        pid: u32,
        amount: i128,
        recipient: Address,
        deposit_id: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        withdrawer.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut pool = pool::update_pool(&env, pid)?;

        let mut slots = deposits::load_deposits(&env, pid, &withdrawer);
        let mut slot = slots
            .get(deposit_id)
            .ok_or(ContractError::DepositNotFound)?;
        if amount > slot.amount {
            return Err(ContractError::InsufficientDeposit);
        }
        if !slot.is_unlocked(env.ledger().sequence(), pool.is_unlocked()) {
            return Err(ContractError::TokensLocked);
        }

        let virtual_delta = rewards::virtual_amount(amount, slot.multiplier)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let debt_delta = rewards::accumulated(virtual_delta, pool.acc_reward_per_share)
            .ok_or(ContractError::ArithmeticOverflow)?;

        slot.amount = checked_sub(slot.amount, amount)?;
        if !slot.is_open() {
            slot = DepositInfo::closed();
        }
        slots.set(deposit_id, slot);

        let mut user = deposits::load_user(&env, pid, &withdrawer);
        user.virtual_amount = checked_sub(user.virtual_amount, virtual_delta)?;
        user.reward_debt = checked_sub(user.reward_debt, debt_delta)?;
        pool.virtual_total_supply = checked_sub(pool.virtual_total_supply, virtual_delta)?;

        deposits::store_deposits(&env, pid, &withdrawer, &slots);
        deposits::store_user(&env, pid, &withdrawer, &user);
        pool::store(&env, pid, &pool);

        token::Client::new(&env, &pool.lp_token).transfer(
            &env.current_contract_address(),
            &recipient,
            &amount,
        );

        rewarder::notify(&env, &pool, pid, &withdrawer, &recipient, 0, user.virtual_amount);
        events::publish_withdraw(&env, withdrawer, pid, amount, recipient, deposit_id);

        Ok(())
    }

    /// Harvest, then release every slot whose lock has expired (or all of
    /// them if the pool is force-unlocked). Locked slots stay in place.
    ///
    /// If no open slot remains the user's deposit array is deleted and the
    /// aggregate reset to exactly zero. Returns the principal released.
    pub fn withdraw_all_and_harvest(
        env: Env,
        caller: Address,
        pid: u32,
        recipient: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut pool = pool::update_pool(&env, pid)?;
        let mut user = deposits::load_user(&env, pid, &caller);

        // 1. Settle rewards at the full virtual amount.
        let accumulated = rewards::accumulated(user.virtual_amount, pool.acc_reward_per_share)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let pending = checked_sub(accumulated, user.reward_debt)?;
        user.reward_debt = accumulated;

        // 2. Release unlocked slots.
        let now = env.ledger().sequence();
        let mut slots = deposits::load_deposits(&env, pid, &caller);
        let mut released: i128 = 0;
        let mut virtual_released: i128 = 0;
        let mut all_closed = true;
        for deposit_id in 0..slots.len() {
            let Some(slot) = slots.get(deposit_id) else {
                continue;
            };
            if !slot.is_open() {
                continue;
            }
            if !slot.is_unlocked(now, pool.is_unlocked()) {
                all_closed = false;
                continue;
            }

            released = checked_add(released, slot.amount)?;
            virtual_released = checked_add(
                virtual_released,
                rewards::virtual_amount(slot.amount, slot.multiplier)
                    .ok_or(ContractError::ArithmeticOverflow)?,
            )?;
            slots.set(deposit_id, DepositInfo::closed());
            events::publish_withdraw(
                &env,
                caller.clone(),
                pid,
                slot.amount,
                recipient.clone(),
                deposit_id,
            );
        }

        if all_closed {
            // Whatever virtual weight remains is rounding dust; take it all.
            pool.virtual_total_supply =
                checked_sub(pool.virtual_total_supply, user.virtual_amount)?;
            user = UserInfo::default();
            deposits::reset(&env, pid, &caller);
        } else {
            let debt_delta = rewards::accumulated(virtual_released, pool.acc_reward_per_share)
                .ok_or(ContractError::ArithmeticOverflow)?;
            user.virtual_amount = checked_sub(user.virtual_amount, virtual_released)?;
            user.reward_debt = checked_sub(user.reward_debt, debt_delta)?;
            pool.virtual_total_supply =
                checked_sub(pool.virtual_total_supply, virtual_released)?;
            deposits::store_deposits(&env, pid, &caller, &slots);
            deposits::store_user(&env, pid, &caller, &user);
        }
        pool::store(&env, pid, &pool);

        // 3. Pay out.
        let reward = pending.max(0);
        if reward > 0 {
            Self::pay_reward(&env, &recipient, reward)?;
        }
        if released > 0 {
            token::Client::new(&env, &pool.lp_token).transfer(
                &env.current_contract_address(),
                &recipient,
                &released,
            );
        }

        rewarder::notify(&env, &pool, pid, &caller, &recipient, reward, user.virtual_amount);
        if reward > 0 {
            events::publish_harvest(&env, caller, pid, reward, recipient);
        }

        Ok(released)
    }

    /// Leave pool `pid` immediately, forfeiting all pending rewards.
    ///
    /// Every open slot must be unlocked; one locked slot blocks the whole
    /// exit. Returns the principal sent to `recipient`.
    pub fn emergency_withdraw(
        env: Env,
        caller: Address,
        pid: u32,
        recipient: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut pool = pool::update_pool(&env, pid)?;
        let now = env.ledger().sequence();

        let slots = deposits::load_deposits(&env, pid, &caller);
        let mut total: i128 = 0;
        for slot in slots.iter() {
            if !slot.is_open() {
                continue;
            }
            if !slot.is_unlocked(now, pool.is_unlocked()) {
                return Err(ContractError::TokensLocked);
            }
            total = checked_add(total, slot.amount)?;
        }

        let user = deposits::load_user(&env, pid, &caller);
        pool.virtual_total_supply = checked_sub(pool.virtual_total_supply, user.virtual_amount)?;
        pool::store(&env, pid, &pool);
        deposits::reset(&env, pid, &caller);

        if total > 0 {
            token::Client::new(&env, &pool.lp_token).transfer(
                &env.current_contract_address(),
                &recipient,
                &total,
            );
        }

        rewarder::notify(&env, &pool, pid, &caller, &recipient, 0, 0);
        events::publish_emergency_withdraw(&env, caller, pid, total, recipient);

        Ok(total)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay everything `caller` has earned in pool `pid` to `recipient`.
    ///
    /// Returns the amount paid; zero if nothing is owed.
    pub fn harvest(
        env: Env,
        caller: Address,
        pid: u32,
        recipient: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let pool = pool::update_pool(&env, pid)?;
        let mut user = deposits::load_user(&env, pid, &caller);

        let accumulated = rewards::accumulated(user.virtual_amount, pool.acc_reward_per_share)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let pending = checked_sub(accumulated, user.reward_debt)?;
        user.reward_debt = accumulated;
        deposits::store_user(&env, pid, &caller, &user);

        let reward = pending.max(0);
        if reward > 0 {
            Self::pay_reward(&env, &recipient, reward)?;
        }

        rewarder::notify(&env, &pool, pid, &caller, &recipient, reward, user.virtual_amount);
        if reward > 0 {
            events::publish_harvest(&env, caller, pid, reward, recipient);
        }

        Ok(reward)
    }

    /// Bring pool `pid`'s accumulator up to the current ledger.
    pub fn update_pool(env: Env, pid: u32) -> Result<PoolInfo, ContractError> {
        Self::require_initialized(&env)?;
        pool::update_pool(&env, pid)
    }

    /// Update every pool in `pids` so they share one last-updated ledger.
    pub fn mass_update_pools(env: Env, pids: Vec<u32>) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        for pid in pids.iter() {
            pool::update_pool(&env, pid)?;
        }
        Ok(())
    }

    // ── Governance: pools ───────────────────────────────────────────────────

    /// Open a new pool for `lp_token` with weight `alloc_weight` and the given
    /// lock-multiplier table. Returns the new pool id.
    ///
    /// Existing pools are brought current first so blocks that already
    /// elapsed are credited at the old weight split.
    pub fn add_pool(
        env: Env,
        caller: Address,
        alloc_weight: u64,
        lp_token: Address,
        rewarder: Option<Address>,
        multipliers: Vec<RewardMultiplier>,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_governor(&env, &caller)?;

        if alloc_weight == 0 {
            return Err(ContractError::ZeroAllocWeight);
        }
        multipliers::validate_table(&multipliers)?;

        pool::update_all(&env)?;

        let total = pool::total_alloc_weight(&env)
            .checked_add(alloc_weight)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let new_pool = PoolInfo {
            lp_token: lp_token.clone(),
            alloc_weight,
            last_reward_block: env.ledger().sequence(),
            acc_reward_per_share: 0,
            virtual_total_supply: 0,
            lock_state: LockState::Locked,
            rewarder: rewarder.clone(),
        };
        let pid = pool::push(&env, &new_pool);
        multipliers::init_table(&env, pid, &multipliers);
        pool::set_total_alloc_weight(&env, total);

        events::publish_pool_added(&env, pid, alloc_weight, lp_token, rewarder);

        Ok(pid)
    }

    /// Change pool `pid`'s weight and rewarder.
    ///
    /// With `with_update` every pool is brought current first so rewards
    /// accrued under the old weights are preserved.
    pub fn set_pool(
        env: Env,
        caller: Address,
        pid: u32,
        alloc_weight: u64,
        rewarder: Option<Address>,
        with_update: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_governor(&env, &caller)?;

        // Existence check before any mass update.
        pool::load(&env, pid)?;
        if with_update {
            pool::update_all(&env)?;
        }

        let mut target = pool::load(&env, pid)?;
        let total = pool::total_alloc_weight(&env)
            .checked_sub(target.alloc_weight)
            .and_then(|t| t.checked_add(alloc_weight))
            .ok_or(ContractError::ArithmeticOverflow)?;
        if total == 0 {
            return Err(ContractError::ZeroTotalAllocWeight);
        }

        target.alloc_weight = alloc_weight;
        target.rewarder = rewarder.clone();
        pool::store(&env, pid, &target);
        pool::set_total_alloc_weight(&env, total);

        events::publish_pool_set(&env, pid, alloc_weight, rewarder, with_update);

        Ok(())
    }

    /// Add, raise or lower the multiplier for `lock_length` in pool `pid`.
    ///
    /// Stepping a multiplier up past 1.0x on a locked pool force-unlocks it
    /// for every holder. Stepping down leaves the lock state alone.
    pub fn add_pool_multiplier(
        env: Env,
        caller: Address,
        pid: u32,
        lock_length: u32,
        multiplier: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_governor(&env, &caller)?;

        let mut target = pool::load(&env, pid)?;
        let previous = multipliers::set_multiplier(&env, pid, lock_length, multiplier)?;
        let stepped_up = previous.map_or(true, |p| multiplier > p);

        if stepped_up && multiplier > rewards::SCALE_FACTOR && target.unlock() {
            pool::store(&env, pid, &target);
            events::publish_pool_locked(&env, pid, false);
        }

        events::publish_pool_multiplier(&env, pid, lock_length, multiplier);

        Ok(())
    }

    /// Retire pool `pid`: zero its weight and force-unlock it. Its
    /// accumulator is kept, so rewards already earned stay harvestable.
    ///
    /// Guardian or Governor.
    pub fn reset_rewards(env: Env, caller: Address, pid: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_guardian_or_governor(&env, &caller)?;

        let mut target = pool::update_pool(&env, pid)?;
        let total = pool::total_alloc_weight(&env)
            .checked_sub(target.alloc_weight)
            .ok_or(ContractError::ArithmeticOverflow)?;

        target.alloc_weight = 0;
        target.unlock();
        pool::store(&env, pid, &target);
        pool::set_total_alloc_weight(&env, total);

        events::publish_pool_locked(&env, pid, false);

        Ok(())
    }

    /// Re-impose individual lock expiries on pool `pid`.
    pub fn lock_pool(env: Env, caller: Address, pid: u32) -> Result<(), ContractError> {
        Self::set_lock_state(&env, &caller, pid, LockState::Locked)
    }

    /// Waive individual lock expiries on pool `pid`.
    pub fn unlock_pool(env: Env, caller: Address, pid: u32) -> Result<(), ContractError> {
        Self::set_lock_state(&env, &caller, pid, LockState::Unlocked)
    }

    // ── Governance: emission & reserves ─────────────────────────────────────

    /// Set the global emission rate.
    ///
    /// Pools are not flushed: each one applies the new rate to its whole
    /// elapsed interval at its next update.
    pub fn update_block_reward(
        env: Env,
        caller: Address,
        new_rate: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_governor(&env, &caller)?;

        if new_rate < 0 {
            return Err(ContractError::InvalidRewardRate);
        }

        pool::set_reward_per_block(&env, new_rate);
        events::publish_new_reward_per_block(&env, new_rate);

        Ok(())
    }

    /// Sweep `amount` of the reward reserve to the treasury.
    pub fn governor_withdraw_rewards(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_governor(&env, &caller)?;

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if amount == 0 {
            return Err(ContractError::NoValueToWithdraw);
        }

        let config = Self::load_config(&env)?;
        token::Client::new(&env, &config.reward_token).transfer(
            &env.current_contract_address(),
            &config.treasury,
            &amount,
        );

        events::publish_reward_withdraw(&env, amount, config.treasury);

        Ok(())
    }

    // ── Governance: circuit breaker & roles ─────────────────────────────────

    /// Halt new deposits. Guardian or Governor.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        circuit_breaker::pause(&env, &caller)
    }

    /// Resume new deposits. Guardian or Governor.
    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        circuit_breaker::unpause(&env, &caller)
    }

    /// Grant `role` to `target`. Governor only.
    pub fn grant_role(
        env: Env,
        caller: Address,
        target: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !roles::grant_role(&env, &caller, &target, role.clone()) {
            return Err(ContractError::Unauthorized);
        }
        events::publish_role_granted(&env, caller, target, role);
        Ok(())
    }

    /// Revoke whatever role `target` holds. Governor only.
    pub fn revoke_role(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !roles::revoke_role(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        events::publish_role_revoked(&env, caller, target);
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_role(env: Env, holder: Address) -> Option<Role> {
        roles::get_role(&env, &holder)
    }

    /// Every address holding a Guardian or Governor role.
    pub fn list_role_holders(env: Env) -> Vec<Address> {
        roles::list_role_holders(&env)
    }

    pub fn get_config(env: Env) -> Result<ChiefConfig, ContractError> {
        Self::load_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&CONFIG)
    }

    pub fn is_paused(env: Env) -> bool {
        circuit_breaker::is_paused(&env)
    }

    pub fn num_pools(env: Env) -> u32 {
        pool::pool_count(&env)
    }

    pub fn pool_info(env: Env, pid: u32) -> Result<PoolInfo, ContractError> {
        pool::load(&env, pid)
    }

    pub fn total_alloc_weight(env: Env) -> u64 {
        pool::total_alloc_weight(&env)
    }

    pub fn reward_per_block(env: Env) -> i128 {
        pool::reward_per_block(&env)
    }

    /// Multiplier offered for `lock_length`, or 0 if the pool has no entry.
    pub fn reward_multiplier(env: Env, pid: u32, lock_length: u32) -> u64 {
        multipliers::get_multiplier(&env, pid, lock_length).unwrap_or(0)
    }

    pub fn multiplier_table(env: Env, pid: u32) -> Map<u32, u64> {
        multipliers::load_table(&env, pid)
    }

    /// Real-time rewards `user` could harvest from pool `pid`, without
    /// mutating state.
    pub fn pending_rewards(env: Env, pid: u32, user: Address) -> Result<i128, ContractError> {
        let pool = pool::simulate(&env, pid)?;
        let info = deposits::load_user(&env, pid, &user);
        let pending = rewards::pending(
            info.virtual_amount,
            pool.acc_reward_per_share,
            info.reward_debt,
        )
        .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(pending.max(0))
    }

    pub fn user_info(env: Env, pid: u32, user: Address) -> UserInfo {
        deposits::load_user(&env, pid, &user)
    }

    pub fn deposit_info(
        env: Env,
        pid: u32,
        user: Address,
        deposit_id: u32,
    ) -> Result<DepositInfo, ContractError> {
        deposits::load_deposits(&env, pid, &user)
            .get(deposit_id)
            .ok_or(ContractError::DepositNotFound)
    }

    /// Length of `user`'s slot index space in pool `pid`, closed slots
    /// included. The next deposit gets this index.
    pub fn open_user_deposits(env: Env, pid: u32, user: Address) -> u32 {
        deposits::load_deposits(&env, pid, &user).len()
    }

    /// Live principal `user` has staked in pool `pid`.
    pub fn total_staked_in_pool(env: Env, pid: u32, user: Address) -> i128 {
        deposits::total_principal(&deposits::load_deposits(&env, pid, &user))
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&CONFIG) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn load_config(env: &Env) -> Result<ChiefConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    fn require_governor(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !roles::is_governor(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_guardian_or_governor(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !roles::is_guardian_or_governor(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn set_lock_state(
        env: &Env,
        caller: &Address,
        pid: u32,
        state: LockState,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_governor(env, caller)?;

        let mut target = pool::load(env, pid)?;
        match state {
            LockState::Locked => target.lock(),
            LockState::Unlocked => target.unlock(),
        };
        pool::store(env, pid, &target);

        events::publish_pool_locked(env, pid, state == LockState::Locked);

        Ok(())
    }

    fn pay_reward(env: &Env, recipient: &Address, amount: i128) -> Result<(), ContractError> {
        let config = Self::load_config(env)?;
        token::Client::new(env, &config.reward_token).transfer(
            &env.current_contract_address(),
            recipient,
            &amount,
        );
        Ok(())
    }
}

fn checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

fn checked_sub(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::ArithmeticOverflow)
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_governance;
