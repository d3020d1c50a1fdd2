//! Fixed-point reward arithmetic.
//!
//! Everything here is pure integer math with no Soroban environment
//! dependency. Overflow is reported as `None` and mapped to
//! `ContractError::ArithmeticOverflow` by the contract layer.

/// Multiplier identity. A multiplier of `SCALE_FACTOR` is a 1.0x boost,
/// `10 * SCALE_FACTOR` is 10x.
pub const SCALE_FACTOR: u64 = 10_000;

/// Scaling applied to `acc_reward_per_share` so that sub-unit rewards per
/// unit of virtual supply survive integer division.
pub const ACC_REWARD_PRECISION: i128 = 1_000_000_000_000;

/// Principal scaled by a lock multiplier:
///
/// ```text
/// virtual = amount × multiplier / SCALE_FACTOR
/// ```
pub fn virtual_amount(amount: i128, multiplier: u64) -> Option<i128> {
    amount
        .checked_mul(multiplier as i128)?
        .checked_div(SCALE_FACTOR as i128)
}

/// Emission owed to one pool for `elapsed` blocks:
///
/// ```text
/// pool_reward = elapsed × reward_per_block × alloc_weight / total_alloc_weight
/// ```
///
/// Truncates per pool. A zero total weight emits nothing.
pub fn pool_reward(
    elapsed: u32,
    reward_per_block: i128,
    alloc_weight: u64,
    total_alloc_weight: u64,
) -> Option<i128> {
    if total_alloc_weight == 0 {
        return Some(0);
    }
    (elapsed as i128)
        .checked_mul(reward_per_block)?
        .checked_mul(alloc_weight as i128)?
        .checked_div(total_alloc_weight as i128)
}

/// Advance an accumulator by `reward` spread over `virtual_total_supply`.
///
/// Returns `acc` unchanged when nothing is staked.
pub fn accrue(acc: i128, reward: i128, virtual_total_supply: i128) -> Option<i128> {
    if virtual_total_supply <= 0 {
        return Some(acc);
    }
    let delta = reward
        .checked_mul(ACC_REWARD_PRECISION)?
        .checked_div(virtual_total_supply)?;
    acc.checked_add(delta)
}

/// Reward entitlement of `virtual_amount` at accumulator `acc`:
///
/// ```text
/// accumulated = virtual_amount × acc / ACC_REWARD_PRECISION
/// ```
///
/// Used both for settling a reward-debt baseline and for pending rewards.
pub fn accumulated(virtual_amount: i128, acc: i128) -> Option<i128> {
    virtual_amount
        .checked_mul(acc)?
        .checked_div(ACC_REWARD_PRECISION)
}

/// `accumulated − reward_debt`. The debt may be negative after principal
/// was removed without a harvest, which correctly enlarges the result.
pub fn pending(virtual_amount: i128, acc: i128, reward_debt: i128) -> Option<i128> {
    accumulated(virtual_amount, acc)?.checked_sub(reward_debt)
}
