//! Optional secondary-reward hook attached to a pool.

use soroban_sdk::{contractclient, Address, Env};

use crate::pool::PoolInfo;

/// Interface a pool's rewarder contract must expose. It is called after the
/// ledger has settled a user's position, with the reward just paid (zero
/// for principal-only movements) and the user's new virtual amount.
#[contractclient(name = "RewarderClient")]
pub trait Rewarder {
    fn on_reward(
        env: Env,
        pid: u32,
        user: Address,
        recipient: Address,
        reward: i128,
        virtual_amount: i128,
    );
}

pub fn notify(
    env: &Env,
    pool: &PoolInfo,
    pid: u32,
    user: &Address,
    recipient: &Address,
    reward: i128,
    virtual_amount: i128,
) {
    if let Some(rewarder) = &pool.rewarder {
        RewarderClient::new(env, rewarder).on_reward(
            &pid,
            user,
            recipient,
            &reward,
            &virtual_amount,
        );
    }
}
