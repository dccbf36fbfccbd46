//! Storage keys, TTL management and the contract-wide running totals.

use soroban_sdk::{contracttype, Address, Env};

use crate::{Config, Error};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;

pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Storage keys used for contract data persistence.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Owner, token and cancellation lockout (instance storage).
    Config,
    /// Sum of bounties held for open questions (instance storage).
    OpenEscrow,
    /// Sum of all answerers' withdrawable balances (instance storage).
    Withdrawable,
    /// Per-answerer settings (persistent storage).
    Settings(Address),
    /// Number of records in the (asker, answerer) log.
    QuestionCount(Address, Address),
    /// A single record of the (asker, answerer) log, by index.
    Question(Address, Address, u32),
}

pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub(crate) fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub(crate) fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub(crate) fn write_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage().instance().set(&DataKey::OpenEscrow, &0i128);
    env.storage().instance().set(&DataKey::Withdrawable, &0i128);
    bump_instance(env);
}

pub(crate) fn read_config(env: &Env) -> Result<Config, Error> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(config)
}

fn read_total(env: &Env, key: &DataKey) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

fn adjust_total(env: &Env, key: &DataKey, delta: i128) {
    let total = read_total(env, key)
        .checked_add(delta)
        .unwrap_or_else(|| panic!("escrow total overflow"));
    if total < 0 {
        panic!("escrow total underflow");
    }
    env.storage().instance().set(key, &total);
}

pub(crate) fn open_escrow(env: &Env) -> i128 {
    read_total(env, &DataKey::OpenEscrow)
}

pub(crate) fn total_withdrawable(env: &Env) -> i128 {
    read_total(env, &DataKey::Withdrawable)
}

pub(crate) fn adjust_open_escrow(env: &Env, delta: i128) {
    adjust_total(env, &DataKey::OpenEscrow, delta);
}

pub(crate) fn adjust_withdrawable(env: &Env, delta: i128) {
    adjust_total(env, &DataKey::Withdrawable, delta);
}
