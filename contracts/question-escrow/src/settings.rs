//! # Settings Store
//!
//! Per-answerer configuration: the minimum bounty an answerer accepts, a
//! free-text interests blurb, and the balance credited by answered questions.
//!
//! Reads are "lookup with default": an answerer that was never written reads
//! back as the zero-valued struct, so absence and zero are the same thing.

use soroban_sdk::{contracttype, Address, Env, String};

use crate::storage::{self, DataKey};
use crate::{Error, MAX_INTERESTS_LEN};

/// Configuration and accrued earnings of one answerer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnswererSettings {
    /// Smallest bounty this answerer accepts. Zero means no minimum.
    pub price_minimum: i128,
    /// Free-form interest tags.
    pub interests: String,
    /// Balance claimable through `answerer_withdraw`.
    pub withdrawable_amount: i128,
}

impl AnswererSettings {
    pub fn empty(env: &Env) -> Self {
        Self {
            price_minimum: 0,
            interests: String::from_str(env, ""),
            withdrawable_amount: 0,
        }
    }
}

pub(crate) fn read(env: &Env, answerer: &Address) -> AnswererSettings {
    let key = DataKey::Settings(answerer.clone());
    match env.storage().persistent().get(&key) {
        Some(settings) => {
            storage::bump_persistent(env, &key);
            settings
        }
        None => AnswererSettings::empty(env),
    }
}

fn write(env: &Env, answerer: &Address, settings: &AnswererSettings) {
    let key = DataKey::Settings(answerer.clone());
    env.storage().persistent().set(&key, settings);
    storage::bump_persistent(env, &key);
}

/// Overwrites `price_minimum` and `interests`, leaving the balance alone.
pub(crate) fn configure(
    env: &Env,
    answerer: &Address,
    price_minimum: i128,
    interests: String,
) -> Result<AnswererSettings, Error> {
    if price_minimum < 0 {
        return Err(Error::InvalidAmount);
    }
    if interests.len() > MAX_INTERESTS_LEN {
        return Err(Error::TextTooLong);
    }

    let mut settings = read(env, answerer);
    settings.price_minimum = price_minimum;
    settings.interests = interests;
    write(env, answerer, &settings);
    Ok(settings)
}

/// Adds a settled bounty to the answerer's withdrawable balance.
pub(crate) fn credit(env: &Env, answerer: &Address, amount: i128) -> i128 {
    let mut settings = read(env, answerer);
    settings.withdrawable_amount = settings
        .withdrawable_amount
        .checked_add(amount)
        .unwrap_or_else(|| panic!("withdrawable balance overflow"));
    write(env, answerer, &settings);
    storage::adjust_withdrawable(env, amount);
    settings.withdrawable_amount
}

/// Zeroes the answerer's balance and returns what it held.
///
/// The zeroed balance is written before the caller moves any tokens.
pub(crate) fn take_withdrawable(env: &Env, answerer: &Address) -> Result<i128, Error> {
    let mut settings = read(env, answerer);
    let amount = settings.withdrawable_amount;
    if amount <= 0 {
        return Err(Error::NothingToWithdraw);
    }

    settings.withdrawable_amount = 0;
    write(env, answerer, &settings);
    storage::adjust_withdrawable(env, -amount);
    Ok(amount)
}
