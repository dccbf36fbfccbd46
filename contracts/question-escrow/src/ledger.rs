//! # Question Ledger
//!
//! Append-only log of question/answer records, one log per (asker, answerer)
//! pair. A record's index is its position at creation and never changes:
//! records are never removed, and answering or cancelling only flips flags
//! on the stored record.
//!
//! ```text
//!            answer (now < expiry)
//!   Open ───────────────────────────► Answered
//!     │
//!     │ cancel (now < expiry - lockout)
//!     └─────────────────────────────► Cancelled
//! ```

use soroban_sdk::{contracttype, Address, Env, String};

use crate::storage::{self, DataKey};
use crate::Error;

/// Lifecycle state of a record. `Answered` and `Cancelled` are terminal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuestionStatus {
    Open,
    Answered,
    Cancelled,
}

/// A question, its eventual answer, and the bounty escrowed for it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionAnswer {
    pub question: String,
    /// Empty until answered.
    pub answer: String,
    pub answered: bool,
    pub cancelled: bool,
    /// Amount pulled into escrow when the question was asked.
    pub bounty: i128,
    /// Unix timestamp after which the question can no longer be answered.
    pub expiry: u64,
}

impl QuestionAnswer {
    pub fn status(&self) -> QuestionStatus {
        if self.answered {
            QuestionStatus::Answered
        } else if self.cancelled {
            QuestionStatus::Cancelled
        } else {
            QuestionStatus::Open
        }
    }

    fn ensure_open(&self) -> Result<(), Error> {
        match self.status() {
            QuestionStatus::Open => Ok(()),
            _ => Err(Error::QuestionNotOpen),
        }
    }

    /// Open → Answered. Only allowed strictly before `expiry`.
    pub(crate) fn resolve(&mut self, answer: String, now: u64) -> Result<(), Error> {
        self.ensure_open()?;
        if now >= self.expiry {
            return Err(Error::QuestionExpired);
        }
        self.answer = answer;
        self.answered = true;
        Ok(())
    }

    /// Open → Cancelled. Only allowed strictly before `expiry - lockout`.
    pub(crate) fn cancel(&mut self, now: u64, lockout: u64) -> Result<(), Error> {
        self.ensure_open()?;
        if now >= self.expiry.saturating_sub(lockout) {
            return Err(Error::CancellationWindowClosed);
        }
        self.cancelled = true;
        Ok(())
    }
}

pub(crate) fn check_expiry(env: &Env, expiry: u64) -> Result<(), Error> {
    if expiry <= env.ledger().timestamp() {
        return Err(Error::InvalidExpiry);
    }
    Ok(())
}

pub(crate) fn len(env: &Env, asker: &Address, answerer: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::QuestionCount(asker.clone(), answerer.clone()))
        .unwrap_or(0)
}

pub(crate) fn append(
    env: &Env,
    asker: &Address,
    answerer: &Address,
    question: String,
    bounty: i128,
    expiry: u64,
) -> Result<u32, Error> {
    check_expiry(env, expiry)?;

    let index = len(env, asker, answerer);
    let record = QuestionAnswer {
        question,
        answer: String::from_str(env, ""),
        answered: false,
        cancelled: false,
        bounty,
        expiry,
    };

    let record_key = DataKey::Question(asker.clone(), answerer.clone(), index);
    env.storage().persistent().set(&record_key, &record);
    storage::bump_persistent(env, &record_key);

    let count_key = DataKey::QuestionCount(asker.clone(), answerer.clone());
    env.storage().persistent().set(&count_key, &(index + 1));
    storage::bump_persistent(env, &count_key);

    Ok(index)
}

pub(crate) fn get(
    env: &Env,
    asker: &Address,
    answerer: &Address,
    index: u32,
) -> Result<QuestionAnswer, Error> {
    let key = DataKey::Question(asker.clone(), answerer.clone(), index);
    let record = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    storage::bump_persistent(env, &key);
    Ok(record)
}

/// Writes back a record that already exists at `index`.
pub(crate) fn store(
    env: &Env,
    asker: &Address,
    answerer: &Address,
    index: u32,
    record: &QuestionAnswer,
) {
    let key = DataKey::Question(asker.clone(), answerer.clone(), index);
    env.storage().persistent().set(&key, record);
    storage::bump_persistent(env, &key);
}
