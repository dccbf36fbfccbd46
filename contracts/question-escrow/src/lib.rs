//! # Question Escrow Contract
//!
//! This contract escrows token bounties for a question/answer exchange. An asker
//! locks a bounty to a chosen answerer together with a question and an expiry.
//! The answerer can answer before the expiry to claim the bounty, or the asker
//! can cancel and take the bounty back as long as the expiry is not too close.
//!
//! ## Overview
//!
//! The contract is made of three cooperating parts:
//!
//! - **Settings Store** ([`settings`]): per-answerer minimum bounty, interests and
//!   withdrawable balance.
//! - **Question Ledger** ([`ledger`]): append-only, per-(asker, answerer) log of
//!   question/answer records addressed by a stable index.
//! - **Settlement Engine** (this module): the entry points that escrow, settle,
//!   refund and pay out bounties.
//!
//! Tokens only move at three points: when a question is asked (pulled from the
//! asker), when a question is cancelled (refunded to the asker) and when an
//! answerer withdraws. Answering moves value internally, from open escrow to
//! the answerer's withdrawable balance.
//!
//! ## Security Model
//!
//! - **Authorization**: every entry point authenticates the acting address
//!   with `require_auth`; the emergency sweep is restricted to the owner fixed
//!   at initialization.
//! - **Time Gates**: answers only strictly before expiry; cancellation only
//!   strictly before `expiry - cancel_lockout`.
//! - **Atomicity**: a failing entry point returns an [`Error`] and the host
//!   rolls back every write of the invocation.
//! - **Reentrancy**: internal state is committed before tokens leave the
//!   contract; the host also forbids contract re-entry.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! // 1. Initialize once with the owner, the bounty token and the default lockout
//! contract.init(env, owner, token, None);
//!
//! // 2. Answerer publishes a minimum price
//! contract.set_answerer_settings(env, answerer, 100, interests);
//!
//! // 3. Asker approves the contract on the token, then asks
//! let index = contract.ask_question(env, asker, answerer, question, 100, expiry)?;
//!
//! // 4. Answerer answers before expiry and withdraws
//! contract.answer_question(env, answerer, asker, index, answer)?;
//! contract.answerer_withdraw(env, answerer)?;
//! ```

#![no_std]
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, log, Address, Env, String};

pub mod events;
mod gateway;
pub mod ledger;
pub mod settings;
mod storage;


use events::{
    AnswererWithdrawal, EmergencyWithdrawal, LedgerInitialized, QuestionAnswered, QuestionAsked,
    QuestionCancelled, SettingsUpdated,
};
use gateway::TokenGateway;
pub use ledger::{QuestionAnswer, QuestionStatus};
pub use settings::AnswererSettings;

/// Cancellation lockout used when `init` is called without one: five minutes.
pub const DEFAULT_CANCEL_LOCKOUT: u64 = 300;

/// Longest question or answer accepted, in bytes.
pub const MAX_TEXT_LEN: u32 = 1024;

/// Longest interests text accepted, in bytes.
pub const MAX_INTERESTS_LEN: u32 = 256;

/// Contract errors that can occur during escrow operations.
///
/// Each error variant represents a specific failure condition with a unique error code
/// so callers and tests can assert on the exact cause.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract has already been initialized and cannot be initialized again.
    AlreadyInitialized = 1,
    /// Contract has not been initialized yet. Call `init` first.
    NotInitialized = 2,
    /// The expiry is not strictly in the future.
    InvalidExpiry = 3,
    /// The question's expiry has been reached; it can no longer be answered.
    QuestionExpired = 4,
    /// The question is inside its cancellation lockout window (or past expiry).
    CancellationWindowClosed = 5,
    /// No record exists for this (asker, answerer, index).
    NotFound = 6,
    /// The caller is not allowed to perform this operation.
    Unauthorized = 7,
    /// The token contract rejected a transfer.
    TransferFailed = 8,
    /// The asker has not approved enough tokens for the contract to pull.
    InsufficientAllowance = 9,
    /// There is no balance to pay out.
    NothingToWithdraw = 10,
    /// The bounty is below the answerer's configured minimum.
    BelowMinimumBounty = 11,
    /// The question has already been answered or cancelled.
    QuestionNotOpen = 12,
    /// Amounts must not be negative.
    InvalidAmount = 13,
    /// A question, answer or interests text exceeds its length limit.
    TextTooLong = 14,
}

/// Deployment configuration, fixed by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Only address allowed to call `emergency_withdraw`.
    pub owner: Address,
    /// Token contract all bounties are paid in.
    pub token: Address,
    /// Seconds before expiry during which an asker can no longer cancel.
    pub cancel_lockout: u64,
}

/// Snapshot of the contract's accounting against its real token balance.
///
/// Until an emergency sweep, `custody_balance == open_escrow + withdrawable`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Accounting {
    /// Sum of bounties of all open questions.
    pub open_escrow: i128,
    /// Sum of all answerers' withdrawable balances.
    pub withdrawable: i128,
    /// Tokens actually held by the contract.
    pub custody_balance: i128,
}

/// The main question escrow contract.
///
/// This contract must be initialized before use with the `init` function.
#[contract]
pub struct QuestionEscrowContract;

#[contractimpl]
impl QuestionEscrowContract {
    /// Initialize the contract with its owner, bounty token and cancellation lockout.
    ///
    /// # Arguments
    ///
    /// * `env` - The contract execution environment
    /// * `owner` - Address allowed to perform the emergency sweep; never changes
    /// * `token` - Address of the token contract bounties are paid in
    /// * `cancel_lockout` - Seconds before expiry in which cancelling is refused;
    ///   `None` selects [`DEFAULT_CANCEL_LOCKOUT`]
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If initialization succeeds
    /// * `Err(Error::AlreadyInitialized)` - If the contract has already been initialized
    pub fn init(
        env: Env,
        owner: Address,
        token: Address,
        cancel_lockout: Option<u64>,
    ) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }

        let config = Config {
            owner: owner.clone(),
            token: token.clone(),
            cancel_lockout: cancel_lockout.unwrap_or(DEFAULT_CANCEL_LOCKOUT),
        };
        storage::write_config(&env, &config);

        events::emit_ledger_initialized(
            &env,
            LedgerInitialized {
                owner,
                token,
                cancel_lockout: config.cancel_lockout,
                timestamp: env.ledger().timestamp(),
            },
        );

        Ok(())
    }

    /// Returns the configuration fixed at initialization.
    pub fn get_config(env: Env) -> Result<Config, Error> {
        storage::read_config(&env)
    }

    // ========================================================================
    // Settings Store
    // ========================================================================

    /// Overwrite the caller's minimum bounty and interests.
    ///
    /// The withdrawable balance is left untouched. Zero and the empty string are
    /// valid values, and re-applying the same values changes nothing.
    ///
    /// # Arguments
    ///
    /// * `env` - The contract execution environment
    /// * `answerer` - Address whose settings are written (must authorize)
    /// * `price_minimum` - Smallest bounty accepted from now on
    /// * `interests` - Free-form interest tags
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the settings were stored
    /// * `Err(Error::NotInitialized)` - If the contract hasn't been initialized
    /// * `Err(Error::InvalidAmount)` - If `price_minimum` is negative
    /// * `Err(Error::TextTooLong)` - If `interests` exceeds [`MAX_INTERESTS_LEN`]
    pub fn set_answerer_settings(
        env: Env,
        answerer: Address,
        price_minimum: i128,
        interests: String,
    ) -> Result<(), Error> {
        answerer.require_auth();
        storage::read_config(&env)?;

        let updated = settings::configure(&env, &answerer, price_minimum, interests)?;

        events::emit_settings_updated(
            &env,
            SettingsUpdated {
                answerer,
                price_minimum: updated.price_minimum,
                interests: updated.interests,
            },
        );

        Ok(())
    }

    /// Read an answerer's settings. Unknown answerers read as all-zero settings.
    pub fn get_settings(env: Env, answerer: Address) -> AnswererSettings {
        settings::read(&env, &answerer)
    }

    // ========================================================================
    // Settlement Engine
    // ========================================================================

    /// Escrow a bounty and ask a question to `answerer`.
    ///
    /// Pulls `bounty` tokens from the asker into the contract, then appends an
    /// open record to the (asker, answerer) log.
    ///
    /// # Arguments
    ///
    /// * `env` - The contract execution environment
    /// * `asker` - Address paying the bounty (must authorize and must have approved
    ///   the contract for at least `bounty` on the token)
    /// * `answerer` - Address the question is addressed to
    /// * `question` - Question text
    /// * `bounty` - Amount to escrow
    /// * `expiry` - Unix timestamp until which the question can be answered
    ///
    /// # Returns
    ///
    /// * `Ok(u32)` - The new record's index in the (asker, answerer) log
    /// * `Err(Error::InvalidExpiry)` - If `expiry` is not strictly in the future
    /// * `Err(Error::InvalidAmount)` - If `bounty` is negative
    /// * `Err(Error::BelowMinimumBounty)` - If `bounty` is below the answerer's minimum
    /// * `Err(Error::TextTooLong)` - If `question` exceeds [`MAX_TEXT_LEN`]
    /// * `Err(Error::InsufficientAllowance)` - If the approved allowance is too small
    /// * `Err(Error::TransferFailed)` - If the token contract rejects the pull
    pub fn ask_question(
        env: Env,
        asker: Address,
        answerer: Address,
        question: String,
        bounty: i128,
        expiry: u64,
    ) -> Result<u32, Error> {
        asker.require_auth();
        let config = storage::read_config(&env)?;

        ledger::check_expiry(&env, expiry)?;
        if bounty < 0 {
            return Err(Error::InvalidAmount);
        }
        if question.len() > MAX_TEXT_LEN {
            return Err(Error::TextTooLong);
        }
        if bounty < settings::read(&env, &answerer).price_minimum {
            return Err(Error::BelowMinimumBounty);
        }

        TokenGateway::new(&env, &config.token).pull(&asker, bounty)?;

        let index = ledger::append(&env, &asker, &answerer, question, bounty, expiry)?;
        storage::adjust_open_escrow(&env, bounty);

        log!(&env, "question asked", asker, answerer, index, bounty);
        events::emit_question_asked(
            &env,
            QuestionAsked {
                asker,
                answerer,
                index,
                bounty,
                expiry,
            },
        );

        Ok(index)
    }

    /// Answer an open question and credit its bounty to the answerer.
    ///
    /// No tokens move here: the bounty leaves open escrow and is added to the
    /// answerer's withdrawable balance.
    ///
    /// # Arguments
    ///
    /// * `env` - The contract execution environment
    /// * `answerer` - Address answering (must authorize)
    /// * `asker` - Address that asked; together with `answerer` selects the log
    /// * `index` - Position of the record in the log
    /// * `answer` - Answer text
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the question is now answered
    /// * `Err(Error::NotFound)` - If no record exists at `index`
    /// * `Err(Error::QuestionNotOpen)` - If it was already answered or cancelled
    /// * `Err(Error::QuestionExpired)` - If the ledger time has reached the expiry
    /// * `Err(Error::TextTooLong)` - If `answer` exceeds [`MAX_TEXT_LEN`]
    pub fn answer_question(
        env: Env,
        answerer: Address,
        asker: Address,
        index: u32,
        answer: String,
    ) -> Result<(), Error> {
        answerer.require_auth();
        storage::read_config(&env)?;

        if answer.len() > MAX_TEXT_LEN {
            return Err(Error::TextTooLong);
        }

        let mut record = ledger::get(&env, &asker, &answerer, index)?;
        let now = env.ledger().timestamp();
        record.resolve(answer, now)?;
        ledger::store(&env, &asker, &answerer, index, &record);

        storage::adjust_open_escrow(&env, -record.bounty);
        let balance = settings::credit(&env, &answerer, record.bounty);

        log!(&env, "question answered", asker, answerer, index, balance);
        events::emit_question_answered(
            &env,
            QuestionAnswered {
                asker,
                answerer,
                index,
                bounty: record.bounty,
                timestamp: now,
            },
        );

        Ok(())
    }

    /// Cancel an open question and refund its bounty to the asker.
    ///
    /// # Arguments
    ///
    /// * `env` - The contract execution environment
    /// * `asker` - Address that asked (must authorize); receives the refund
    /// * `answerer` - Address the question was addressed to
    /// * `index` - Position of the record in the log
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the question is cancelled and the bounty refunded
    /// * `Err(Error::NotFound)` - If no record exists at `index`
    /// * `Err(Error::QuestionNotOpen)` - If it was already answered or cancelled
    /// * `Err(Error::CancellationWindowClosed)` - If `now >= expiry - cancel_lockout`
    /// * `Err(Error::TransferFailed)` - If the refund is rejected; nothing is committed
    ///
    /// # Security
    ///
    /// The record is marked cancelled and stored before the refund leaves the contract.
    pub fn cancel_question(
        env: Env,
        asker: Address,
        answerer: Address,
        index: u32,
    ) -> Result<(), Error> {
        asker.require_auth();
        let config = storage::read_config(&env)?;

        let mut record = ledger::get(&env, &asker, &answerer, index)?;
        let now = env.ledger().timestamp();
        record.cancel(now, config.cancel_lockout)?;
        ledger::store(&env, &asker, &answerer, index, &record);
        storage::adjust_open_escrow(&env, -record.bounty);

        TokenGateway::new(&env, &config.token).push(&asker, record.bounty)?;

        log!(&env, "question cancelled", asker, answerer, index, record.bounty);
        events::emit_question_cancelled(
            &env,
            QuestionCancelled {
                asker,
                answerer,
                index,
                refund: record.bounty,
                timestamp: now,
            },
        );

        Ok(())
    }

    /// Pay out the answerer's whole withdrawable balance.
    ///
    /// # Returns
    ///
    /// * `Ok(i128)` - The amount transferred to the answerer
    /// * `Err(Error::NothingToWithdraw)` - If the balance is zero
    /// * `Err(Error::TransferFailed)` - If the token contract rejects the payout
    ///
    /// # Security
    ///
    /// The balance is zeroed before the transfer so it can never be paid twice.
    pub fn answerer_withdraw(env: Env, answerer: Address) -> Result<i128, Error> {
        answerer.require_auth();
        let config = storage::read_config(&env)?;

        let amount = settings::take_withdrawable(&env, &answerer)?;
        TokenGateway::new(&env, &config.token).push(&answerer, amount)?;

        log!(&env, "answerer withdrew", answerer, amount);
        events::emit_answerer_withdrawal(
            &env,
            AnswererWithdrawal {
                answerer,
                amount,
                timestamp: env.ledger().timestamp(),
            },
        );

        Ok(amount)
    }

    /// Sweep the contract's entire token balance to the owner.
    ///
    /// This is an escape hatch: it ignores open escrow and withdrawable balances,
    /// which no longer match the real balance afterwards.
    ///
    /// # Returns
    ///
    /// * `Ok(i128)` - The amount swept; zero when the contract holds no tokens
    /// * `Err(Error::Unauthorized)` - If `caller` is not the owner
    /// * `Err(Error::TransferFailed)` - If the token contract rejects the sweep
    pub fn emergency_withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let config = storage::read_config(&env)?;

        if caller != config.owner {
            return Err(Error::Unauthorized);
        }

        let gateway = TokenGateway::new(&env, &config.token);
        let amount = gateway.custody_balance();
        gateway.push(&config.owner, amount)?;

        log!(&env, "emergency withdrawal", amount);
        events::emit_emergency_withdrawal(
            &env,
            EmergencyWithdrawal {
                withdrawn_by: caller,
                amount,
                timestamp: env.ledger().timestamp(),
            },
        );

        Ok(amount)
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Retrieve the record at `index` of the (asker, answerer) log.
    pub fn get_record(
        env: Env,
        asker: Address,
        answerer: Address,
        index: u32,
    ) -> Result<QuestionAnswer, Error> {
        ledger::get(&env, &asker, &answerer, index)
    }

    /// Number of records ever appended to the (asker, answerer) log.
    pub fn get_question_count(env: Env, asker: Address, answerer: Address) -> u32 {
        ledger::len(&env, &asker, &answerer)
    }

    /// Lifecycle state of the record at `index` of the (asker, answerer) log.
    pub fn get_question_status(
        env: Env,
        asker: Address,
        answerer: Address,
        index: u32,
    ) -> Result<QuestionStatus, Error> {
        Ok(ledger::get(&env, &asker, &answerer, index)?.status())
    }

    /// Get the contract's current token balance.
    pub fn get_balance(env: Env) -> Result<i128, Error> {
        let config = storage::read_config(&env)?;
        Ok(TokenGateway::new(&env, &config.token).custody_balance())
    }

    /// Compare the engine's running totals with the real token balance.
    pub fn get_accounting(env: Env) -> Result<Accounting, Error> {
        let config = storage::read_config(&env)?;
        Ok(Accounting {
            open_escrow: storage::open_escrow(&env),
            withdrawable: storage::total_withdrawable(&env),
            custody_balance: TokenGateway::new(&env, &config.token).custody_balance(),
        })
    }
}
