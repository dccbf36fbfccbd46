//! # Question Escrow Events Module
//!
//! Every state change of the contract publishes one of the events below so
//! that off-chain indexers can follow a question from ask to settlement.
//!
//! ## Event Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  init              → LedgerInitialized                       │
//! │  settings          → SettingsUpdated                         │
//! │  ask_question      → QuestionAsked                           │
//! │       ↓                                                      │
//! │  ┌──────────┐                                                │
//! │  │ Decision │                                                │
//! │  └────┬─────┘                                                │
//! │       ├─────→ answer_question → QuestionAnswered             │
//! │       │          ↓                                           │
//! │       │       answerer_withdraw → AnswererWithdrawal         │
//! │       └─────→ cancel_question → QuestionCancelled            │
//! │                                                              │
//! │  emergency_withdraw → EmergencyWithdrawal                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

// ============================================================================
// Initialization
// ============================================================================

/// Emitted once, when the contract is initialized.
///
/// # Event Topic
/// Symbol: `init`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerInitialized {
    pub owner: Address,
    pub token: Address,
    pub cancel_lockout: u64,
    pub timestamp: u64,
}

// ============================================================================
// Settings
// ============================================================================

/// Emitted when an answerer overwrites their minimum bounty and interests.
///
/// # Event Topic
/// Symbol: `settings`
/// Indexed: `answerer`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettingsUpdated {
    pub answerer: Address,
    pub price_minimum: i128,
    pub interests: String,
}

// ============================================================================
// Question lifecycle
// ============================================================================

/// Emitted when a bounty is escrowed for a new question.
///
/// # Event Topic
/// Symbol: `q_ask`
/// Indexed: `index`
///
/// # State Transition
/// ```text
/// NONE → OPEN
/// ```
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionAsked {
    pub asker: Address,
    pub answerer: Address,
    pub index: u32,
    pub bounty: i128,
    pub expiry: u64,
}

/// Emitted when an answerer answers and the bounty is credited to them.
///
/// # Event Topic
/// Symbol: `q_ans`
/// Indexed: `index`
///
/// # State Transition
/// ```text
/// OPEN → ANSWERED (final state)
/// ```
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionAnswered {
    pub asker: Address,
    pub answerer: Address,
    pub index: u32,
    pub bounty: i128,
    pub timestamp: u64,
}

/// Emitted when an asker cancels and the bounty is refunded.
///
/// # Event Topic
/// Symbol: `q_cancel`
/// Indexed: `index`
///
/// # State Transition
/// ```text
/// OPEN → CANCELLED (final state)
/// ```
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionCancelled {
    pub asker: Address,
    pub answerer: Address,
    pub index: u32,
    pub refund: i128,
    pub timestamp: u64,
}

// ============================================================================
// Payouts
// ============================================================================

/// Emitted when an answerer withdraws their accrued balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnswererWithdrawal {
    pub answerer: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Emitted when the owner sweeps the contract's entire balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawal {
    pub withdrawn_by: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ============================================================================
// Event Emission Functions
// ============================================================================

pub fn emit_ledger_initialized(env: &Env, event: LedgerInitialized) {
    let topics = (symbol_short!("init"),);
    env.events().publish(topics, event);
}

pub fn emit_settings_updated(env: &Env, event: SettingsUpdated) {
    let topics = (symbol_short!("settings"), event.answerer.clone());
    env.events().publish(topics, event);
}

pub fn emit_question_asked(env: &Env, event: QuestionAsked) {
    let topics = (symbol_short!("q_ask"), event.index);
    env.events().publish(topics, event);
}

pub fn emit_question_answered(env: &Env, event: QuestionAnswered) {
    let topics = (symbol_short!("q_ans"), event.index);
    env.events().publish(topics, event);
}

pub fn emit_question_cancelled(env: &Env, event: QuestionCancelled) {
    let topics = (symbol_short!("q_cancel"), event.index);
    env.events().publish(topics, event);
}

pub fn emit_answerer_withdrawal(env: &Env, event: AnswererWithdrawal) {
    let topics = (symbol_short!("withdraw"), event.answerer.clone());
    env.events().publish(topics, event);
}

pub fn emit_emergency_withdrawal(env: &Env, event: EmergencyWithdrawal) {
    let topics = (symbol_short!("ewith"),);
    env.events().publish(topics, event);
}
