//! Test utilities for the question escrow contract.
//!
//! Token fixtures, ledger clock helpers and a seeded generator of random
//! settlement operations for property-style tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{token, Address, Env};

pub const MINUTE: u64 = 60;
pub const HOUR: u64 = 60 * MINUTE;
pub const DAY: u64 = 24 * HOUR;

/// Ledger timestamp tests start from, so "4 hours ago" is representable.
pub const GENESIS_TIMESTAMP: u64 = 1_700_000_000;

/// Approvals made by the helpers stay valid up to this ledger sequence.
pub const APPROVAL_LEDGER: u32 = 100_000;

/// Registers a Stellar Asset Contract administered by `admin`.
pub fn create_token_contract<'a>(
    env: &Env,
    admin: &Address,
) -> (Address, token::Client<'a>, token::StellarAssetClient<'a>) {
    let token_id = env.register_stellar_asset_contract_v2(admin.clone());
    let token = token_id.address();
    let token_client = token::Client::new(env, &token);
    let token_admin_client = token::StellarAssetClient::new(env, &token);
    (token, token_client, token_admin_client)
}

/// Mints `amount` to `holder` and raises `spender`'s allowance by as much.
pub fn mint_and_approve(
    token: &token::Client,
    token_admin: &token::StellarAssetClient,
    holder: &Address,
    spender: &Address,
    amount: i128,
) {
    token_admin.mint(holder, &amount);
    let allowance = token.allowance(holder, spender);
    token.approve(holder, spender, &(allowance + amount), &APPROVAL_LEDGER);
}

/// Default test environment: all auths mocked, clock at [`GENESIS_TIMESTAMP`].
pub fn default_env() -> Env {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(GENESIS_TIMESTAMP);
    env
}

pub fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().set_timestamp(timestamp);
}

pub fn advance_time(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| li.timestamp += seconds);
}

pub fn generate_addresses(env: &Env, count: usize) -> Vec<Address> {
    (0..count).map(|_| Address::generate(env)).collect()
}

/// One step of a randomly generated settlement sequence.
///
/// Participants are referred to by position in the caller's address lists;
/// record indexes are picked by the caller from what it has seen so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Ask {
        asker: usize,
        answerer: usize,
        bounty: i128,
        lifetime: u64,
    },
    Answer {
        pick: usize,
    },
    Cancel {
        pick: usize,
    },
    Withdraw {
        answerer: usize,
    },
    Advance {
        seconds: u64,
    },
}

/// Deterministic stream of [`Op`]s.
pub struct OpGenerator {
    rng: StdRng,
    askers: usize,
    answerers: usize,
    max_bounty: i128,
}

impl OpGenerator {
    pub fn new(seed: u64, askers: usize, answerers: usize, max_bounty: i128) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            askers,
            answerers,
            max_bounty,
        }
    }

    pub fn next_op(&mut self) -> Op {
        match self.rng.gen_range(0..10u8) {
            0..=3 => Op::Ask {
                asker: self.rng.gen_range(0..self.askers),
                answerer: self.rng.gen_range(0..self.answerers),
                bounty: self.rng.gen_range(0..=self.max_bounty),
                lifetime: self.rng.gen_range(MINUTE..=2 * HOUR),
            },
            4..=5 => Op::Answer {
                pick: self.rng.gen(),
            },
            6 => Op::Cancel {
                pick: self.rng.gen(),
            },
            7..=8 => Op::Withdraw {
                answerer: self.rng.gen_range(0..self.answerers),
            },
            _ => Op::Advance {
                seconds: self.rng.gen_range(1..=30 * MINUTE),
            },
        }
    }

    pub fn take(&mut self, count: usize) -> Vec<Op> {
        (0..count).map(|_| self.next_op()).collect()
    }
}
