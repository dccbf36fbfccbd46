#![cfg(test)]

//! Randomized settlement sequences checked against a simple model.
//!
//! After every step the contract's real token balance must equal the open
//! escrow plus every answerer's withdrawable balance, and every failure must
//! be the one the model predicts.

use question_escrow::{
    Error, QuestionEscrowContract, QuestionEscrowContractClient, QuestionStatus,
    DEFAULT_CANCEL_LOCKOUT,
};
use question_escrow_test_utils::{
    advance_time, create_token_contract, default_env, generate_addresses, mint_and_approve, now,
    Op, OpGenerator,
};
use soroban_sdk::{testutils::Address as _, token, Address, String};

const ASKERS: usize = 2;
const ANSWERERS: usize = 3;
const MAX_BOUNTY: i128 = 1_000;
const STEPS: usize = 120;

struct ModelRecord {
    asker: usize,
    answerer: usize,
    index: u32,
    bounty: i128,
    expiry: u64,
    status: QuestionStatus,
}

fn run_sequence(seed: u64) {
    let env = default_env();
    let owner = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let askers = generate_addresses(&env, ASKERS);
    let answerers = generate_addresses(&env, ANSWERERS);

    let (token_address, token, token_admin_client): (
        Address,
        token::Client,
        token::StellarAssetClient,
    ) = create_token_contract(&env, &token_admin);
    let contract_id = env.register(QuestionEscrowContract, ());
    let client = QuestionEscrowContractClient::new(&env, &contract_id);
    client.init(&owner, &token_address, &None);

    let mut records: Vec<ModelRecord> = Vec::new();
    let mut withdrawable = [0i128; ANSWERERS];
    let question = String::from_str(&env, "question");
    let answer = String::from_str(&env, "answer");

    for op in OpGenerator::new(seed, ASKERS, ANSWERERS, MAX_BOUNTY).take(STEPS) {
        match op {
            Op::Ask {
                asker,
                answerer,
                bounty,
                lifetime,
            } => {
                if bounty > 0 {
                    mint_and_approve(
                        &token,
                        &token_admin_client,
                        &askers[asker],
                        &contract_id,
                        bounty,
                    );
                }
                let expiry = now(&env) + lifetime;
                let index = client.ask_question(
                    &askers[asker],
                    &answerers[answerer],
                    &question,
                    &bounty,
                    &expiry,
                );
                let expected_index = records
                    .iter()
                    .filter(|r| r.asker == asker && r.answerer == answerer)
                    .count() as u32;
                assert_eq!(index, expected_index, "seed {}", seed);
                records.push(ModelRecord {
                    asker,
                    answerer,
                    index,
                    bounty,
                    expiry,
                    status: QuestionStatus::Open,
                });
            }
            Op::Answer { pick } => {
                if records.is_empty() {
                    continue;
                }
                let slot = pick % records.len();
                let record = &mut records[slot];
                let result = client.try_answer_question(
                    &answerers[record.answerer],
                    &askers[record.asker],
                    &record.index,
                    &answer,
                );

                if record.status != QuestionStatus::Open {
                    assert_eq!(result, Err(Ok(Error::QuestionNotOpen)), "seed {}", seed);
                } else if now(&env) >= record.expiry {
                    assert_eq!(result, Err(Ok(Error::QuestionExpired)), "seed {}", seed);
                } else {
                    assert_eq!(result, Ok(Ok(())), "seed {}", seed);
                    record.status = QuestionStatus::Answered;
                    withdrawable[record.answerer] += record.bounty;
                }
            }
            Op::Cancel { pick } => {
                if records.is_empty() {
                    continue;
                }
                let slot = pick % records.len();
                let record = &mut records[slot];
                let asker = &askers[record.asker];
                let balance_before = token.balance(asker);
                let result = client.try_cancel_question(
                    asker,
                    &answerers[record.answerer],
                    &record.index,
                );

                if record.status != QuestionStatus::Open {
                    assert_eq!(result, Err(Ok(Error::QuestionNotOpen)), "seed {}", seed);
                } else if now(&env) >= record.expiry.saturating_sub(DEFAULT_CANCEL_LOCKOUT) {
                    assert_eq!(
                        result,
                        Err(Ok(Error::CancellationWindowClosed)),
                        "seed {}",
                        seed
                    );
                } else {
                    assert_eq!(result, Ok(Ok(())), "seed {}", seed);
                    record.status = QuestionStatus::Cancelled;
                    assert_eq!(token.balance(asker), balance_before + record.bounty);
                }
            }
            Op::Withdraw { answerer } => {
                let who = &answerers[answerer];
                let balance_before = token.balance(who);
                let result = client.try_answerer_withdraw(who);

                if withdrawable[answerer] == 0 {
                    assert_eq!(result, Err(Ok(Error::NothingToWithdraw)), "seed {}", seed);
                } else {
                    assert_eq!(result, Ok(Ok(withdrawable[answerer])), "seed {}", seed);
                    assert_eq!(token.balance(who), balance_before + withdrawable[answerer]);
                    withdrawable[answerer] = 0;
                }
            }
            Op::Advance { seconds } => advance_time(&env, seconds),
        }

        // Escrow conservation.
        let open: i128 = records
            .iter()
            .filter(|r| r.status == QuestionStatus::Open)
            .map(|r| r.bounty)
            .sum();
        let credited: i128 = withdrawable.iter().sum();
        let accounting = client.get_accounting();
        assert_eq!(accounting.open_escrow, open, "seed {}", seed);
        assert_eq!(accounting.withdrawable, credited, "seed {}", seed);
        assert_eq!(
            accounting.custody_balance,
            open + credited,
            "seed {}",
            seed
        );
        for (i, who) in answerers.iter().enumerate() {
            assert_eq!(
                client.get_settings(who).withdrawable_amount,
                withdrawable[i],
                "seed {}",
                seed
            );
        }
    }

    // Terminal states never move.
    for record in &records {
        assert_eq!(
            client.get_question_status(
                &askers[record.asker],
                &answerers[record.answerer],
                &record.index
            ),
            record.status,
            "seed {}",
            seed
        );
    }
}

#[test]
fn test_escrow_conservation_over_random_sequences() {
    for seed in [1u64, 2, 3, 17, 42, 1_000] {
        run_sequence(seed);
    }
}
