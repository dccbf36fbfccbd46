#![no_main]

use libfuzzer_sys::fuzz_target;
use question_escrow::{QuestionEscrowContract, QuestionEscrowContractClient};
use question_escrow_test_utils::{
    advance_time, create_token_contract, default_env, generate_addresses, mint_and_approve, now,
    Op, OpGenerator,
};
use soroban_sdk::{testutils::Address as _, Address, String};

const ASKERS: usize = 2;
const ANSWERERS: usize = 2;
const MAX_STEPS: usize = 64;

// Whatever sequence of calls succeeds, custody always equals open escrow plus
// credited balances.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&data[..8]);
    let steps = (data.len() - 8).min(MAX_STEPS);

    let env = default_env();
    let owner = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let askers = generate_addresses(&env, ASKERS);
    let answerers = generate_addresses(&env, ANSWERERS);
    let (token_address, token, token_admin_client) = create_token_contract(&env, &token_admin);

    let contract_id = env.register(QuestionEscrowContract, ());
    let client = QuestionEscrowContractClient::new(&env, &contract_id);
    client.init(&owner, &token_address, &None);

    let question = String::from_str(&env, "q");
    let answer = String::from_str(&env, "a");
    let mut asked: Vec<(usize, usize, u32)> = Vec::new();

    for op in OpGenerator::new(u64::from_le_bytes(seed), ASKERS, ANSWERERS, 1_000).take(steps) {
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
                if let Ok(Ok(index)) = client.try_ask_question(
                    &askers[asker],
                    &answerers[answerer],
                    &question,
                    &bounty,
                    &(now(&env) + lifetime),
                ) {
                    asked.push((asker, answerer, index));
                }
            }
            Op::Answer { pick } if !asked.is_empty() => {
                let (asker, answerer, index) = asked[pick % asked.len()];
                let _ = client.try_answer_question(
                    &answerers[answerer],
                    &askers[asker],
                    &index,
                    &answer,
                );
            }
            Op::Cancel { pick } if !asked.is_empty() => {
                let (asker, answerer, index) = asked[pick % asked.len()];
                let _ = client.try_cancel_question(&askers[asker], &answerers[answerer], &index);
            }
            Op::Withdraw { answerer } => {
                let _ = client.try_answerer_withdraw(&answerers[answerer]);
            }
            Op::Advance { seconds } => advance_time(&env, seconds),
            _ => {}
        }

        let accounting = client.get_accounting();
        assert_eq!(
            accounting.custody_balance,
            accounting.open_escrow + accounting.withdrawable
        );
        let credited: i128 = answerers
            .iter()
            .map(|a| client.get_settings(a).withdrawable_amount)
            .sum();
        assert_eq!(credited, accounting.withdrawable);
    }
});
