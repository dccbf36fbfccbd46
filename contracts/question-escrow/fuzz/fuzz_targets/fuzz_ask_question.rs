#![no_main]

use libfuzzer_sys::fuzz_target;
use question_escrow::{Error, QuestionEscrowContract, QuestionEscrowContractClient};
use question_escrow_test_utils::{create_token_contract, default_env, mint_and_approve, now};
use soroban_sdk::{testutils::Address as _, Address, String};

const FUNDED: i128 = 1_000_000;

fn read_i128(bytes: &[u8]) -> i128 {
    let mut buf = [0u8; 16];
    let n = bytes.len().min(16);
    buf[..n].copy_from_slice(&bytes[..n]);
    i128::from_le_bytes(buf)
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let n = bytes.len().min(8);
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(buf)
}

// Any ask either escrows exactly the bounty or leaves every balance untouched.
fuzz_target!(|data: &[u8]| {
    if data.len() < 40 {
        return;
    }
    let bounty = read_i128(&data[0..16]) % (2 * FUNDED);
    let expiry_offset = read_u64(&data[16..24]) as i64 as i128;
    let price_minimum = read_i128(&data[24..40]).rem_euclid(FUNDED);

    let env = default_env();
    let owner = Address::generate(&env);
    let asker = Address::generate(&env);
    let answerer = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let (token_address, token, token_admin_client) = create_token_contract(&env, &token_admin);

    let contract_id = env.register(QuestionEscrowContract, ());
    let client = QuestionEscrowContractClient::new(&env, &contract_id);
    client.init(&owner, &token_address, &None);
    client.set_answerer_settings(&answerer, &price_minimum, &String::from_str(&env, ""));
    mint_and_approve(&token, &token_admin_client, &asker, &contract_id, FUNDED);

    let expiry = (now(&env) as i128 + expiry_offset).clamp(0, u64::MAX as i128) as u64;
    let result = client.try_ask_question(
        &asker,
        &answerer,
        &String::from_str(&env, "q"),
        &bounty,
        &expiry,
    );

    match result {
        Ok(Ok(index)) => {
            assert_eq!(index, 0);
            assert!(bounty >= price_minimum && bounty <= FUNDED);
            assert!(expiry > now(&env));
            assert_eq!(token.balance(&contract_id), bounty);
            assert_eq!(token.balance(&asker), FUNDED - bounty);
            assert_eq!(client.get_accounting().open_escrow, bounty);
        }
        Ok(Err(_)) | Err(Err(_)) => panic!("unexpected host failure"),
        Err(Ok(error)) => {
            assert!(matches!(
                error,
                Error::InvalidExpiry
                    | Error::InvalidAmount
                    | Error::BelowMinimumBounty
                    | Error::InsufficientAllowance
                    | Error::TransferFailed
            ));
            assert_eq!(token.balance(&contract_id), 0);
            assert_eq!(token.balance(&asker), FUNDED);
            assert_eq!(client.get_question_count(&asker, &answerer), 0);
        }
    }
});
