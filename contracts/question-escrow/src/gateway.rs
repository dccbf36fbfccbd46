//! Token Gateway: moves value between token holders and the contract's custody.
//!
//! Pulls go through `transfer_from` with the contract as spender, so an asker
//! has to `approve` the contract before asking. Every gateway rejection is
//! reported as a contract error instead of aborting the invocation.

use soroban_sdk::{token, Address, Env};

use crate::Error;

pub(crate) struct TokenGateway<'a> {
    client: token::Client<'a>,
}

impl<'a> TokenGateway<'a> {
    pub(crate) fn new(env: &Env, token: &Address) -> Self {
        Self {
            client: token::Client::new(env, token),
        }
    }

    fn custody(&self) -> Address {
        self.client.env.current_contract_address()
    }

    /// Debits `amount` from `from`'s allowance into the contract's custody.
    pub(crate) fn pull(&self, from: &Address, amount: i128) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }

        let custody = self.custody();
        if self.client.allowance(from, &custody) < amount {
            return Err(Error::InsufficientAllowance);
        }
        if self.client.balance(from) < amount {
            return Err(Error::TransferFailed);
        }

        match self
            .client
            .try_transfer_from(&custody, from, &custody, &amount)
        {
            Ok(Ok(())) => Ok(()),
            _ => Err(Error::TransferFailed),
        }
    }

    /// Credits `to` with `amount` out of the contract's custody.
    pub(crate) fn push(&self, to: &Address, amount: i128) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }

        let custody = self.custody();
        if self.client.balance(&custody) < amount {
            return Err(Error::TransferFailed);
        }

        match self.client.try_transfer(&custody, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(Error::TransferFailed),
        }
    }

    pub(crate) fn balance_of(&self, account: &Address) -> i128 {
        self.client.balance(account)
    }

    pub(crate) fn custody_balance(&self) -> i128 {
        self.balance_of(&self.custody())
    }
}
