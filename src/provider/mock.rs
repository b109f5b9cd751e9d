//! In-memory chain provider
//!
//! Serves scripted accounts, balances, and gas prices, and records every
//! submitted transfer. Never signs or broadcasts anything. Tests use it to
//! assert exactly which submissions a sweep performed; the CLI does not need
//! a live node to exercise the flow either.

use crate::error::{Error, Result};
use crate::provider::{ChainProvider, TransferRequest};
use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted chain provider for tests and offline runs
#[derive(Debug, Default)]
pub struct MockChainProvider {
    accounts: Vec<Address>,
    balances: HashMap<Address, U256>,
    gas_price: u128,
    reject_accounts: bool,
    /// 1-indexed submission that fails, if any
    fail_at_submission: Option<usize>,
    submitted: Mutex<Vec<TransferRequest>>,
}

impl MockChainProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account to the set returned by `request_accounts`
    pub fn with_account(mut self, address: Address) -> Self {
        self.accounts.push(address);
        self
    }

    pub fn with_balance(mut self, address: Address, balance: U256) -> Self {
        self.balances.insert(address, balance);
        self
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Decline all account access requests
    pub fn rejecting_accounts(mut self) -> Self {
        self.reject_accounts = true;
        self
    }

    /// Make the k-th submission (1-indexed) fail
    pub fn failing_at_submission(mut self, k: usize) -> Self {
        self.fail_at_submission = Some(k);
        self
    }

    /// Everything submitted so far, in order
    pub fn submitted(&self) -> Vec<TransferRequest> {
        self.submitted.lock().expect("mock poisoned").clone()
    }
}

#[async_trait]
impl ChainProvider for MockChainProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        if self.reject_accounts {
            return Err(Error::ProviderRejected(
                "user rejected the request".to_string(),
            ));
        }
        if self.accounts.is_empty() {
            return Err(Error::ProviderRejected(
                "provider returned no accounts".to_string(),
            ));
        }
        Ok(self.accounts.clone())
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        Ok(self.balances.get(&address).copied().unwrap_or(U256::ZERO))
    }

    async fn gas_price(&self) -> Result<u128> {
        Ok(self.gas_price)
    }

    async fn send_transaction(&self, request: TransferRequest) -> Result<TxHash> {
        let mut submitted = self.submitted.lock().expect("mock poisoned");
        submitted.push(request);

        let index = submitted.len();
        if self.fail_at_submission == Some(index) {
            return Err(Error::Provider("transaction rejected by node".to_string()));
        }

        // Deterministic fake hash derived from the submission index
        Ok(TxHash::with_last_byte(index as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn addr(s: &str) -> Address {
        Address::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn unknown_address_has_zero_balance() {
        let provider = MockChainProvider::new();
        let balance = provider
            .get_balance(addr("0x1111111111111111111111111111111111111111"))
            .await
            .unwrap();
        assert_eq!(balance, U256::ZERO);
    }

    #[tokio::test]
    async fn rejecting_accounts_fails_with_rejection() {
        let provider = MockChainProvider::new()
            .with_account(addr("0x1111111111111111111111111111111111111111"))
            .rejecting_accounts();
        let err = provider.request_accounts().await.unwrap_err();
        assert!(matches!(err, Error::ProviderRejected(_)));
    }

    #[tokio::test]
    async fn empty_account_set_is_a_rejection() {
        let provider = MockChainProvider::new();
        let err = provider.request_accounts().await.unwrap_err();
        assert!(matches!(err, Error::ProviderRejected(_)));
    }

    #[tokio::test]
    async fn records_submissions_and_fails_on_schedule() {
        let provider = MockChainProvider::new().failing_at_submission(2);
        let request = TransferRequest {
            from: addr("0x1111111111111111111111111111111111111111"),
            to: addr("0x2222222222222222222222222222222222222222"),
            value: U256::from(1u64),
            gas: 31_500,
            gas_price: 1,
        };

        assert!(provider.send_transaction(request.clone()).await.is_ok());
        assert!(provider.send_transaction(request.clone()).await.is_err());
        assert_eq!(provider.submitted().len(), 2);
    }
}
