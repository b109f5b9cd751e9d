//! Balance sweeping
//!
//! The `WalletSweepController` drains the spendable balance of every
//! registered source wallet into the main wallet, one transfer at a time.
//! Each provider call is awaited before the next begins; the first failed
//! submission aborts the batch and remaining wallets are not attempted.
//! Dust balances and balances that cannot cover the fee are skipped, never
//! failing the batch by themselves.

use crate::config::SweepConfig;
use crate::error::{Error, Result};
use crate::provider::{ChainProvider, TransferRequest};
use crate::session::WalletSession;
use crate::status::{StatusMessage, StatusSink};
use crate::units::{format_eth, short_address, short_hash};
use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;
use std::sync::Arc;

/// Derived per-wallet transfer: balance minus fee at the current gas price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferPlan {
    pub from: Address,
    pub balance: U256,
    pub gas_price: u128,
    /// Gas limit submitted with the transfer (buffered)
    pub gas_limit: u64,
    /// Sendable amount: `balance - gas_price * base_gas_units`
    pub amount: U256,
}

impl TransferPlan {
    /// Compute the sendable amount for a balance at the current gas price.
    ///
    /// The fee reserved from the balance uses the unbuffered
    /// `base_gas_units`; the buffer only widens the submitted gas limit.
    /// Returns `None` when the fee consumes the entire balance.
    pub fn build(
        from: Address,
        balance: U256,
        gas_price: u128,
        config: &SweepConfig,
    ) -> Option<Self> {
        let gas_cost = U256::from(gas_price) * U256::from(config.base_gas_units);
        if balance <= gas_cost {
            return None;
        }
        Some(Self {
            from,
            balance,
            gas_price,
            gas_limit: config.buffered_gas_limit(),
            amount: balance - gas_cost,
        })
    }

    /// The submission request for this plan
    pub fn to_request(&self, to: Address) -> TransferRequest {
        TransferRequest {
            from: self.from,
            to,
            value: self.amount,
            gas: self.gas_limit,
            gas_price: self.gas_price,
        }
    }
}

/// Terminal state of one wallet within a sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SweepOutcome {
    /// Balance below the dust threshold; nothing submitted
    SkippedDust,
    /// Fee would consume the entire balance; nothing submitted
    InsufficientAfterFee,
    /// Transfer submitted
    Submitted { tx_hash: TxHash },
}

/// What a sweep would do to one wallet, without submitting anything
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PlannedSweep {
    SkipDust { from: Address, balance: U256 },
    InsufficientAfterFee { from: Address, balance: U256 },
    Transfer(TransferPlan),
}

/// Per-wallet outcomes of a completed sweep, in sweep order
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    pub outcomes: Vec<(Address, SweepOutcome)>,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of transfers actually submitted
    pub fn submitted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, SweepOutcome::Submitted { .. }))
            .count()
    }
}

/// Connects wallets and sweeps their balances into the main wallet
pub struct WalletSweepController<P> {
    provider: P,
    config: SweepConfig,
    session: WalletSession,
    sink: Arc<dyn StatusSink>,
}

impl<P: ChainProvider> WalletSweepController<P> {
    pub fn new(provider: P, config: SweepConfig, sink: Arc<dyn StatusSink>) -> Self {
        Self {
            provider,
            config,
            session: WalletSession::new(),
            sink,
        }
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Set the main wallet directly, bypassing the provider prompt
    pub fn set_main(&mut self, address: Address) {
        self.session.set_main(address);
    }

    /// Register a source wallet directly, bypassing the provider prompt.
    ///
    /// Returns `false` when the address is the main wallet or a duplicate.
    pub fn register_source(&mut self, address: Address) -> bool {
        self.session.add_other(address)
    }

    /// Request account access and take the first account as the main wallet.
    ///
    /// On failure the error is surfaced as a status and session state is
    /// left unchanged.
    pub async fn connect_main(&mut self) -> Result<Address> {
        let main = match self.first_account().await {
            Ok(address) => address,
            Err(e) => {
                self.sink.emit(StatusMessage::error(format!("Error: {}", e)));
                return Err(e);
            }
        };

        self.session.set_main(main);
        self.sink.emit(StatusMessage::info(format!(
            "Main wallet connected: {}",
            short_address(main)
        )));
        tracing::info!(main = %main, "main wallet connected");
        Ok(main)
    }

    /// Request account access and register the first account as a source
    /// wallet.
    ///
    /// Returns `Ok(None)` without emitting anything when the account is the
    /// main wallet or already registered.
    pub async fn connect_other(&mut self) -> Result<Option<Address>> {
        let wallet = match self.first_account().await {
            Ok(address) => address,
            Err(e) => {
                self.sink.emit(StatusMessage::error(format!("Error: {}", e)));
                return Err(e);
            }
        };

        if !self.session.add_other(wallet) {
            tracing::debug!(wallet = %wallet, "wallet already registered, ignoring");
            return Ok(None);
        }

        self.sink.emit(StatusMessage::info(format!(
            "Wallet registered: {}",
            short_address(wallet)
        )));
        tracing::info!(wallet = %wallet, "source wallet registered");
        Ok(Some(wallet))
    }

    async fn first_account(&self) -> Result<Address> {
        let accounts = self.provider.request_accounts().await?;
        accounts
            .first()
            .copied()
            .ok_or_else(|| Error::ProviderRejected("provider returned no accounts".to_string()))
    }

    /// Sweep every registered source wallet into the main wallet, in
    /// insertion order, one at a time.
    ///
    /// A no-op returning an empty report when the session is not ready.
    /// The first submission failure aborts the batch: remaining wallets are
    /// not attempted and the error propagates.
    pub async fn sweep_all(&self) -> Result<SweepReport> {
        let Some(main) = self.session.main() else {
            return Ok(SweepReport::default());
        };
        if self.session.others().is_empty() {
            return Ok(SweepReport::default());
        }

        self.sink.emit(StatusMessage::info("Starting transfers..."));

        let mut report = SweepReport::default();
        for &from in self.session.others() {
            match self.sweep_one(from, main).await {
                Ok(outcome) => report.outcomes.push((from, outcome)),
                Err(e) => {
                    self.sink
                        .emit(StatusMessage::error(format!("Transfer failed: {}", e)));
                    return Err(e);
                }
            }
        }

        self.sink
            .emit(StatusMessage::success("All transfers complete!"));
        Ok(report)
    }

    /// Sweep a single wallet into `to`.
    ///
    /// Dust and fee-exceeds-balance cases return normally; only a failed
    /// submission (or a failed provider query) returns `Err`, which is what
    /// aborts the batch in `sweep_all`.
    async fn sweep_one(&self, from: Address, to: Address) -> Result<SweepOutcome> {
        let balance = self.provider.get_balance(from).await?;

        if balance < self.config.dust_threshold_wei() {
            self.sink.emit(StatusMessage::info(format!(
                "Skipping {}: balance {} below threshold",
                short_address(from),
                format_eth(balance)
            )));
            return Ok(SweepOutcome::SkippedDust);
        }

        let gas_price = self.provider.gas_price().await?;
        let Some(plan) = TransferPlan::build(from, balance, gas_price, &self.config) else {
            self.sink.emit(StatusMessage::error(format!(
                "Cannot sweep {}: fee exceeds balance {}",
                short_address(from),
                format_eth(balance)
            )));
            return Ok(SweepOutcome::InsufficientAfterFee);
        };

        tracing::debug!(
            from = %from,
            amount = %plan.amount,
            gas_price = plan.gas_price,
            gas_limit = plan.gas_limit,
            "submitting sweep transfer"
        );

        match self.provider.send_transaction(plan.to_request(to)).await {
            Ok(tx_hash) => {
                self.sink.emit(StatusMessage::success(format!(
                    "Swept {} from {} ({})",
                    format_eth(plan.amount),
                    short_address(from),
                    short_hash(tx_hash)
                )));
                Ok(SweepOutcome::Submitted { tx_hash })
            }
            Err(e) => {
                self.sink.emit(StatusMessage::error(format!(
                    "Transfer from {} failed: {}",
                    short_address(from),
                    e
                )));
                Err(e)
            }
        }
    }

    /// Compute the transfer plans a sweep would submit, without submitting.
    ///
    /// Queries balance and gas price per wallet exactly as `sweep_all`
    /// would.
    pub async fn plan_all(&self) -> Result<Vec<PlannedSweep>> {
        let mut plans = Vec::new();
        for &from in self.session.others() {
            let balance = self.provider.get_balance(from).await?;
            if balance < self.config.dust_threshold_wei() {
                plans.push(PlannedSweep::SkipDust { from, balance });
                continue;
            }
            let gas_price = self.provider.gas_price().await?;
            match TransferPlan::build(from, balance, gas_price, &self.config) {
                Some(plan) => plans.push(PlannedSweep::Transfer(plan)),
                None => plans.push(PlannedSweep::InsufficientAfterFee { from, balance }),
            }
        }
        Ok(plans)
    }
}
