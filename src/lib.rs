//! Wallet sweeper
//!
//! Connects to a chain provider, designates one main wallet, registers any
//! number of source wallets, and sweeps each source wallet's spendable
//! balance (balance minus estimated fee) into the main wallet.
//!
//! Transfers run strictly one at a time and the first failed submission
//! aborts the batch; dust balances are skipped rather than attempted. The
//! provider is an injected capability (`provider::ChainProvider`) and all
//! user-facing progress flows through a status sink (`status::StatusSink`),
//! so the core has no UI or transport of its own.

pub mod config;
pub mod provider;
pub mod session;
pub mod status;
pub mod sweep;
pub mod units;

mod error;

// Re-export commonly used types
pub use config::{RpcSettings, SweepConfig};
pub use error::{Error, Result};
pub use provider::{ChainProvider, MockChainProvider, RpcChainProvider, TransferRequest};
pub use session::WalletSession;
pub use status::{MemoryStatusSink, Severity, StatusMessage, StatusSink, TracingStatusSink};
pub use sweep::{PlannedSweep, SweepOutcome, SweepReport, TransferPlan, WalletSweepController};
