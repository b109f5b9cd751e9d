//! Configuration for the wallet sweeper

use crate::error::{Error, Result};
use crate::units;
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable names
mod env_vars {
    /// Explicit RPC endpoint (highest priority)
    pub const ETH_RPC_URL: &str = "ETH_RPC_URL";
    /// Provider API key, builds the endpoint URL automatically
    pub const ALCHEMY_API_KEY: &str = "ALCHEMY_API_KEY";
}

/// Public RPC endpoint (rate limited, for testing only)
const PUBLIC_RPC: &str = "https://eth.llamarpc.com";

/// Sweep parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Minimum balance (native units) below which a source wallet is skipped
    #[serde(default = "defaults::dust_threshold_eth")]
    pub dust_threshold_eth: f64,
    /// Gas units of a plain value transfer
    #[serde(default = "defaults::base_gas_units")]
    pub base_gas_units: u64,
    /// Safety multiplier applied to the submitted gas limit.
    ///
    /// The fee deducted from the balance always uses `base_gas_units`
    /// unbuffered; the buffer only widens the limit the node will accept.
    #[serde(default = "defaults::gas_buffer")]
    pub gas_buffer: f64,
}

mod defaults {
    pub fn dust_threshold_eth() -> f64 {
        0.001
    }

    pub fn base_gas_units() -> u64 {
        21_000
    }

    pub fn gas_buffer() -> f64 {
        1.5
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            dust_threshold_eth: defaults::dust_threshold_eth(),
            base_gas_units: defaults::base_gas_units(),
            gas_buffer: defaults::gas_buffer(),
        }
    }
}

impl SweepConfig {
    /// Load from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// The dust threshold in smallest units
    pub fn dust_threshold_wei(&self) -> U256 {
        units::eth_to_wei(self.dust_threshold_eth)
    }

    /// Gas limit submitted with each transfer, buffer applied and floored
    pub fn buffered_gas_limit(&self) -> u64 {
        (self.base_gas_units as f64 * self.gas_buffer) as u64
    }
}

/// RPC endpoint resolution
///
/// Priority:
/// 1. `ETH_RPC_URL`
/// 2. `ALCHEMY_API_KEY` - builds the mainnet URL
/// 3. Public RPC fallback (rate limited, for testing only)
#[derive(Debug, Clone)]
pub struct RpcSettings {
    url: String,
}

impl RpcSettings {
    pub fn from_env() -> Self {
        if let Ok(url) = std::env::var(env_vars::ETH_RPC_URL) {
            tracing::debug!("Using ETH_RPC_URL");
            return Self { url };
        }

        if let Ok(key) = std::env::var(env_vars::ALCHEMY_API_KEY) {
            tracing::info!("Building RPC URL from ALCHEMY_API_KEY");
            return Self {
                url: format!("https://eth-mainnet.g.alchemy.com/v2/{}", key),
            };
        }

        tracing::warn!("No RPC configured, using public RPC (rate limited)");
        Self {
            url: PUBLIC_RPC.to_string(),
        }
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
