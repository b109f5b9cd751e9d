//! Unit conversion and display helpers
//!
//! Pure functions for moving between smallest-unit (wei) integers and
//! human-readable strings, plus the shortened `0x1234…abcd` display forms
//! used in status messages.

use alloy::primitives::{Address, TxHash, U256};

/// Number of decimals of the native currency.
pub const NATIVE_DECIMALS: u32 = 18;

/// Format a U256 value with decimals
pub fn format_units(value: U256, decimals: u32) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        // Format with decimal places
        let remainder_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = remainder_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, trimmed)
        }
    }
}

/// Format a wei amount as native currency (18 decimals)
pub fn format_eth(value: U256) -> String {
    format_units(value, NATIVE_DECIMALS)
}

/// Convert a human-readable native-currency amount to wei, rounding down.
///
/// Intended for human-scale values like dust thresholds, not for exact
/// accounting: the f64 round-trip loses precision below ~1 wei anyway.
pub fn eth_to_wei(eth: f64) -> U256 {
    if eth <= 0.0 {
        return U256::ZERO;
    }
    U256::from((eth * 1e18) as u128)
}

/// Shorten an address for display: first 6 + last 4 hex chars.
///
/// Lower-cased so the shortened form is stable regardless of checksum
/// casing.
pub fn short_address(address: Address) -> String {
    let full = format!("{:?}", address).to_lowercase();
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

/// Shorten a transaction hash for display
pub fn short_hash(hash: TxHash) -> String {
    let full = format!("{:?}", hash).to_lowercase();
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}
