//! In-memory wallet session state
//!
//! One main (destination) wallet plus an ordered set of other (source)
//! wallets. State lives for the lifetime of the controller instance and is
//! never persisted.
//!
//! `alloy::primitives::Address` is a 20-byte value type, so membership
//! checks compare canonical bytes and mixed-case input cannot produce
//! duplicates.

use alloy::primitives::Address;

/// The main wallet and the registered source wallets
#[derive(Debug, Clone, Default)]
pub struct WalletSession {
    main: Option<Address>,
    others: Vec<Address>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The destination wallet, once connected
    pub fn main(&self) -> Option<Address> {
        self.main
    }

    /// Registered source wallets, in insertion order
    pub fn others(&self) -> &[Address] {
        &self.others
    }

    /// Set or replace the main wallet
    pub fn set_main(&mut self, address: Address) {
        self.main = Some(address);
    }

    /// Register a source wallet.
    ///
    /// Returns `false` without mutating anything when the address is the
    /// main wallet or is already registered.
    pub fn add_other(&mut self, address: Address) -> bool {
        if self.main == Some(address) || self.others.contains(&address) {
            return false;
        }
        self.others.push(address);
        true
    }

    /// Whether a sweep can run: main set and at least one source registered
    pub fn is_ready(&self) -> bool {
        self.main.is_some() && !self.others.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn addr(s: &str) -> Address {
        Address::from_str(s).unwrap()
    }

    #[test]
    fn add_other_is_idempotent() {
        let mut session = WalletSession::new();
        let wallet = addr("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

        assert!(session.add_other(wallet));
        assert!(!session.add_other(wallet));
        assert_eq!(session.others().len(), 1);
    }

    #[test]
    fn main_wallet_never_enters_other_set() {
        let mut session = WalletSession::new();
        let main = addr("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        session.set_main(main);

        assert!(!session.add_other(main));
        assert!(session.others().is_empty());
    }

    #[test]
    fn mixed_case_input_does_not_duplicate() {
        let mut session = WalletSession::new();
        let lower = addr("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd");
        let upper = addr("0xABCDEFABCDEFABCDEFABCDEFABCDEFABCDEFABCD");

        assert!(session.add_other(lower));
        assert!(!session.add_other(upper));
        assert_eq!(session.others().len(), 1);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut session = WalletSession::new();
        let first = addr("0x1111111111111111111111111111111111111111");
        let second = addr("0x2222222222222222222222222222222222222222");
        session.add_other(first);
        session.add_other(second);

        assert_eq!(session.others(), &[first, second]);
    }

    #[test]
    fn readiness_requires_both_sides() {
        let mut session = WalletSession::new();
        assert!(!session.is_ready());

        session.set_main(addr("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
        assert!(!session.is_ready());

        session.add_other(addr("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"));
        assert!(session.is_ready());
    }
}
