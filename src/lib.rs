//! # hashlock-tx
//!
//! Construction of hash-locked Bitcoin transactions.
//!
//! This crate builds a P2SH redeem script that locks funds behind a SHA-256
//! preimage, derives the network address of that script, constructs a
//! funding transaction paying into the address and a spending transaction
//! that unlocks it by revealing the preimage.
//!
//! ## Pipeline
//!
//! - Preimage → redeem script ([`script`])
//! - Redeem script → P2SH address ([`address`])
//! - Address → funding transaction ([`transaction`])
//! - Funding transaction + unlocking script → spending transaction ([`transaction`])
//!
//! Every step is a pure function of its inputs. The network is always passed
//! explicitly; [`HashLock`] binds one [`NetworkParameters`] value so that all
//! steps agree on it.
//!
//! ## Usage
//!
//! ```rust
//! use hashlock_tx::HashLock;
//! use hashlock_tx::network::NetworkParameters;
//!
//! let hash_lock = HashLock::new(NetworkParameters::REGTEST);
//! let script = hash_lock.redeem_script(b"Btrust Builders").unwrap();
//! assert_eq!(script.to_hex(), "a80f427472757374204275696c6465727387");
//!
//! let address = hash_lock.derive_address(&script.to_hex()).unwrap();
//! assert_eq!(address.to_string(), "2MytaPKkM6FYRt7PgUSSfwvMwYsHrQLbH9W");
//! ```

pub mod types;
pub mod constants;
pub mod error;
pub mod hash;
pub mod network;
pub mod script;
pub mod address;
pub mod transaction;
pub mod interpreter;
pub mod pipeline;
pub mod config;

// Re-export commonly used types
pub use types::*;
pub use error::{HashLockError, Result};
pub use network::{Network, NetworkParameters};
pub use script::LockMode;
pub use transaction::SpendConfig;

/// The four construction steps bound to one network
///
/// # Examples
///
/// ```
/// use hashlock_tx::{HashLock, SpendConfig};
/// use hashlock_tx::network::NetworkParameters;
///
/// let hash_lock = HashLock::new(NetworkParameters::REGTEST);
/// let script = hash_lock.redeem_script(b"Btrust Builders").unwrap();
/// let address = hash_lock.derive_address(&script.to_hex()).unwrap();
///
/// let funding = hash_lock.funding_transaction(&address.encoded, 100_000).unwrap();
/// assert_eq!(funding.outputs[0].value, 100_000);
///
/// let spending = hash_lock
///     .spending_transaction(&funding, &script.to_hex(), "00", &SpendConfig::default())
///     .unwrap();
/// assert_eq!(spending.outputs[0].value, 99_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashLock {
    network: NetworkParameters,
}

impl HashLock {
    pub fn new(network: NetworkParameters) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &NetworkParameters {
        &self.network
    }

    /// Build `OP_SHA256 <preimage> OP_EQUAL`
    pub fn redeem_script(&self, preimage: &[u8]) -> Result<RedeemScript> {
        script::build_redeem_script(preimage)
    }

    /// Derive the P2SH address of a hex-encoded redeem script
    pub fn derive_address(&self, redeem_script_hex: &str) -> Result<Address> {
        address::derive_address(redeem_script_hex, &self.network)
    }

    /// Build a transaction paying `amount` to `address`
    pub fn funding_transaction(&self, address: &str, amount: Integer) -> Result<Transaction> {
        transaction::build_funding_transaction(address, amount, &self.network)
    }

    /// Build a transaction spending output 0 of `previous_tx`
    pub fn spending_transaction(
        &self,
        previous_tx: &Transaction,
        locking_script_hex: &str,
        unlocking_script_hex: &str,
        config: &SpendConfig,
    ) -> Result<Transaction> {
        transaction::build_spending_transaction(
            previous_tx,
            locking_script_hex,
            unlocking_script_hex,
            &self.network,
            config,
        )
    }

    /// Transaction identity in display order
    pub fn txid(&self, tx: &Transaction) -> String {
        transaction::txid_hex(tx)
    }
}
