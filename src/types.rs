//! Core types for hash-lock scripts and transactions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::*;
use crate::error::{HashLockError, Result};
use crate::network::NetworkParameters;

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// 160-bit script or key hash
pub type Hash160 = [u8; 20];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Natural number type
pub type Natural = u64;

/// Integer type
pub type Integer = i64;

/// OutPoint: reference to output `index` of the transaction with identity `hash`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

/// Transaction Input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: ByteString,
    pub sequence: Natural,
}

/// Transaction Output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Integer,
    pub script_pubkey: ByteString,
}

impl TransactionOutput {
    /// Build an output, rejecting negative values
    pub fn new(value: Integer, script_pubkey: ByteString) -> Result<Self> {
        if value < 0 {
            return Err(HashLockError::NegativeValue(value));
        }
        Ok(Self { value, script_pubkey })
    }
}

/// Transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: Natural,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: Natural,
}

impl Transaction {
    /// An empty version-1 transaction with no lock time
    pub fn empty() -> Self {
        Self {
            version: TX_VERSION,
            inputs: vec![],
            outputs: vec![],
            lock_time: 0,
        }
    }
}

/// Serialized redeem script
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedeemScript(ByteString);

impl RedeemScript {
    pub fn from_bytes(bytes: ByteString) -> Self {
        Self(bytes)
    }

    /// Parse the lowercase (or mixed case) hex transport form
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(HashLockError::EmptyInput("redeem script".to_string()));
        }
        let bytes = hex::decode(s).map_err(|e| HashLockError::decode("redeem script", e))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RedeemScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The script type an address commits to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// Pay to public key hash
    P2pkh,
    /// Pay to script hash
    P2sh,
}

/// A decoded Base58Check address scoped to one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub kind: AddressKind,
    pub hash: Hash160,
    pub network: NetworkParameters,
    /// The Base58Check string form
    pub encoded: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}
