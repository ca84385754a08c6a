//! Funding and spending transaction construction
//!
//! Both builders are single-shot: a transaction is either returned fully
//! assembled or not at all.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::address::decode_address;
use crate::constants::*;
use crate::error::{HashLockError, Result};
use crate::hash::sha256d;
use crate::network::NetworkParameters;
use crate::script::pay_to_address_script;
use crate::types::*;

/// Serialize a transaction in the legacy (non-witness) wire format
pub fn serialize_transaction(tx: &Transaction) -> ByteString {
    let mut data = Vec::new();

    // Version (4 bytes, little-endian)
    data.extend_from_slice(&(tx.version as u32).to_le_bytes());

    data.extend_from_slice(&encode_varint(tx.inputs.len() as u64));
    for input in &tx.inputs {
        data.extend_from_slice(&input.prevout.hash);
        data.extend_from_slice(&input.prevout.index.to_le_bytes());
        data.extend_from_slice(&encode_varint(input.script_sig.len() as u64));
        data.extend_from_slice(&input.script_sig);
        data.extend_from_slice(&(input.sequence as u32).to_le_bytes());
    }

    data.extend_from_slice(&encode_varint(tx.outputs.len() as u64));
    for output in &tx.outputs {
        data.extend_from_slice(&(output.value as u64).to_le_bytes());
        data.extend_from_slice(&encode_varint(output.script_pubkey.len() as u64));
        data.extend_from_slice(&output.script_pubkey);
    }

    // Lock time (4 bytes, little-endian)
    data.extend_from_slice(&(tx.lock_time as u32).to_le_bytes());

    data
}

/// Encode a number as a Bitcoin varint
fn encode_varint(value: u64) -> Vec<u8> {
    if value < 0xfd {
        vec![value as u8]
    } else if value <= 0xffff {
        let mut result = vec![0xfd];
        result.extend_from_slice(&(value as u16).to_le_bytes());
        result
    } else if value <= 0xffffffff {
        let mut result = vec![0xfe];
        result.extend_from_slice(&(value as u32).to_le_bytes());
        result
    } else {
        let mut result = vec![0xff];
        result.extend_from_slice(&value.to_le_bytes());
        result
    }
}

/// Transaction identity: SHA256d of the canonical serialization, internal byte order
pub fn transaction_id(tx: &Transaction) -> Hash {
    sha256d(&serialize_transaction(tx))
}

/// Transaction identity as conventionally displayed (byte-reversed hex)
pub fn txid_hex(tx: &Transaction) -> String {
    let mut id = transaction_id(tx);
    id.reverse();
    hex::encode(id)
}

/// Build a transaction with no inputs and a single output paying `amount` to `address`
pub fn build_funding_transaction(
    address: &str,
    amount: Integer,
    network: &NetworkParameters,
) -> Result<Transaction> {
    let address = decode_address(address, network)?;
    let script_pubkey = pay_to_address_script(&address);

    let mut tx = Transaction::empty();
    tx.outputs.push(TransactionOutput::new(amount, script_pubkey)?);
    debug!(%address, amount, "built funding transaction");
    Ok(tx)
}

/// Destination and fee for the spending transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendConfig {
    /// Address receiving the unlocked funds
    pub destination: String,
    /// Fee deducted from the spent output
    pub fee: Integer,
}

impl Default for SpendConfig {
    fn default() -> Self {
        Self {
            destination: DEFAULT_DESTINATION.to_string(),
            fee: DEFAULT_FEE,
        }
    }
}

/// Build a transaction spending output 0 of `previous_tx`
///
/// `unlocking_script_hex` becomes the input's scriptSig verbatim. Whether it
/// actually satisfies the locking script is not checked here; see
/// [`crate::interpreter::verify_spend`].
pub fn build_spending_transaction(
    previous_tx: &Transaction,
    locking_script_hex: &str,
    unlocking_script_hex: &str,
    network: &NetworkParameters,
    config: &SpendConfig,
) -> Result<Transaction> {
    if unlocking_script_hex.is_empty() {
        return Err(HashLockError::EmptyInput("unlocking script".to_string()));
    }
    let unlocking_script = hex::decode(unlocking_script_hex)
        .map_err(|e| HashLockError::decode("unlocking script", e))?;
    let locking_script = hex::decode(locking_script_hex)
        .map_err(|e| HashLockError::decode("locking script", e))?;
    if unlocking_script.is_empty() {
        return Err(HashLockError::EmptyUnlockBytes);
    }

    let prev_index = 0u32;
    let prev_output = previous_tx
        .outputs
        .get(prev_index as usize)
        .ok_or(HashLockError::MissingOutput(prev_index))?;

    if config.fee < 0 {
        return Err(HashLockError::NegativeFee(config.fee));
    }
    let value = prev_output
        .value
        .checked_sub(config.fee)
        .filter(|value| *value >= 0)
        .ok_or(HashLockError::InsufficientFunds {
            available: prev_output.value,
            fee: config.fee,
        })?;

    let destination = decode_address(&config.destination, network)?;
    let script_pubkey = pay_to_address_script(&destination);

    let mut tx = Transaction::empty();
    tx.inputs.push(TransactionInput {
        prevout: OutPoint {
            hash: transaction_id(previous_tx),
            index: prev_index,
        },
        script_sig: unlocking_script,
        sequence: SEQUENCE_FINAL,
    });
    tx.outputs.push(TransactionOutput::new(value, script_pubkey)?);

    debug!(
        locking_script = %hex::encode(&locking_script),
        %destination,
        value,
        fee = config.fee,
        "built spending transaction"
    );
    Ok(tx)
}
