//! P2SH address derivation and Base58Check address decoding

use tracing::debug;

use crate::error::{HashLockError, Result};
use crate::hash::{hash160, sha256d};
use crate::network::NetworkParameters;
use crate::types::*;

/// Version byte plus 20-byte hash plus 4-byte checksum
const ADDRESS_LEN: usize = 25;

/// Derive the P2SH address of a hex-encoded redeem script
pub fn derive_address(redeem_script_hex: &str, network: &NetworkParameters) -> Result<Address> {
    let script = RedeemScript::from_hex(redeem_script_hex)?;
    derive_script_address(&script, network)
}

/// Derive the P2SH address of redeem script bytes
pub fn derive_script_address(script: &RedeemScript, network: &NetworkParameters) -> Result<Address> {
    if script.is_empty() {
        return Err(HashLockError::EmptyInput("redeem script".to_string()));
    }
    let address = encode_address(AddressKind::P2sh, hash160(script.as_bytes()), network);
    debug!(network = network.name(), %address, "derived p2sh address");
    Ok(address)
}

/// Render a hash as a Base58Check address on `network`
pub fn encode_address(kind: AddressKind, hash: Hash160, network: &NetworkParameters) -> Address {
    let version = match kind {
        AddressKind::P2pkh => network.pubkey_hash_prefix,
        AddressKind::P2sh => network.script_hash_prefix,
    };

    let mut payload = Vec::with_capacity(ADDRESS_LEN);
    payload.push(version);
    payload.extend_from_slice(&hash);
    let checksum = sha256d(&payload);
    payload.extend_from_slice(&checksum[..4]);

    Address {
        kind,
        hash,
        network: *network,
        encoded: bs58::encode(&payload).into_string(),
    }
}

/// Decode a Base58Check address, accepting only the version bytes of `network`
pub fn decode_address(addr: &str, network: &NetworkParameters) -> Result<Address> {
    let decoded = bs58::decode(addr)
        .into_vec()
        .map_err(|e| HashLockError::InvalidAddress(format!("'{}': {}", addr, e)))?;

    if decoded.len() != ADDRESS_LEN {
        return Err(HashLockError::InvalidAddress(format!(
            "'{}': decoded length {} is not {}",
            addr,
            decoded.len(),
            ADDRESS_LEN
        )));
    }

    let checksum = sha256d(&decoded[..21]);
    if decoded[21..] != checksum[..4] {
        return Err(HashLockError::InvalidAddress(format!("'{}': checksum mismatch", addr)));
    }

    let kind = if decoded[0] == network.script_hash_prefix {
        AddressKind::P2sh
    } else if decoded[0] == network.pubkey_hash_prefix {
        AddressKind::P2pkh
    } else {
        return Err(HashLockError::InvalidAddress(format!(
            "'{}': version byte {:#04x} is not used on {}",
            addr,
            decoded[0],
            network.name()
        )));
    };

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&decoded[1..21]);

    Ok(Address {
        kind,
        hash,
        network: *network,
        encoded: addr.to_string(),
    })
}
