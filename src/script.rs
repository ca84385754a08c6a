//! Script assembly: the hash-lock redeem script, P2SH unlocking scripts and
//! locking scripts for decoded addresses.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{HashLockError, Result};
use crate::hash::sha256;
use crate::types::*;

/// Incremental script assembler with minimal push encoding
#[derive(Debug, Default, Clone)]
pub struct ScriptBuilder {
    script: ByteString,
    err: Option<HashLockError>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw opcode
    pub fn push_opcode(mut self, opcode: u8) -> Self {
        if self.err.is_none() {
            self.script.push(opcode);
        }
        self
    }

    /// Append `data` using the smallest push that expresses it
    pub fn push_data(mut self, data: &[u8]) -> Self {
        if self.err.is_some() {
            return self;
        }
        if data.len() > MAX_SCRIPT_ELEMENT_SIZE {
            self.err = Some(HashLockError::ScriptConstruction(format!(
                "push of {} bytes exceeds maximum element size {}",
                data.len(),
                MAX_SCRIPT_ELEMENT_SIZE
            )));
            return self;
        }
        encode_push(&mut self.script, data);
        self
    }

    /// Finish the script, surfacing the first error encountered
    pub fn into_script(self) -> Result<ByteString> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(self.script),
        }
    }
}

fn encode_push(script: &mut ByteString, data: &[u8]) {
    match data {
        [] => script.push(OP_0),
        [n @ 1..=16] => script.push(OP_1 - 1 + *n),
        [0x81] => script.push(OP_1NEGATE),
        _ => {
            let len = data.len();
            if len <= MAX_DIRECT_PUSH {
                script.push(len as u8);
            } else if len <= 0xff {
                script.push(OP_PUSHDATA1);
                script.push(len as u8);
            } else if len <= 0xffff {
                script.push(OP_PUSHDATA2);
                script.extend_from_slice(&(len as u16).to_le_bytes());
            } else {
                script.push(OP_PUSHDATA4);
                script.extend_from_slice(&(len as u32).to_le_bytes());
            }
            script.extend_from_slice(data);
        }
    }
}

/// How the redeem script commits to the secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// `OP_SHA256 <secret> OP_EQUAL`: the operand is the secret itself
    #[default]
    Literal,
    /// `OP_SHA256 <SHA256(secret)> OP_EQUAL`: the standard hash lock
    Commitment,
}

/// Build `OP_SHA256 <preimage> OP_EQUAL`
pub fn build_redeem_script(preimage: &[u8]) -> Result<RedeemScript> {
    if preimage.is_empty() {
        return Err(HashLockError::EmptyInput("preimage".to_string()));
    }
    let script = ScriptBuilder::new()
        .push_opcode(OP_SHA256)
        .push_data(preimage)
        .push_opcode(OP_EQUAL)
        .into_script()?;
    Ok(RedeemScript::from_bytes(script))
}

/// Build `OP_SHA256 <SHA256(secret)> OP_EQUAL`, spendable by revealing `secret`
pub fn build_hash_lock_script(secret: &[u8]) -> Result<RedeemScript> {
    if secret.is_empty() {
        return Err(HashLockError::EmptyInput("preimage".to_string()));
    }
    build_redeem_script(&sha256(secret))
}

/// Build the redeem script for `secret` under `mode`
pub fn build_lock_script(secret: &[u8], mode: LockMode) -> Result<RedeemScript> {
    match mode {
        LockMode::Literal => build_redeem_script(secret),
        LockMode::Commitment => build_hash_lock_script(secret),
    }
}

/// P2SH scriptSig revealing the secret: `<secret> <redeem script>`
pub fn build_unlocking_script(secret: &[u8], redeem_script: &RedeemScript) -> Result<ByteString> {
    if secret.is_empty() {
        return Err(HashLockError::EmptyInput("preimage".to_string()));
    }
    if redeem_script.is_empty() {
        return Err(HashLockError::EmptyInput("redeem script".to_string()));
    }
    ScriptBuilder::new()
        .push_data(secret)
        .push_data(redeem_script.as_bytes())
        .into_script()
}

/// `OP_HASH160 <20-byte hash> OP_EQUAL`
pub fn p2sh_script(script_hash: &Hash160) -> ByteString {
    let mut script = Vec::with_capacity(23);
    script.push(OP_HASH160);
    script.push(HASH160_LEN as u8);
    script.extend_from_slice(script_hash);
    script.push(OP_EQUAL);
    script
}

/// `OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`
pub fn p2pkh_script(pubkey_hash: &Hash160) -> ByteString {
    let mut script = Vec::with_capacity(25);
    script.push(OP_DUP);
    script.push(OP_HASH160);
    script.push(HASH160_LEN as u8);
    script.extend_from_slice(pubkey_hash);
    script.push(OP_EQUALVERIFY);
    script.push(OP_CHECKSIG);
    script
}

/// Locking script paying to a decoded address
pub fn pay_to_address_script(address: &Address) -> ByteString {
    match address.kind {
        AddressKind::P2sh => p2sh_script(&address.hash),
        AddressKind::P2pkh => p2pkh_script(&address.hash),
    }
}

/// Extract the committed hash from a P2SH locking script
pub fn p2sh_hash(script_pubkey: &[u8]) -> Option<Hash160> {
    match script_pubkey {
        [OP_HASH160, 20, hash @ .., OP_EQUAL] if hash.len() == HASH160_LEN => {
            let mut out = [0u8; 20];
            out.copy_from_slice(hash);
            Some(out)
        }
        _ => None,
    }
}

/// A parsed script element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Pushed data, already decoded from its push opcode
    Push(ByteString),
    /// Any non-push opcode
    Op(u8),
}

/// Split a script into instructions, resolving push lengths
pub fn parse_script(script: &[u8]) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::new();
    let mut pc = 0;

    while pc < script.len() {
        let opcode = script[pc];
        pc += 1;

        let len = match opcode {
            OP_0 => {
                instructions.push(Instruction::Push(vec![]));
                continue;
            }
            1..=0x4b => opcode as usize,
            OP_PUSHDATA1 => read_len(script, &mut pc, 1)?,
            OP_PUSHDATA2 => read_len(script, &mut pc, 2)?,
            OP_PUSHDATA4 => read_len(script, &mut pc, 4)?,
            _ => {
                instructions.push(Instruction::Op(opcode));
                continue;
            }
        };

        let end = pc
            .checked_add(len)
            .filter(|end| *end <= script.len())
            .ok_or_else(|| {
                HashLockError::ScriptExecution(format!(
                    "push of {} bytes at offset {} overruns script",
                    len,
                    pc - 1
                ))
            })?;
        instructions.push(Instruction::Push(script[pc..end].to_vec()));
        pc = end;
    }

    Ok(instructions)
}

fn read_len(script: &[u8], pc: &mut usize, width: usize) -> Result<usize> {
    let bytes = script.get(*pc..*pc + width).ok_or_else(|| {
        HashLockError::ScriptExecution("truncated push length".to_string())
    })?;
    *pc += width;
    let mut buf = [0u8; 4];
    buf[..width].copy_from_slice(bytes);
    Ok(u32::from_le_bytes(buf) as usize)
}
