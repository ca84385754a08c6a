//! Script evaluation for hash-lock spends
//!
//! Covers the push operations, hashing and equality opcodes that hash-lock
//! and P2SH scripts use. Anything else is rejected rather than guessed at.
//!
//! VerifyScript(ss, spk):
//! 1. ss must be push-only; run it on an empty stack
//! 2. Run spk on the resulting stack
//! 3. If spk is `OP_HASH160 <h> OP_EQUAL`, pop the last element pushed by ss
//!    as the redeem script and run it on the stack ss left behind
//! 4. Valid iff the final stack is non-empty and its top element is true

use tracing::debug;

use crate::constants::*;
use crate::error::{HashLockError, Result};
use crate::hash::{hash160, sha256, sha256d};
use crate::script::{p2sh_hash, parse_script, Instruction};
use crate::transaction::transaction_id;
use crate::types::*;

/// Run `script` against `stack`
///
/// Returns `Ok(false)` when a verify-style opcode fails and `Err` for
/// malformed scripts, unsupported opcodes or resource limit violations.
pub fn eval_script(script: &[u8], stack: &mut Vec<ByteString>) -> Result<bool> {
    if script.len() > MAX_SCRIPT_SIZE {
        return Err(HashLockError::ScriptExecution(format!(
            "script of {} bytes exceeds {}",
            script.len(),
            MAX_SCRIPT_SIZE
        )));
    }

    for instruction in parse_script(script)? {
        match instruction {
            Instruction::Push(data) => {
                if data.len() > MAX_SCRIPT_ELEMENT_SIZE {
                    return Err(HashLockError::ScriptExecution(format!(
                        "push of {} bytes exceeds element limit",
                        data.len()
                    )));
                }
                stack.push(data);
            }
            Instruction::Op(opcode) => {
                if !execute_opcode(opcode, stack)? {
                    return Ok(false);
                }
            }
        }

        if stack.len() > MAX_STACK_SIZE {
            return Err(HashLockError::ScriptExecution("Stack overflow".to_string()));
        }
    }

    Ok(true)
}

/// Execute a single non-push opcode
fn execute_opcode(opcode: u8, stack: &mut Vec<ByteString>) -> Result<bool> {
    match opcode {
        OP_1NEGATE => {
            stack.push(vec![0x81]);
            Ok(true)
        }

        // OP_1 to OP_16
        OP_1..=OP_16 => {
            stack.push(vec![opcode - (OP_1 - 1)]);
            Ok(true)
        }

        OP_VERIFY => match stack.pop() {
            Some(item) => Ok(cast_to_bool(&item)),
            None => Ok(false),
        },

        OP_DROP => Ok(stack.pop().is_some()),

        OP_DUP => match stack.last().cloned() {
            Some(item) => {
                stack.push(item);
                Ok(true)
            }
            None => Ok(false),
        },

        OP_EQUAL | OP_EQUALVERIFY => {
            let (Some(a), Some(b)) = (stack.pop(), stack.pop()) else {
                return Ok(false);
            };
            if opcode == OP_EQUALVERIFY {
                return Ok(a == b);
            }
            stack.push(if a == b { vec![1] } else { vec![] });
            Ok(true)
        }

        OP_SHA256 | OP_HASH160 | OP_HASH256 => {
            let Some(item) = stack.pop() else {
                return Ok(false);
            };
            let digest = match opcode {
                OP_SHA256 => sha256(&item).to_vec(),
                OP_HASH160 => hash160(&item).to_vec(),
                _ => sha256d(&item).to_vec(),
            };
            stack.push(digest);
            Ok(true)
        }

        _ => Err(HashLockError::ScriptExecution(format!(
            "unsupported opcode {:#04x}",
            opcode
        ))),
    }
}

/// Script truthiness: any non-zero byte, ignoring a trailing sign bit
fn cast_to_bool(item: &[u8]) -> bool {
    for (i, byte) in item.iter().enumerate() {
        if *byte != 0 {
            return !(i == item.len() - 1 && *byte == 0x80);
        }
    }
    false
}

/// Check `script_sig` against `script_pubkey`, including P2SH redemption
pub fn verify_script(script_sig: &[u8], script_pubkey: &[u8]) -> Result<bool> {
    let sig_instructions = parse_script(script_sig)?;
    if sig_instructions
        .iter()
        .any(|i| matches!(i, Instruction::Op(op) if *op > OP_16))
    {
        return Err(HashLockError::ScriptExecution(
            "unlocking script is not push-only".to_string(),
        ));
    }

    let mut stack = Vec::new();
    if !eval_script(script_sig, &mut stack)? {
        return Ok(false);
    }
    let mut p2sh_stack = stack.clone();

    if !eval_script(script_pubkey, &mut stack)? || !top_is_true(&stack) {
        return Ok(false);
    }

    if p2sh_hash(script_pubkey).is_some() {
        let Some(redeem_script) = p2sh_stack.pop() else {
            return Ok(false);
        };
        if !eval_script(&redeem_script, &mut p2sh_stack)? {
            return Ok(false);
        }
        return Ok(top_is_true(&p2sh_stack));
    }

    Ok(true)
}

fn top_is_true(stack: &[ByteString]) -> bool {
    stack.last().map(|top| cast_to_bool(top)).unwrap_or(false)
}

/// Check input 0 of `spending_tx` against the output of `previous_tx` it references
pub fn verify_spend(spending_tx: &Transaction, previous_tx: &Transaction) -> Result<bool> {
    let input = spending_tx.inputs.first().ok_or_else(|| {
        HashLockError::ScriptExecution("spending transaction has no inputs".to_string())
    })?;

    if input.prevout.hash != transaction_id(previous_tx) {
        debug!("spend does not reference the given previous transaction");
        return Ok(false);
    }
    let output = previous_tx
        .outputs
        .get(input.prevout.index as usize)
        .ok_or(HashLockError::MissingOutput(input.prevout.index))?;

    verify_script(&input.script_sig, &output.script_pubkey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{build_hash_lock_script, build_redeem_script, build_unlocking_script, p2sh_script};

    #[test]
    fn test_eval_sha256_equal() {
        let script = build_hash_lock_script(b"secret").unwrap();
        let mut stack = vec![b"secret".to_vec()];
        assert!(eval_script(script.as_bytes(), &mut stack).unwrap());
        assert_eq!(stack, vec![vec![1]]);
    }

    #[test]
    fn test_eval_wrong_secret_leaves_false() {
        let script = build_hash_lock_script(b"secret").unwrap();
        let mut stack = vec![b"guess".to_vec()];
        assert!(eval_script(script.as_bytes(), &mut stack).unwrap());
        assert!(!top_is_true(&stack));
    }

    #[test]
    fn test_eval_small_integers() {
        let mut stack = Vec::new();
        assert!(eval_script(&[0x51, 0x60, OP_1NEGATE], &mut stack).unwrap());
        assert_eq!(stack, vec![vec![1], vec![16], vec![0x81]]);
    }

    #[test]
    fn test_eval_equalverify_failure() {
        let mut stack = Vec::new();
        assert!(!eval_script(&[0x51, 0x52, OP_EQUALVERIFY], &mut stack).unwrap());
    }

    #[test]
    fn test_eval_unsupported_opcode() {
        let mut stack = vec![vec![1]];
        assert!(eval_script(&[OP_CHECKSIG], &mut stack).is_err());
    }

    #[test]
    fn test_eval_stack_overflow() {
        let script = vec![0x51; MAX_STACK_SIZE + 1];
        let mut stack = Vec::new();
        assert!(eval_script(&script, &mut stack).is_err());
    }

    #[test]
    fn test_cast_to_bool() {
        assert!(!cast_to_bool(&[]));
        assert!(!cast_to_bool(&[0, 0]));
        assert!(!cast_to_bool(&[0, 0x80]));
        assert!(cast_to_bool(&[0x80, 0]));
        assert!(cast_to_bool(&[1]));
    }

    #[test]
    fn test_verify_p2sh_commitment_spend() {
        let redeem = build_hash_lock_script(b"Btrust Builders").unwrap();
        let script_pubkey = p2sh_script(&hash160(redeem.as_bytes()));
        let script_sig = build_unlocking_script(b"Btrust Builders", &redeem).unwrap();
        assert!(verify_script(&script_sig, &script_pubkey).unwrap());
    }

    #[test]
    fn test_verify_p2sh_wrong_secret() {
        let redeem = build_hash_lock_script(b"Btrust Builders").unwrap();
        let script_pubkey = p2sh_script(&hash160(redeem.as_bytes()));
        let script_sig = build_unlocking_script(b"Btrust", &redeem).unwrap();
        assert!(!verify_script(&script_sig, &script_pubkey).unwrap());
    }

    #[test]
    fn test_verify_literal_lock_is_unspendable_by_secret() {
        let redeem = build_redeem_script(b"Btrust Builders").unwrap();
        let script_pubkey = p2sh_script(&hash160(redeem.as_bytes()));
        let script_sig = build_unlocking_script(b"Btrust Builders", &redeem).unwrap();
        assert!(!verify_script(&script_sig, &script_pubkey).unwrap());
    }

    #[test]
    fn test_verify_wrong_redeem_script() {
        let redeem = build_hash_lock_script(b"a").unwrap();
        let other = build_hash_lock_script(b"b").unwrap();
        let script_pubkey = p2sh_script(&hash160(redeem.as_bytes()));
        let script_sig = build_unlocking_script(b"b", &other).unwrap();
        assert!(!verify_script(&script_sig, &script_pubkey).unwrap());
    }

    #[test]
    fn test_verify_rejects_non_push_script_sig() {
        assert!(verify_script(&[0x51, OP_DUP], &[0x51]).is_err());
    }
}
