//! The preimage → redeem script → address → funding tx → spending tx pipeline
//!
//! One parameterized run replaces per-network copies of the same program:
//! the network is an explicit value and the spend stage is optional.

use serde::Serialize;
use tracing::{info, warn};

use crate::address::derive_script_address;
use crate::error::Result;
use crate::interpreter::verify_spend;
use crate::network::NetworkParameters;
use crate::script::{build_lock_script, build_unlocking_script, LockMode};
use crate::transaction::{
    build_funding_transaction, build_spending_transaction, txid_hex, SpendConfig,
};
use crate::types::*;

/// Inputs of a single pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub preimage: ByteString,
    pub amount: Integer,
    pub network: NetworkParameters,
    pub lock_mode: LockMode,
    /// `None` stops after the funding transaction
    pub spend: Option<SpendConfig>,
}

/// What each stage produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub network: String,
    pub lock_mode: LockMode,
    pub redeem_script: String,
    pub address: String,
    pub funding_txid: String,
    pub funding_value: Integer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spend: Option<SpendReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendReport {
    pub txid: String,
    pub value: Integer,
    pub fee: Integer,
    /// Whether the unlocking script satisfies the funding output
    pub unlock_verified: bool,
}

/// Shown when a literal lock yields a spend the interpreter rejects
pub const LITERAL_LOCK_HINT: &str =
    "the literal lock compares SHA256(secret) with the secret itself and cannot be spent; \
     use --lock-mode commitment for a spendable hash lock";

impl PipelineReport {
    /// Advice for a spend that does not unlock its funding output
    pub fn hint(&self) -> Option<&'static str> {
        match &self.spend {
            Some(spend) if !spend.unlock_verified && self.lock_mode == LockMode::Literal => {
                Some(LITERAL_LOCK_HINT)
            }
            _ => None,
        }
    }
}

/// Full artifacts of a run, for callers that need the transactions themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub redeem_script: RedeemScript,
    pub address: Address,
    pub funding_tx: Transaction,
    pub spending_tx: Option<Transaction>,
    pub report: PipelineReport,
}

/// Run every stage in order, aborting on the first failure
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    let network = &config.network;

    let redeem_script = build_lock_script(&config.preimage, config.lock_mode)?;
    info!(redeem_script = %redeem_script, mode = ?config.lock_mode, "built redeem script");

    let address = derive_script_address(&redeem_script, network)?;
    info!(%address, network = network.name(), "derived address");

    let funding_tx = build_funding_transaction(&address.encoded, config.amount, network)?;
    let funding_txid = txid_hex(&funding_tx);
    info!(txid = %funding_txid, amount = config.amount, "built funding transaction");

    let mut report = PipelineReport {
        network: network.name().to_string(),
        lock_mode: config.lock_mode,
        redeem_script: redeem_script.to_hex(),
        address: address.encoded.clone(),
        funding_txid,
        funding_value: config.amount,
        spend: None,
    };

    let spending_tx = match &config.spend {
        Some(spend) => {
            let unlocking_script = build_unlocking_script(&config.preimage, &redeem_script)?;
            let tx = build_spending_transaction(
                &funding_tx,
                &redeem_script.to_hex(),
                &hex::encode(&unlocking_script),
                network,
                spend,
            )?;
            let unlock_verified = verify_spend(&tx, &funding_tx)?;
            if !unlock_verified {
                warn!(
                    mode = ?config.lock_mode,
                    "unlocking script does not satisfy the funding output; {}",
                    LITERAL_LOCK_HINT
                );
            }

            let spend_report = SpendReport {
                txid: txid_hex(&tx),
                value: tx.outputs[0].value,
                fee: spend.fee,
                unlock_verified,
            };
            info!(txid = %spend_report.txid, value = spend_report.value, "built spending transaction");
            report.spend = Some(spend_report);
            Some(tx)
        }
        None => None,
    };

    Ok(PipelineOutput {
        redeem_script,
        address,
        funding_tx,
        spending_tx,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HashLockError;

    fn scenario() -> PipelineConfig {
        PipelineConfig {
            preimage: b"Btrust Builders".to_vec(),
            amount: 100_000,
            network: NetworkParameters::REGTEST,
            lock_mode: LockMode::Literal,
            spend: Some(SpendConfig::default()),
        }
    }

    #[test]
    fn test_literal_scenario() {
        let output = run(&scenario()).unwrap();
        let report = output.report;
        assert_eq!(report.redeem_script, "a80f427472757374204275696c6465727387");
        assert_eq!(report.address, "2MytaPKkM6FYRt7PgUSSfwvMwYsHrQLbH9W");
        assert_eq!(
            report.funding_txid,
            "45d2523c3f0f5e66441893c214b4b4cf5057f6a610d84810672513f1aca04eb6"
        );
        let spend = report.spend.unwrap();
        assert_eq!(spend.value, 99_000);
        assert!(!spend.unlock_verified);
    }

    #[test]
    fn test_literal_spend_carries_hint() {
        let report = run(&scenario()).unwrap().report;
        assert_eq!(report.hint(), Some(LITERAL_LOCK_HINT));

        let mut config = scenario();
        config.lock_mode = LockMode::Commitment;
        assert_eq!(run(&config).unwrap().report.hint(), None);

        config.spend = None;
        assert_eq!(run(&config).unwrap().report.hint(), None);
    }

    #[test]
    fn test_commitment_scenario_verifies() {
        let mut config = scenario();
        config.lock_mode = LockMode::Commitment;
        let output = run(&config).unwrap();
        assert_eq!(output.report.address, "2MwDHax5L9jXVGmnhN2YECEx63ickZaf7n9");
        assert!(output.report.spend.unwrap().unlock_verified);
    }

    #[test]
    fn test_without_spend_stage() {
        let mut config = scenario();
        config.spend = None;
        let output = run(&config).unwrap();
        assert!(output.spending_tx.is_none());
        assert!(output.report.spend.is_none());
    }

    #[test]
    fn test_empty_preimage_aborts() {
        let mut config = scenario();
        config.preimage.clear();
        assert!(matches!(run(&config), Err(HashLockError::EmptyInput(_))));
    }

    #[test]
    fn test_insufficient_amount_aborts() {
        let mut config = scenario();
        config.amount = 500;
        assert!(matches!(
            run(&config),
            Err(HashLockError::InsufficientFunds { .. })
        ));
    }
}
