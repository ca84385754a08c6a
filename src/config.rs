//! Pipeline configuration
//!
//! Loaded from an optional TOML file; every field falls back to the stock
//! regtest scenario.
//!
//! ```toml
//! network = "regtest"
//! preimage = "Btrust Builders"
//! amount = 100000
//! lock_mode = "literal"
//!
//! [spend]
//! destination = "mr6M79HZLa2R9r5KKJrtNK3VpqaiEQ8C2b"
//! fee = 1000
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::error::{HashLockError, Result};
use crate::network::Network;
use crate::pipeline::PipelineConfig;
use crate::script::LockMode;
use crate::transaction::SpendConfig;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub network: Network,
    pub preimage: String,
    pub amount: i64,
    pub lock_mode: LockMode,
    pub spend: SpendConfig,
    /// Stop after building the funding transaction
    pub skip_spend: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::Regtest,
            preimage: DEFAULT_PREIMAGE.to_string(),
            amount: DEFAULT_AMOUNT,
            lock_mode: LockMode::default(),
            spend: SpendConfig::default(),
            skip_spend: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| HashLockError::decode("config", e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| HashLockError::ConfigIo {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_toml_str(&contents)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            preimage: self.preimage.as_bytes().to_vec(),
            amount: self.amount,
            network: self.network.params(),
            lock_mode: self.lock_mode,
            spend: (!self.skip_spend).then(|| self.spend.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkParameters;

    #[test]
    fn test_empty_config_is_stock_scenario() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.network, NetworkParameters::REGTEST);
        assert_eq!(pipeline.preimage, b"Btrust Builders".to_vec());
        assert_eq!(pipeline.spend, Some(SpendConfig::default()));
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml_str(
            r#"
            network = "testnet"
            lock_mode = "commitment"

            [spend]
            fee = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.lock_mode, LockMode::Commitment);
        assert_eq!(config.spend.fee, 250);
        assert_eq!(config.spend.destination, DEFAULT_DESTINATION);
        assert_eq!(config.amount, DEFAULT_AMOUNT);
    }

    #[test]
    fn test_skip_spend() {
        let config = Config::from_toml_str("skip_spend = true").unwrap();
        assert_eq!(config.pipeline_config().spend, None);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/hashlock-tx.toml")).unwrap_err();
        assert!(matches!(err, HashLockError::ConfigIo { .. }));
        assert!(err.to_string().contains("/nonexistent/hashlock-tx.toml"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            Config::from_toml_str("netwrk = \"regtest\""),
            Err(HashLockError::Decode { .. })
        ));
    }
}
