//! Network parameters for address encoding
//!
//! Every derivation and decode step takes the same [`NetworkParameters`]
//! value explicitly; addresses produced for one network are not guaranteed
//! to decode under another.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HashLockError;

/// Bitcoin network selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Signet,
    Regtest,
}

impl Network {
    pub fn params(self) -> NetworkParameters {
        match self {
            Network::Mainnet => NetworkParameters::MAINNET,
            Network::Testnet => NetworkParameters::TESTNET,
            Network::Signet => NetworkParameters::SIGNET,
            Network::Regtest => NetworkParameters::REGTEST,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Signet => "signet",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = HashLockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" | "testnet3" | "test" => Ok(Network::Testnet),
            "signet" => Ok(Network::Signet),
            "regtest" => Ok(Network::Regtest),
            other => Err(HashLockError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Address version bytes for one network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkParameters {
    pub network: Network,
    /// Base58Check version byte of P2PKH addresses
    pub pubkey_hash_prefix: u8,
    /// Base58Check version byte of P2SH addresses
    pub script_hash_prefix: u8,
}

impl NetworkParameters {
    pub const MAINNET: NetworkParameters = NetworkParameters {
        network: Network::Mainnet,
        pubkey_hash_prefix: 0x00,
        script_hash_prefix: 0x05,
    };

    pub const TESTNET: NetworkParameters = NetworkParameters {
        network: Network::Testnet,
        pubkey_hash_prefix: 0x6f,
        script_hash_prefix: 0xc4,
    };

    pub const SIGNET: NetworkParameters = NetworkParameters {
        network: Network::Signet,
        pubkey_hash_prefix: 0x6f,
        script_hash_prefix: 0xc4,
    };

    pub const REGTEST: NetworkParameters = NetworkParameters {
        network: Network::Regtest,
        pubkey_hash_prefix: 0x6f,
        script_hash_prefix: 0xc4,
    };

    pub fn name(&self) -> &'static str {
        self.network.name()
    }
}

impl From<Network> for NetworkParameters {
    fn from(network: Network) -> Self {
        network.params()
    }
}

impl FromStr for NetworkParameters {
    type Err = HashLockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Network>().map(Network::params)
    }
}
