//! Error types for hash-lock script and transaction construction

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashLockError {
    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("failed to decode {field}: {reason}")]
    Decode { field: String, reason: String },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("script construction failed: {0}")]
    ScriptConstruction(String),

    #[error("insufficient funds: input value {available} cannot cover fee {fee}")]
    InsufficientFunds { available: i64, fee: i64 },

    #[error("empty unlocking script bytes")]
    EmptyUnlockBytes,

    #[error("output value must not be negative: {0}")]
    NegativeValue(i64),

    #[error("fee must not be negative: {0}")]
    NegativeFee(i64),

    #[error("previous transaction has no output at index {0}")]
    MissingOutput(u32),

    #[error("script execution failed: {0}")]
    ScriptExecution(String),

    #[error("cannot read config {path}: {reason}")]
    ConfigIo { path: String, reason: String },

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

impl HashLockError {
    /// Shorthand for a hex/text decode failure on a named field
    pub fn decode(field: &str, reason: impl ToString) -> Self {
        HashLockError::Decode {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HashLockError>;
