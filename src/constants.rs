//! Script opcodes and transaction constants

/// Push an empty byte vector
pub const OP_0: u8 = 0x00;

/// Next byte holds the push length
pub const OP_PUSHDATA1: u8 = 0x4c;

/// Next two bytes (LE) hold the push length
pub const OP_PUSHDATA2: u8 = 0x4d;

/// Next four bytes (LE) hold the push length
pub const OP_PUSHDATA4: u8 = 0x4e;

/// Push the number -1
pub const OP_1NEGATE: u8 = 0x4f;

/// Push the number 1; OP_2..OP_16 follow contiguously
pub const OP_1: u8 = 0x51;

/// Push the number 16
pub const OP_16: u8 = 0x60;

pub const OP_VERIFY: u8 = 0x69;
pub const OP_DROP: u8 = 0x75;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_SHA256: u8 = 0xa8;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_HASH256: u8 = 0xaa;
pub const OP_CHECKSIG: u8 = 0xac;

/// Largest push a direct length prefix can express
pub const MAX_DIRECT_PUSH: usize = 75;

/// Maximum size of a single pushed element
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// Maximum script length accepted by the interpreter
pub const MAX_SCRIPT_SIZE: usize = 10_000;

/// Maximum stack size during script execution
pub const MAX_STACK_SIZE: usize = 1000;

/// Transaction version used for every constructed transaction
pub const TX_VERSION: u64 = 1;

/// Sequence number for a final input
pub const SEQUENCE_FINAL: u64 = 0xffffffff;

/// Fixed spend fee in satoshis
pub const DEFAULT_FEE: i64 = 1000;

/// Destination the spending transaction pays to unless configured otherwise
pub const DEFAULT_DESTINATION: &str = "mr6M79HZLa2R9r5KKJrtNK3VpqaiEQ8C2b";

/// Amount locked by the funding transaction in the stock scenario
pub const DEFAULT_AMOUNT: i64 = 100_000;

/// Preimage used by the stock scenario
pub const DEFAULT_PREIMAGE: &str = "Btrust Builders";

/// Length of a HASH160 digest
pub const HASH160_LEN: usize = 20;

/// Satoshis per BTC
pub const SATOSHIS_PER_BTC: i64 = 100_000_000;
