//! Tests for error paths and edge cases

use hashlock_tx::*;

fn regtest() -> HashLock {
    HashLock::new(NetworkParameters::REGTEST)
}

fn funding(amount: Integer) -> Transaction {
    regtest()
        .funding_transaction("2MytaPKkM6FYRt7PgUSSfwvMwYsHrQLbH9W", amount)
        .unwrap()
}

#[test]
fn test_redeem_script_empty_preimage() {
    assert_eq!(
        regtest().redeem_script(b""),
        Err(HashLockError::EmptyInput("preimage".to_string()))
    );
}

#[test]
fn test_derive_address_errors() {
    assert!(matches!(
        regtest().derive_address(""),
        Err(HashLockError::EmptyInput(_))
    ));
    assert!(matches!(
        regtest().derive_address("invalidhex"),
        Err(HashLockError::Decode { .. })
    ));
}

#[test]
fn test_funding_invalid_address() {
    assert!(matches!(
        regtest().funding_transaction("invalid_address", 1000),
        Err(HashLockError::InvalidAddress(_))
    ));
}

#[test]
fn test_spending_error_order() {
    let prev = funding(100_000);
    let config = SpendConfig::default();

    // empty unlock is reported before a bad locking script
    assert!(matches!(
        regtest().spending_transaction(&prev, "zz", "", &config),
        Err(HashLockError::EmptyInput(_))
    ));

    match regtest().spending_transaction(&prev, "", "xyz", &config) {
        Err(HashLockError::Decode { field, .. }) => assert_eq!(field, "unlocking script"),
        other => panic!("unexpected {:?}", other),
    }

    match regtest().spending_transaction(&prev, "zz", "00", &config) {
        Err(HashLockError::Decode { field, .. }) => assert_eq!(field, "locking script"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_spending_insufficient_funds() {
    let prev = funding(999);
    assert_eq!(
        regtest().spending_transaction(&prev, "", "00", &SpendConfig::default()),
        Err(HashLockError::InsufficientFunds { available: 999, fee: 1000 })
    );
}

#[test]
fn test_spending_custom_fee() {
    let prev = funding(10_000);
    let config = SpendConfig {
        fee: 2_500,
        ..SpendConfig::default()
    };
    let tx = regtest().spending_transaction(&prev, "", "00", &config).unwrap();
    assert_eq!(tx.outputs[0].value, 7_500);
}

#[test]
fn test_spending_negative_fee_rejected() {
    let prev = funding(1_000);
    let config = SpendConfig {
        fee: -5_000,
        ..SpendConfig::default()
    };
    assert_eq!(
        regtest().spending_transaction(&prev, "", "00", &config),
        Err(HashLockError::NegativeFee(-5_000))
    );
}

#[test]
fn test_spending_minimum_fee_does_not_overflow() {
    let prev = funding(0);
    let config = SpendConfig {
        fee: i64::MIN,
        ..SpendConfig::default()
    };
    assert_eq!(
        regtest().spending_transaction(&prev, "", "00", &config),
        Err(HashLockError::NegativeFee(i64::MIN))
    );
}

#[test]
fn test_spending_overflowing_input_value() {
    // built by hand: TransactionOutput::new would refuse this value
    let mut prev = funding(0);
    prev.outputs[0].value = i64::MIN;
    assert_eq!(
        regtest().spending_transaction(&prev, "", "00", &SpendConfig::default()),
        Err(HashLockError::InsufficientFunds { available: i64::MIN, fee: 1000 })
    );
}

#[test]
fn test_spending_bad_destination() {
    let prev = funding(10_000);
    let config = SpendConfig {
        destination: "not-an-address".to_string(),
        fee: 1000,
    };
    assert!(matches!(
        regtest().spending_transaction(&prev, "", "00", &config),
        Err(HashLockError::InvalidAddress(_))
    ));
}

#[test]
fn test_negative_output_is_rejected() {
    assert_eq!(
        TransactionOutput::new(-5, vec![]),
        Err(HashLockError::NegativeValue(-5))
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        HashLockError::decode("unlocking script", "Odd number of digits").to_string(),
        "failed to decode unlocking script: Odd number of digits"
    );
    assert_eq!(
        HashLockError::EmptyUnlockBytes.to_string(),
        "empty unlocking script bytes"
    );
}
