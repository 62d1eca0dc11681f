// Amount Tests
// Parsing, checked arithmetic and wire format of coin amounts

use stakevote::ledger::{Amount, AmountError};

// ============================================================================
// PARSING
// ============================================================================

#[test]
fn test_parse_decimal_string() {
    let amount = Amount::parse("5000000000000").unwrap();
    assert_eq!(amount.units(), 5_000_000_000_000);
    assert_eq!(amount.to_string(), "5000000000000");
}

#[test]
fn test_parse_rejects_non_digits() {
    for input in ["", " 1", "1e9", "0x10", "１２"] {
        assert!(
            matches!(Amount::parse(input), Err(AmountError::InvalidFormat(_))),
            "expected '{}' to be rejected",
            input
        );
    }
}

#[test]
fn test_parse_beyond_u128_fails() {
    let too_big = format!("{}0", u128::MAX);
    assert!(Amount::parse(&too_big).is_err());
}

#[test]
fn test_from_str_and_from_u64() {
    let parsed: Amount = "42".parse().unwrap();
    assert_eq!(parsed, Amount::from(42u64));
    assert!(Amount::ZERO.is_zero());
}

// ============================================================================
// ARITHMETIC
// ============================================================================

#[test]
fn test_checked_add_overflow() {
    let max = Amount::new(u128::MAX);
    let result = max.checked_add(Amount::new(1));
    assert_eq!(result, Err(AmountError::Overflow(max, Amount::new(1))));
}

#[test]
fn test_checked_sub_underflow() {
    let result = Amount::new(5).checked_sub(Amount::new(6));
    assert!(matches!(result, Err(AmountError::Underflow(_, _))));
    assert_eq!(
        Amount::new(6).checked_sub(Amount::new(5)).unwrap(),
        Amount::new(1)
    );
}

#[test]
fn test_division_and_remainder() {
    let forfeit = Amount::new(100);
    assert_eq!(forfeit.checked_div(3).unwrap(), Amount::new(33));
    assert_eq!(forfeit.checked_rem(3).unwrap(), Amount::new(1));
    assert_eq!(forfeit.checked_div(0), Err(AmountError::DivisionByZero));
    assert_eq!(forfeit.checked_rem(0), Err(AmountError::DivisionByZero));
}

#[test]
fn test_ordering() {
    assert!(Amount::new(10) > Amount::new(9));
    assert_eq!(Amount::new(3).max(Amount::new(7)), Amount::new(7));
}

// ============================================================================
// SERIALIZATION
// ============================================================================

#[test]
fn test_deserialize_requires_string() {
    let amount: Amount = serde_json::from_str("\"1000000000\"").unwrap();
    assert_eq!(amount, Amount::new(1_000_000_000));

    let bare: Result<Amount, _> = serde_json::from_str("1000000000");
    assert!(bare.is_err());
    let negative: Result<Amount, _> = serde_json::from_str("\"-5\"");
    assert!(negative.is_err());
}
