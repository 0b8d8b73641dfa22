use crate::errors::ModelError;
use crate::{item, store, user};

#[test]
fn blank_names_are_rejected() {
    assert!(matches!(store::validate_name("   "), Err(ModelError::Validation(_))));
    assert!(matches!(item::validate_name(""), Err(ModelError::Validation(_))));
    assert!(matches!(user::validate_username("\t"), Err(ModelError::Validation(_))));
}

#[test]
fn names_over_limit_are_rejected() {
    let long = "x".repeat(store::NAME_MAX_LEN + 1);
    assert!(store::validate_name(&long).is_err());
    assert!(store::validate_name(&long[..store::NAME_MAX_LEN]).is_ok());
}

#[test]
fn price_is_rounded_and_checked() {
    assert_eq!(item::normalize_price(10.5).unwrap(), 10.5);
    assert_eq!(item::normalize_price(0.125).unwrap(), 0.13);
    assert!(item::normalize_price(-0.01).is_err());
    assert!(item::normalize_price(f64::NAN).is_err());
    assert!(item::normalize_price(f64::INFINITY).is_err());
}

#[test]
fn price_that_overflows_when_rounded_is_rejected() {
    assert!(matches!(item::normalize_price(1.0e308), Err(ModelError::Validation(_))));
    assert!(matches!(item::normalize_price(f64::MAX), Err(ModelError::Validation(_))));
    assert!(item::normalize_price(1.0e300).unwrap().is_finite());
}

#[test]
fn empty_description_becomes_none() {
    assert_eq!(item::validate_description(None).unwrap(), None);
    assert_eq!(item::validate_description(Some("  ")).unwrap(), None);
    assert_eq!(item::validate_description(Some(" fresh ")).unwrap(), Some("fresh".to_string()));
    assert!(item::validate_description(Some(&"d".repeat(256))).is_err());
}
