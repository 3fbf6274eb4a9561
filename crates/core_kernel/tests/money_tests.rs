//! Unit tests for the Money module
//!
//! Tests cover creation from minor and major units, checked arithmetic,
//! left-to-right summation and display.

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_from_minor_keeps_exact_units() {
        let m = Money::from_minor(1_050, Currency::AED);
        assert_eq!(m.minor(), 1_050);
        assert_eq!(m.to_major(), dec!(10.50));
        assert_eq!(m.currency(), Currency::AED);
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_from_major_accepts_whole_and_fractional_amounts() {
        assert_eq!(
            Money::from_major(dec!(3000), Currency::AED).unwrap().minor(),
            300_000
        );
        assert_eq!(
            Money::from_major(dec!(0.01), Currency::AED).unwrap().minor(),
            1
        );
        assert_eq!(
            Money::from_major(dec!(0), Currency::AED).unwrap(),
            Money::zero(Currency::AED)
        );
    }

    #[test]
    fn test_from_major_with_trailing_zeros() {
        let m = Money::from_major(dec!(1500.000), Currency::AED).unwrap();
        assert_eq!(m.minor(), 150_000);
    }

    #[test]
    fn test_from_major_never_rounds() {
        let err = Money::from_major(dec!(99.999), Currency::AED).unwrap_err();
        assert!(matches!(err, MoneyError::InvalidAmount(_)));
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::from_minor(1_000_000, Currency::AED);
        let b = Money::from_minor(300_000, Currency::AED);
        assert_eq!(a.checked_add(&b).unwrap().minor(), 1_300_000);
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let a = Money::from_minor(100, Currency::AED);
        let b = Money::from_minor(100, Currency::SAR);
        assert_eq!(
            a.checked_add(&b),
            Err(MoneyError::CurrencyMismatch("AED".to_string(), "SAR".to_string()))
        );
    }

    #[test]
    fn test_checked_mul_by_units() {
        let per_visa = Money::from_major(dec!(1500), Currency::AED).unwrap();
        assert_eq!(
            per_visa.checked_mul(3).unwrap(),
            Money::from_major(dec!(4500), Currency::AED).unwrap()
        );
        assert!(per_visa.checked_mul(0).unwrap().is_zero());
    }

    #[test]
    fn test_sum_left_to_right() {
        let parts = vec![
            Money::from_minor(1_000_000, Currency::AED),
            Money::from_minor(300_000, Currency::AED),
            Money::zero(Currency::AED),
        ];
        assert_eq!(
            Money::sum(&parts, Currency::AED).unwrap().minor(),
            1_300_000
        );
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let parts: Vec<Money> = Vec::new();
        assert!(Money::sum(&parts, Currency::AED).unwrap().is_zero());
    }

    #[test]
    fn test_sum_rejects_mixed_currencies() {
        let parts = vec![
            Money::from_minor(1, Currency::AED),
            Money::from_minor(1, Currency::USD),
        ];
        assert!(matches!(
            Money::sum(&parts, Currency::AED),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    #[should_panic(expected = "Money::add")]
    fn test_add_operator_panics_on_mismatch() {
        let _ = Money::from_minor(1, Currency::AED) + Money::from_minor(1, Currency::GBP);
    }
}

mod currency {
    use super::*;

    #[test]
    fn test_currency_parsing() {
        assert_eq!("aed".parse::<Currency>().unwrap(), Currency::AED);
        assert_eq!(" USD ".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!(
            "XYZ".parse::<Currency>(),
            Err(MoneyError::UnknownCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn test_currency_minor_units() {
        assert_eq!(Currency::AED.minor_units_per_major(), 100);
        assert_eq!(Currency::AED.code(), "AED");
    }

    #[test]
    fn test_money_serde_uses_minor_units() {
        let m = Money::from_minor(450_000, Currency::AED);
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json["minor"], 450_000);
        assert_eq!(json["currency"], "AED");
    }
}
