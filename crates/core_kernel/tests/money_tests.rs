//! Integration tests for Money and Currency

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod money_tests {
    use super::*;

    #[test]
    fn test_hours_times_rate() {
        let rate = Money::new(dec!(670), Currency::ZAR);
        let total = rate * Decimal::from(20u32);
        assert_eq!(total.amount(), dec!(13400));
        assert_eq!(total.currency(), Currency::ZAR);
    }

    #[test]
    fn test_fractional_rate_keeps_cents() {
        let rate = Money::new(dec!(500.01), Currency::ZAR);
        let total = rate.multiply(Decimal::from(3u32));
        assert_eq!(total.amount(), dec!(1500.03));
    }

    #[test]
    fn test_amounts_keep_four_places() {
        let m = Money::new(dec!(10.12345), Currency::ZAR);
        assert_eq!(m.amount(), dec!(10.1235));
        assert_eq!(m.to_string(), "R10.12");
    }

    #[test]
    fn test_sum_empty_is_zero() {
        let total = Money::sum(&Vec::new(), Currency::ZAR).unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_sum_rejects_mixed_currencies() {
        let items = vec![
            Money::new(dec!(10), Currency::ZAR),
            Money::new(dec!(10), Currency::USD),
        ];
        let result = Money::sum(&items, Currency::ZAR);
        assert_eq!(
            result,
            Err(MoneyError::CurrencyMismatch("ZAR".to_string(), "USD".to_string()))
        );
    }

    #[test]
    fn test_money_serde() {
        let m = Money::new(dec!(1500.50), Currency::ZAR);
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("ZAR"));
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
