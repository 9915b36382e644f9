//! Automated claim validation
//!
//! Fixed policy rules applied to every new claim. All rules are evaluated;
//! errors and warnings accumulate in rule order.
//!
//! | Rule                                   | Outcome |
//! |----------------------------------------|---------|
//! | hourly rate above R500.00              | error   |
//! | more than 200 hours on one claim       | error   |
//! | more than 250 hours (5 weeks x 50h)    | warning |
//! | total too large to compute             | error   |
//! | total above R16000.00                  | error   |
//! | total above R5000.00 with no document  | warning |
//!
//! The 250-hour warning sits behind the 200-hour cap and cannot fire while
//! both constants stand.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Money;
use crate::claim::Claim;

pub const MAX_HOURLY_RATE: Decimal = dec!(500.00);
pub const MAX_HOURS_PER_WEEK: u32 = 50;
pub const MAX_HOURS_PER_CLAIM: u32 = 200;
pub const TYPICAL_CLAIM_WEEKS: u32 = 5;
pub const MAX_TOTAL_AMOUNT: Decimal = dec!(16000.00);
/// Above this total a claim is expected to carry a supporting document
pub const DOCUMENTATION_THRESHOLD: Decimal = dec!(5000.00);

pub const AUTO_APPROVAL_MAX_TOTAL: Decimal = dec!(3000.00);
pub const AUTO_APPROVAL_MAX_RATE: Decimal = dec!(150.00);
pub const AUTO_APPROVAL_MAX_HOURS: u32 = 20;

/// Result of claim validation
///
/// Validity is derived from the error list, so a result with errors can
/// never report itself valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ValidationOutcome {
    /// Creates a successful validation outcome
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn add_recommendation(&mut self, recommendation: impl Into<String>) {
        self.recommendations.push(recommendation.into());
    }

    /// Errors followed by warnings, joined for storage on the claim
    pub fn notes(&self) -> String {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Applies the claim policy rules
pub struct ValidationEngine;

impl ValidationEngine {
    /// Validates a claim against every policy rule
    pub fn validate(claim: &Claim) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::ok();
        let currency = claim.hourly_rate.currency();

        if claim.hourly_rate.amount() > MAX_HOURLY_RATE {
            outcome.add_error(format!(
                "Hourly rate ({}) exceeds maximum allowed rate ({}).",
                claim.hourly_rate,
                Money::new(MAX_HOURLY_RATE, currency)
            ));
        }

        if claim.hours_worked > MAX_HOURS_PER_CLAIM {
            outcome.add_error(format!(
                "Hours worked ({}) exceeds maximum allowed per claim ({}).",
                claim.hours_worked, MAX_HOURS_PER_CLAIM
            ));
        }

        let typical_limit = MAX_HOURS_PER_WEEK * TYPICAL_CLAIM_WEEKS;
        if claim.hours_worked > typical_limit {
            outcome.add_warning(format!(
                "Hours worked ({}) exceeds typical {}-week maximum ({} hours).",
                claim.hours_worked, TYPICAL_CLAIM_WEEKS, typical_limit
            ));
        }

        let total = match claim.checked_total_amount() {
            Ok(total) => total,
            Err(_) => {
                outcome.add_error(format!(
                    "Total amount for {} hours at {} is too large to compute.",
                    claim.hours_worked, claim.hourly_rate
                ));
                return outcome;
            }
        };

        if total.amount() > MAX_TOTAL_AMOUNT {
            outcome.add_error(format!(
                "Total amount ({}) exceeds maximum allowed ({}).",
                total,
                Money::new(MAX_TOTAL_AMOUNT, currency)
            ));
        }

        if total.amount() > DOCUMENTATION_THRESHOLD && !claim.has_supporting_document() {
            outcome.add_warning(format!(
                "High-value claim (over {}) submitted without supporting document.",
                Money::new(DOCUMENTATION_THRESHOLD, currency)
            ));
        }

        outcome
    }

    /// Stricter low-risk test, independent of [`ValidationEngine::validate`]
    pub fn is_eligible_for_auto_approval(claim: &Claim) -> bool {
        claim.total_amount().amount() <= AUTO_APPROVAL_MAX_TOTAL
            && claim.hourly_rate.amount() <= AUTO_APPROVAL_MAX_RATE
            && claim.hours_worked <= AUTO_APPROVAL_MAX_HOURS
            && claim.has_supporting_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::{ClaimId, Currency};
    use crate::claim::SupportingDocument;

    fn claim(hours: u32, rate: Decimal, documented: bool) -> Claim {
        let c = Claim::new(
            ClaimId::new_v7(),
            "Jane Lecturer",
            "PROG6212",
            hours,
            Money::new(rate, Currency::ZAR),
            Utc::now(),
        );
        if documented {
            c.with_document(SupportingDocument {
                name: "timesheet.pdf".to_string(),
                path: "/uploads/timesheet.pdf".to_string(),
            })
        } else {
            c
        }
    }

    #[test]
    fn test_rate_boundary() {
        assert!(ValidationEngine::validate(&claim(1, dec!(500.00), true)).is_valid());

        let outcome = ValidationEngine::validate(&claim(1, dec!(500.01), true));
        assert!(!outcome.is_valid());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("exceeds maximum allowed rate"));
    }

    #[test]
    fn test_hours_boundary() {
        assert!(ValidationEngine::validate(&claim(200, dec!(15), true)).is_valid());

        let outcome = ValidationEngine::validate(&claim(201, dec!(15), true));
        assert!(!outcome.is_valid());
        assert!(outcome.errors[0].contains("Hours worked (201)"));
    }

    #[test]
    fn test_total_boundary() {
        // 160 x 100.00 = 16000.00
        assert!(ValidationEngine::validate(&claim(160, dec!(100.00), true)).is_valid());

        // 100 x 160.0001 rounds to 16000.01
        let outcome = ValidationEngine::validate(&claim(100, dec!(160.0001), true));
        assert_eq!(claimed_total(100, dec!(160.0001)), dec!(16000.01));
        assert!(!outcome.is_valid());
        assert!(outcome.errors[0].starts_with("Total amount"));
    }

    fn claimed_total(hours: u32, rate: Decimal) -> Decimal {
        claim(hours, rate, true).total_amount().amount()
    }

    #[test]
    fn test_errors_accumulate() {
        let outcome = ValidationEngine::validate(&claim(201, dec!(600), true));
        assert_eq!(outcome.errors.len(), 3);
        assert!(outcome.errors[0].contains("rate"));
        assert!(outcome.errors[1].contains("Hours worked"));
        assert!(outcome.errors[2].contains("Total amount"));
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let c = claim(3, Decimal::MAX / dec!(2), true);
        let outcome = ValidationEngine::validate(&c);

        assert!(!outcome.is_valid());
        assert_eq!(outcome.errors.len(), 2);
        assert!(outcome.errors[0].contains("exceeds maximum allowed rate"));
        assert!(outcome.errors[1].contains("too large to compute"));
        assert!(!ValidationEngine::is_eligible_for_auto_approval(&c));
    }

    #[test]
    fn test_rate_compared_at_stored_precision() {
        // Money keeps four decimal places, so 500.00004 is held as 500.0000
        let c = claim(1, dec!(500.00004), true);
        assert_eq!(c.hourly_rate.amount(), dec!(500.0000));
        assert!(ValidationEngine::validate(&c).is_valid());

        assert!(!ValidationEngine::validate(&claim(1, dec!(500.0001), true)).is_valid());
    }

    #[test]
    fn test_undocumented_high_value_is_warning_only() {
        let outcome = ValidationEngine::validate(&claim(40, dec!(200), false));
        assert!(outcome.is_valid());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("without supporting document"));
    }

    #[test]
    fn test_documentation_threshold_is_exclusive() {
        let outcome = ValidationEngine::validate(&claim(50, dec!(100), false));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_notes_join_errors_then_warnings() {
        let mut outcome = ValidationOutcome::ok();
        outcome.add_warning("w1");
        outcome.add_error("e1");
        assert_eq!(outcome.notes(), "e1; w1");
    }

    #[test]
    fn test_auto_approval_all_conjuncts() {
        assert!(ValidationEngine::is_eligible_for_auto_approval(&claim(10, dec!(100), true)));
        assert!(ValidationEngine::is_eligible_for_auto_approval(&claim(20, dec!(150), true)));
        // rate above 150
        assert!(!ValidationEngine::is_eligible_for_auto_approval(&claim(20, dec!(150.01), true)));
        // hours above 20
        assert!(!ValidationEngine::is_eligible_for_auto_approval(&claim(21, dec!(100), true)));
        // no document
        assert!(!ValidationEngine::is_eligible_for_auto_approval(&claim(10, dec!(100), false)));
    }
}
