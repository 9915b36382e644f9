//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating claims and their inputs.

use domain_claims::Claim;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::ClaimBuilder;

/// Hourly rates in cents from R0.01 to R1000.00
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Rates the submission intake accepts (R15.00 to R500.00)
pub fn accepted_rate_strategy() -> impl Strategy<Value = Decimal> {
    (1_500i64..=50_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Hours on either side of the per-claim cap
pub fn hours_strategy() -> impl Strategy<Value = u32> {
    1u32..=300u32
}

/// Hours the submission intake accepts
pub fn accepted_hours_strategy() -> impl Strategy<Value = u32> {
    1u32..=200u32
}

/// Unrouted claims with arbitrary hours, rate and document presence
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (hours_strategy(), rate_strategy(), any::<bool>()).prop_map(|(hours, rate, documented)| {
        let builder = ClaimBuilder::new()
            .with_lecturer("Property Lecturer")
            .with_hours(hours)
            .with_rate(rate);
        if documented {
            builder.with_document().build()
        } else {
            builder.build()
        }
    })
}

/// Claims already taken through validation and routing
pub fn routed_claim_strategy() -> impl Strategy<Value = Claim> {
    (accepted_hours_strategy(), accepted_rate_strategy(), any::<bool>()).prop_map(
        |(hours, rate, documented)| {
            let builder = ClaimBuilder::new()
                .with_lecturer("Property Lecturer")
                .with_hours(hours)
                .with_rate(rate);
            if documented {
                builder.with_document().build_routed()
            } else {
                builder.build_routed()
            }
        },
    )
}
