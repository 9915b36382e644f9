//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_claims::{next_approval_step, Claim, ClaimStatus, ValidationOutcome};
use rust_decimal::Decimal;

/// Asserts that a Money value has the expected amount
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money amounts differ: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts the claim's externally visible status and workflow label
pub fn assert_claim_state(claim: &Claim, status: ClaimStatus, workflow_status: &str) {
    assert_eq!(
        claim.status(),
        status,
        "claim {} has status {}, expected {}",
        claim.id,
        claim.status(),
        status
    );
    assert_eq!(
        claim.workflow_status(),
        workflow_status,
        "claim {} has workflow status '{}'",
        claim.id,
        claim.workflow_status()
    );
}

/// Asserts the status/flag consistency every reachable claim satisfies
///
/// - Approved claims carry both approvals
/// - Rejected claims carry neither
/// - Pending claims never carry both
/// - Partially approved claims show the next step as their label
pub fn assert_claim_consistent(claim: &Claim) {
    let both = claim.manager_approved() && claim.coordinator_approved();
    match claim.status() {
        ClaimStatus::Approved => assert!(both, "approved claim {} lacks an approval", claim.id),
        ClaimStatus::Rejected => assert!(
            !claim.manager_approved() && !claim.coordinator_approved(),
            "rejected claim {} still carries an approval",
            claim.id
        ),
        ClaimStatus::Pending => {
            assert!(!both, "pending claim {} carries both approvals", claim.id);
            if claim.manager_approved() || claim.coordinator_approved() {
                assert_eq!(claim.workflow_status(), next_approval_step(claim));
            }
        }
    }
}

/// Asserts an outcome failed with an error containing `fragment`
pub fn assert_validation_error(outcome: &ValidationOutcome, fragment: &str) {
    assert!(!outcome.is_valid(), "expected validation to fail");
    assert!(
        outcome.errors.iter().any(|e| e.contains(fragment)),
        "no error containing '{}' in {:?}",
        fragment,
        outcome.errors
    );
}
