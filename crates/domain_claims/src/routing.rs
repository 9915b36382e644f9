//! Approval routing
//!
//! Decides, once per claim at submission, what happens next. Rules are tried
//! in priority order and the first match wins:
//!
//! 1. failed validation      -> `Reject`
//! 2. auto-approval eligible -> `AutoApprove`
//! 3. total <= R5000.00      -> `RouteToManager`
//! 4. otherwise              -> `RouteToCoordinator`

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::claim::Claim;
use crate::validation::{ValidationEngine, ValidationOutcome};

/// Claims up to and including this total go to the manager first
pub const MANAGER_APPROVAL_LIMIT: Decimal = dec!(5000.00);

/// Routing outcome for a new claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowAction {
    AutoApprove,
    RouteToManager,
    RouteToCoordinator,
    Reject,
    /// Never produced by [`ApprovalRouter::decide`]; kept for callers that
    /// escalate a claim by hand
    RequireManualReview,
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowAction::AutoApprove => "AutoApprove",
            WorkflowAction::RouteToManager => "RouteToManager",
            WorkflowAction::RouteToCoordinator => "RouteToCoordinator",
            WorkflowAction::Reject => "Reject",
            WorkflowAction::RequireManualReview => "RequireManualReview",
        };
        f.write_str(name)
    }
}

/// The router's decision plus the context that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDecision {
    pub action: WorkflowAction,
    pub message: String,
    /// Validation errors behind a rejection
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl WorkflowDecision {
    fn new(action: WorkflowAction, message: &str) -> Self {
        Self {
            action,
            message: message.to_string(),
            reasons: Vec::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Picks the initial workflow action for a validated claim
pub struct ApprovalRouter;

impl ApprovalRouter {
    pub fn decide(claim: &Claim, outcome: &ValidationOutcome) -> WorkflowDecision {
        if !outcome.is_valid() {
            let mut decision = WorkflowDecision::new(
                WorkflowAction::Reject,
                "Claim failed automated validation checks.",
            );
            decision.reasons.extend(outcome.errors.iter().cloned());
            return decision;
        }

        if ValidationEngine::is_eligible_for_auto_approval(claim) {
            return WorkflowDecision::new(
                WorkflowAction::AutoApprove,
                "Claim eligible for auto-approval based on predefined criteria.",
            );
        }

        let mut decision = if claim.total_amount().amount() <= MANAGER_APPROVAL_LIMIT {
            WorkflowDecision::new(
                WorkflowAction::RouteToManager,
                "Claim requires manager approval.",
            )
        } else {
            WorkflowDecision::new(
                WorkflowAction::RouteToCoordinator,
                "High-value claim requires coordinator approval.",
            )
        };

        decision.warnings.extend(outcome.warnings.iter().cloned());
        decision.recommendations.extend(outcome.recommendations.iter().cloned());
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::{ClaimId, Currency, Money};

    fn claim(hours: u32, rate: Decimal) -> Claim {
        Claim::new(
            ClaimId::new_v7(),
            "Jane Lecturer",
            "PROG6212",
            hours,
            Money::new(rate, Currency::ZAR),
            Utc::now(),
        )
    }

    #[test]
    fn test_invalid_outcome_rejects_with_reasons() {
        let c = claim(1, dec!(100));
        let mut outcome = ValidationOutcome::ok();
        outcome.add_error("bad rate");
        outcome.add_warning("ignored");

        let decision = ApprovalRouter::decide(&c, &outcome);
        assert_eq!(decision.action, WorkflowAction::Reject);
        assert_eq!(decision.reasons, vec!["bad rate".to_string()]);
        assert!(decision.warnings.is_empty());
    }

    #[test]
    fn test_overflowing_claim_is_rejected() {
        let c = claim(3, Decimal::MAX / dec!(2));
        let outcome = ValidationEngine::validate(&c);

        let decision = ApprovalRouter::decide(&c, &outcome);
        assert_eq!(decision.action, WorkflowAction::Reject);
        assert_eq!(decision.reasons, outcome.errors);
    }

    #[test]
    fn test_manager_boundary_is_inclusive() {
        let at_limit = claim(50, dec!(100.00));
        let decision = ApprovalRouter::decide(&at_limit, &ValidationEngine::validate(&at_limit));
        assert_eq!(decision.action, WorkflowAction::RouteToManager);

        // 100 x 50.0001 = 5000.01
        let above = claim(100, dec!(50.0001));
        let decision = ApprovalRouter::decide(&above, &ValidationEngine::validate(&above));
        assert_eq!(decision.action, WorkflowAction::RouteToCoordinator);
    }

    #[test]
    fn test_routed_decisions_carry_warnings() {
        // R8000 with no document warns
        let c = claim(40, dec!(200));
        let mut outcome = ValidationEngine::validate(&c);
        outcome.add_recommendation("Request the signed timesheet.");
        let decision = ApprovalRouter::decide(&c, &outcome);

        assert_eq!(decision.action, WorkflowAction::RouteToCoordinator);
        assert_eq!(decision.warnings, outcome.warnings);
        assert_eq!(decision.recommendations, vec!["Request the signed timesheet.".to_string()]);
        assert!(decision.reasons.is_empty());
    }

    #[test]
    fn test_action_display() {
        assert_eq!(WorkflowAction::RouteToCoordinator.to_string(), "RouteToCoordinator");
    }
}
