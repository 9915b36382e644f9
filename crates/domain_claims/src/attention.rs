//! Reviewer work queues
//!
//! The two predicates are evaluated independently and are not complements:
//! a claim can appear in both queues or in neither.

use crate::claim::{Claim, ClaimStatus};
use crate::routing::MANAGER_APPROVAL_LIMIT;

pub struct AttentionFilter;

impl AttentionFilter {
    /// Unapproved, unrejected claims within the manager's limit
    pub fn needs_manager_attention(claim: &Claim) -> bool {
        !claim.manager_approved()
            && !claim.coordinator_approved()
            && claim.status() != ClaimStatus::Rejected
            && claim.total_amount().amount() <= MANAGER_APPROVAL_LIMIT
    }

    /// Manager-approved claims awaiting the coordinator, plus untouched
    /// high-value claims
    ///
    /// Status is not consulted, so a rejected high-value claim still matches.
    pub fn needs_coordinator_attention(claim: &Claim) -> bool {
        let manager = claim.manager_approved();
        let coordinator = claim.coordinator_approved();

        (!coordinator && manager)
            || (claim.total_amount().amount() > MANAGER_APPROVAL_LIMIT && !manager && !coordinator)
    }

    pub fn manager_queue(claims: &[Claim]) -> Vec<Claim> {
        claims
            .iter()
            .filter(|c| Self::needs_manager_attention(c))
            .cloned()
            .collect()
    }

    pub fn coordinator_queue(claims: &[Claim]) -> Vec<Claim> {
        claims
            .iter()
            .filter(|c| Self::needs_coordinator_attention(c))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{WorkflowAction, WorkflowDecision};
    use chrono::Utc;
    use core_kernel::{ClaimId, Currency, Money};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn routed(hours: u32, rate: Decimal, action: WorkflowAction) -> Claim {
        let mut claim = Claim::new(
            ClaimId::new_v7(),
            "Jane Lecturer",
            "PROG6212",
            hours,
            Money::new(rate, Currency::ZAR),
            Utc::now(),
        );
        claim
            .apply_decision(&WorkflowDecision {
                action,
                message: String::new(),
                reasons: vec![],
                warnings: vec![],
                recommendations: vec![],
            })
            .unwrap();
        claim
    }

    #[test]
    fn test_low_value_pending_needs_manager_only() {
        let claim = routed(40, dec!(100), WorkflowAction::RouteToManager);
        assert!(AttentionFilter::needs_manager_attention(&claim));
        assert!(!AttentionFilter::needs_coordinator_attention(&claim));
    }

    #[test]
    fn test_manager_approved_moves_to_coordinator() {
        let mut claim = routed(40, dec!(100), WorkflowAction::RouteToManager);
        claim.manager_approve(Utc::now()).unwrap();
        assert!(!AttentionFilter::needs_manager_attention(&claim));
        assert!(AttentionFilter::needs_coordinator_attention(&claim));
    }

    #[test]
    fn test_rejected_high_value_still_matches_coordinator() {
        let claim = routed(100, dec!(600), WorkflowAction::Reject);
        assert!(!AttentionFilter::needs_manager_attention(&claim));
        assert!(AttentionFilter::needs_coordinator_attention(&claim));
    }

    #[test]
    fn test_approved_claim_in_neither_queue() {
        let claim = routed(10, dec!(100), WorkflowAction::AutoApprove);
        assert!(!AttentionFilter::needs_manager_attention(&claim));
        assert!(!AttentionFilter::needs_coordinator_attention(&claim));
    }

    #[test]
    fn test_queues_preserve_input_order() {
        let a = routed(10, dec!(100), WorkflowAction::RouteToManager);
        let b = routed(40, dec!(200), WorkflowAction::RouteToCoordinator);
        let c = routed(20, dec!(100), WorkflowAction::RouteToManager);
        let claims = vec![a.clone(), b.clone(), c.clone()];

        let manager: Vec<_> = AttentionFilter::manager_queue(&claims)
            .into_iter()
            .map(|x| x.id)
            .collect();
        assert_eq!(manager, vec![a.id, c.id]);

        let coordinator: Vec<_> = AttentionFilter::coordinator_queue(&claims)
            .into_iter()
            .map(|x| x.id)
            .collect();
        assert_eq!(coordinator, vec![b.id]);
    }
}
