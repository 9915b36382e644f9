//! Two-stage approval state machine
//!
//! ```text
//!                  +--> AwaitingManager -----+
//! New --(route)--> +                         +--> Approved
//!                  +--> AwaitingCoordinator -+
//!                  |          (either)  ----------> Rejected
//!                  +--> Approved (auto) / Rejected (validation)
//! ```
//!
//! A claim leaves `New` exactly once, through the router's decision. After
//! that only the four role actions move it, and Approved/Rejected are final.

use chrono::{DateTime, Utc};

use crate::claim::{ApprovalState, ApproverRole, Claim, RejectedBy};
use crate::error::ClaimError;
use crate::routing::{WorkflowAction, WorkflowDecision, MANAGER_APPROVAL_LIMIT};
use crate::validation::ValidationOutcome;

/// Pure transition rules over [`ApprovalState`]
pub struct ApprovalStateMachine;

impl ApprovalStateMachine {
    /// Leaves `New` according to the router's decision
    pub fn route(
        state: ApprovalState,
        action: WorkflowAction,
        within_manager_limit: bool,
    ) -> Result<ApprovalState, ClaimError> {
        if state != ApprovalState::New {
            return Err(invalid(state, &action.to_string()));
        }

        let next = match action {
            WorkflowAction::AutoApprove => ApprovalState::Approved { automatic: true },
            WorkflowAction::Reject => ApprovalState::Rejected { by: RejectedBy::Validation },
            WorkflowAction::RouteToManager => {
                ApprovalState::AwaitingManager { coordinator_approved: false }
            }
            WorkflowAction::RouteToCoordinator => {
                ApprovalState::AwaitingCoordinator { manager_approved: false }
            }
            WorkflowAction::RequireManualReview if within_manager_limit => {
                ApprovalState::AwaitingManager { coordinator_approved: false }
            }
            WorkflowAction::RequireManualReview => {
                ApprovalState::AwaitingCoordinator { manager_approved: false }
            }
        };
        Ok(next)
    }

    /// Records one role's approval; the second approval completes the claim
    pub fn approve(state: ApprovalState, role: ApproverRole) -> Result<ApprovalState, ClaimError> {
        use ApprovalState::*;

        let next = match (state, role) {
            (AwaitingManager { coordinator_approved: true }, ApproverRole::Manager)
            | (AwaitingCoordinator { manager_approved: true }, ApproverRole::Coordinator) => {
                Approved { automatic: false }
            }
            (AwaitingManager { coordinator_approved: false }, ApproverRole::Manager) => {
                AwaitingCoordinator { manager_approved: true }
            }
            (AwaitingCoordinator { manager_approved: false }, ApproverRole::Coordinator) => {
                AwaitingManager { coordinator_approved: true }
            }
            (AwaitingManager { .. }, ApproverRole::Coordinator) => {
                AwaitingManager { coordinator_approved: true }
            }
            (AwaitingCoordinator { .. }, ApproverRole::Manager) => {
                AwaitingCoordinator { manager_approved: true }
            }
            (New | Approved { .. } | Rejected { .. }, _) => {
                return Err(invalid(state, &format!("{} approval", role)));
            }
        };
        Ok(next)
    }

    /// Rejects a pending claim, discarding any partial approval
    pub fn reject(state: ApprovalState, role: ApproverRole) -> Result<ApprovalState, ClaimError> {
        match state {
            ApprovalState::AwaitingManager { .. } | ApprovalState::AwaitingCoordinator { .. } => {
                let by = match role {
                    ApproverRole::Manager => RejectedBy::Manager,
                    ApproverRole::Coordinator => RejectedBy::Coordinator,
                };
                Ok(ApprovalState::Rejected { by })
            }
            _ => Err(invalid(state, "Rejected")),
        }
    }
}

fn invalid(from: ApprovalState, to: &str) -> ClaimError {
    ClaimError::InvalidStatusTransition {
        from: from.workflow_label().to_string(),
        to: to.to_string(),
    }
}

/// What has to happen next for a claim to progress
pub fn next_approval_step(claim: &Claim) -> &'static str {
    if claim.status() == crate::claim::ClaimStatus::Rejected {
        return "Rejected";
    }
    match (claim.manager_approved(), claim.coordinator_approved()) {
        (true, true) => "Approved",
        (true, false) => "Awaiting Coordinator Approval",
        (false, true) => "Awaiting Manager Approval",
        (false, false) if claim.total_amount().amount() <= MANAGER_APPROVAL_LIMIT => {
            "Awaiting Manager Approval"
        }
        (false, false) => "Awaiting Coordinator Approval",
    }
}

impl Claim {
    /// Stores the automated validation result on the claim
    pub fn record_validation(&mut self, outcome: &ValidationOutcome) {
        self.auto_validated = true;
        let notes = outcome.notes();
        self.validation_notes = if notes.is_empty() { None } else { Some(notes) };
    }

    /// Applies the router's decision to a `New` claim
    pub fn apply_decision(&mut self, decision: &WorkflowDecision) -> Result<(), ClaimError> {
        let within_limit = self.total_amount().amount() <= MANAGER_APPROVAL_LIMIT;
        self.state = ApprovalStateMachine::route(self.state, decision.action, within_limit)?;
        Ok(())
    }

    pub fn manager_approve(&mut self, now: DateTime<Utc>) -> Result<(), ClaimError> {
        self.approve(ApproverRole::Manager, now)
    }

    pub fn coordinator_approve(&mut self, now: DateTime<Utc>) -> Result<(), ClaimError> {
        self.approve(ApproverRole::Coordinator, now)
    }

    pub fn manager_reject(&mut self, now: DateTime<Utc>) -> Result<(), ClaimError> {
        self.reject(ApproverRole::Manager, now)
    }

    pub fn coordinator_reject(&mut self, now: DateTime<Utc>) -> Result<(), ClaimError> {
        self.reject(ApproverRole::Coordinator, now)
    }

    pub fn approve(&mut self, role: ApproverRole, now: DateTime<Utc>) -> Result<(), ClaimError> {
        self.state = ApprovalStateMachine::approve(self.state, role)?;
        self.last_updated_at = Some(now);
        Ok(())
    }

    pub fn reject(&mut self, role: ApproverRole, now: DateTime<Utc>) -> Result<(), ClaimError> {
        self.state = ApprovalStateMachine::reject(self.state, role)?;
        self.last_updated_at = Some(now);
        Ok(())
    }
}
