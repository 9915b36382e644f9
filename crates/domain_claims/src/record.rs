//! Flat storage form of a claim
//!
//! Storage adapters hold the status, both approval flags and the workflow
//! label as separate columns. Converting back into a [`Claim`] rebuilds the
//! single [`ApprovalState`] and refuses combinations the state machine can
//! never produce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, LecturerId, Money};

use crate::claim::{ApprovalState, Claim, RejectedBy, SupportingDocument};
use crate::error::ClaimError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: ClaimId,
    pub lecturer_name: String,
    pub lecturer_id: Option<LecturerId>,
    pub contract_name: String,
    pub hours_worked: u32,
    pub hourly_rate: Money,
    pub status: String,
    pub manager_approved: bool,
    pub coordinator_approved: bool,
    pub workflow_status: String,
    #[serde(default)]
    pub rejected_by: Option<RejectedBy>,
    pub supporting_document_name: Option<String>,
    pub supporting_document_path: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub auto_validated: bool,
    pub validation_notes: Option<String>,
}

impl From<&Claim> for ClaimRecord {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id,
            lecturer_name: claim.lecturer_name.clone(),
            lecturer_id: claim.lecturer_id,
            contract_name: claim.contract_name.clone(),
            hours_worked: claim.hours_worked,
            hourly_rate: claim.hourly_rate,
            status: claim.status().as_str().to_string(),
            manager_approved: claim.manager_approved(),
            coordinator_approved: claim.coordinator_approved(),
            workflow_status: claim.workflow_status().to_string(),
            rejected_by: match claim.state() {
                ApprovalState::Rejected { by } => Some(by),
                _ => None,
            },
            supporting_document_name: claim.supporting_document.as_ref().map(|d| d.name.clone()),
            supporting_document_path: claim.supporting_document.as_ref().map(|d| d.path.clone()),
            submitted_at: claim.submitted_at,
            last_updated_at: claim.last_updated_at,
            auto_validated: claim.auto_validated,
            validation_notes: claim.validation_notes.clone(),
        }
    }
}

impl TryFrom<ClaimRecord> for Claim {
    type Error = ClaimError;

    fn try_from(record: ClaimRecord) -> Result<Self, Self::Error> {
        let state = record.approval_state()?;
        let supporting_document = match (
            record.supporting_document_name,
            record.supporting_document_path,
        ) {
            (Some(name), Some(path)) => Some(SupportingDocument { name, path }),
            (None, None) => None,
            _ => {
                return Err(ClaimError::InvariantViolation(format!(
                    "claim {} has a document name without a path or a path without a name",
                    record.id
                )))
            }
        };

        Ok(Claim {
            id: record.id,
            lecturer_name: record.lecturer_name,
            lecturer_id: record.lecturer_id,
            contract_name: record.contract_name,
            hours_worked: record.hours_worked,
            hourly_rate: record.hourly_rate,
            supporting_document,
            state,
            submitted_at: record.submitted_at,
            last_updated_at: record.last_updated_at,
            auto_validated: record.auto_validated,
            validation_notes: record.validation_notes,
        })
    }
}

impl ClaimRecord {
    fn approval_state(&self) -> Result<ApprovalState, ClaimError> {
        let violation = |detail: &str| {
            ClaimError::InvariantViolation(format!(
                "claim {} is {} with manager_approved={} coordinator_approved={}: {}",
                self.id, self.status, self.manager_approved, self.coordinator_approved, detail
            ))
        };

        match (self.status.as_str(), self.manager_approved, self.coordinator_approved) {
            ("Approved", true, true) => Ok(ApprovalState::Approved {
                automatic: self.workflow_status == "Auto-Approved",
            }),
            ("Approved", _, _) => Err(violation("approved claims carry both approvals")),
            ("Rejected", false, false) => match self.rejected_by {
                Some(by) => Ok(ApprovalState::Rejected { by }),
                None => Err(violation("rejected claims record who rejected them")),
            },
            ("Rejected", _, _) => Err(violation("rejected claims carry no approvals")),
            ("Pending", true, true) => {
                Err(violation("pending claims cannot carry both approvals"))
            }
            ("Pending", true, false) => {
                Ok(ApprovalState::AwaitingCoordinator { manager_approved: true })
            }
            ("Pending", false, true) => {
                Ok(ApprovalState::AwaitingManager { coordinator_approved: true })
            }
            ("Pending", false, false) => match self.workflow_status.as_str() {
                "New" => Ok(ApprovalState::New),
                "Awaiting Manager Review" => {
                    Ok(ApprovalState::AwaitingManager { coordinator_approved: false })
                }
                "Awaiting Coordinator Review" => {
                    Ok(ApprovalState::AwaitingCoordinator { manager_approved: false })
                }
                other => Err(violation(&format!(
                    "'{}' is not a label for an unapproved pending claim",
                    other
                ))),
            },
            (other, _, _) => Err(ClaimError::InvariantViolation(format!(
                "claim {} has unknown status '{}'",
                self.id, other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{WorkflowAction, WorkflowDecision};
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn routed(action: WorkflowAction) -> Claim {
        let mut claim = Claim::new(
            ClaimId::new_v7(),
            "Jane Lecturer",
            "PROG6212",
            40,
            Money::new(dec!(200), Currency::ZAR),
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
    fn test_record_keeps_projections() {
        let mut claim = routed(WorkflowAction::RouteToCoordinator);
        claim.manager_approve(Utc::now()).unwrap();

        let record = ClaimRecord::from(&claim);
        assert_eq!(record.status, "Pending");
        assert!(record.manager_approved);
        assert!(!record.coordinator_approved);
        assert_eq!(record.workflow_status, "Awaiting Coordinator Approval");

        let back = Claim::try_from(record).unwrap();
        assert_eq!(back.state(), claim.state());
    }

    #[test]
    fn test_review_states_survive_storage() {
        for action in [
            WorkflowAction::RouteToManager,
            WorkflowAction::RouteToCoordinator,
            WorkflowAction::AutoApprove,
        ] {
            let claim = routed(action);
            let back = Claim::try_from(ClaimRecord::from(&claim)).unwrap();
            assert_eq!(back.workflow_status(), claim.workflow_status());
        }
    }

    #[test]
    fn test_approved_without_both_flags_is_violation() {
        let mut record = ClaimRecord::from(&routed(WorkflowAction::AutoApprove));
        record.coordinator_approved = false;
        assert!(matches!(
            Claim::try_from(record),
            Err(ClaimError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_rejected_with_approval_is_violation() {
        let mut record = ClaimRecord::from(&routed(WorkflowAction::Reject));
        record.manager_approved = true;
        assert!(Claim::try_from(record).is_err());
    }

    #[test]
    fn test_rejection_source_survives_storage() {
        let mut claim = routed(WorkflowAction::RouteToManager);
        claim.coordinator_reject(Utc::now()).unwrap();
        let record = ClaimRecord::from(&claim);
        assert_eq!(record.rejected_by, Some(RejectedBy::Coordinator));

        let back = Claim::try_from(record.clone()).unwrap();
        assert_eq!(back.state(), ApprovalState::Rejected { by: RejectedBy::Coordinator });

        let mut anonymous = record;
        anonymous.rejected_by = None;
        assert!(Claim::try_from(anonymous).is_err());
    }

    #[test]
    fn test_pending_with_both_flags_is_violation() {
        let mut record = ClaimRecord::from(&routed(WorkflowAction::RouteToManager));
        record.manager_approved = true;
        record.coordinator_approved = true;
        assert!(Claim::try_from(record).is_err());
    }

    #[test]
    fn test_unknown_pending_label_is_violation() {
        let mut record = ClaimRecord::from(&routed(WorkflowAction::RouteToCoordinator));
        record.workflow_status = "Awaiting Someone".to_string();
        assert!(matches!(
            Claim::try_from(record.clone()),
            Err(ClaimError::InvariantViolation(_))
        ));

        record.workflow_status = "Fully Approved".to_string();
        assert!(Claim::try_from(record).is_err());
    }

    #[test]
    fn test_unknown_status_is_violation() {
        let mut record = ClaimRecord::from(&routed(WorkflowAction::RouteToManager));
        record.status = "Paid".to_string();
        assert!(Claim::try_from(record).is_err());
    }
}
