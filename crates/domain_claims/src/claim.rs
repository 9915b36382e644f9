//! Claim aggregate
//!
//! A claim's approval progress is held in a single [`ApprovalState`]. The
//! externally visible status, the two approval flags and the workflow label
//! are all projections of that state, so they can never disagree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, LecturerId, Money, MoneyError};

/// Externally visible lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two human approval roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApproverRole {
    Manager,
    Coordinator,
}

impl fmt::Display for ApproverRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApproverRole::Manager => f.write_str("Manager"),
            ApproverRole::Coordinator => f.write_str("Coordinator"),
        }
    }
}

/// Who rejected a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectedBy {
    /// Failed automated validation at submission
    Validation,
    Manager,
    Coordinator,
}

/// Canonical approval state of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ApprovalState {
    /// Created but not yet routed
    New,
    /// Waiting on the manager; the coordinator may already have signed off
    AwaitingManager { coordinator_approved: bool },
    /// Waiting on the coordinator; the manager may already have signed off
    AwaitingCoordinator { manager_approved: bool },
    /// Both roles approved, or the claim was auto-approved
    Approved { automatic: bool },
    Rejected { by: RejectedBy },
}

impl ApprovalState {
    pub fn status(&self) -> ClaimStatus {
        match self {
            ApprovalState::New
            | ApprovalState::AwaitingManager { .. }
            | ApprovalState::AwaitingCoordinator { .. } => ClaimStatus::Pending,
            ApprovalState::Approved { .. } => ClaimStatus::Approved,
            ApprovalState::Rejected { .. } => ClaimStatus::Rejected,
        }
    }

    pub fn manager_approved(&self) -> bool {
        match self {
            ApprovalState::AwaitingCoordinator { manager_approved } => *manager_approved,
            ApprovalState::Approved { .. } => true,
            _ => false,
        }
    }

    pub fn coordinator_approved(&self) -> bool {
        match self {
            ApprovalState::AwaitingManager { coordinator_approved } => *coordinator_approved,
            ApprovalState::Approved { .. } => true,
            _ => false,
        }
    }

    /// Descriptive label shown on dashboards
    pub fn workflow_label(&self) -> &'static str {
        match self {
            ApprovalState::New => "New",
            ApprovalState::AwaitingManager {
                coordinator_approved: false,
            } => "Awaiting Manager Review",
            ApprovalState::AwaitingManager {
                coordinator_approved: true,
            } => "Awaiting Manager Approval",
            ApprovalState::AwaitingCoordinator {
                manager_approved: false,
            } => "Awaiting Coordinator Review",
            ApprovalState::AwaitingCoordinator {
                manager_approved: true,
            } => "Awaiting Coordinator Approval",
            ApprovalState::Approved { automatic: true } => "Auto-Approved",
            ApprovalState::Approved { automatic: false } => "Fully Approved",
            ApprovalState::Rejected { .. } => "Rejected",
        }
    }

    /// Approved and Rejected admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApprovalState::Approved { .. } | ApprovalState::Rejected { .. })
    }
}

/// A supporting document already stored by the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportingDocument {
    /// Original file name as uploaded
    pub name: String,
    /// Path the document store saved it under
    pub path: String,
}

/// A lecturer's claim for hours worked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub lecturer_name: String,
    /// Directory entry matched at submission, if any
    pub lecturer_id: Option<LecturerId>,
    pub contract_name: String,
    pub hours_worked: u32,
    /// Held at [`Money`]'s four decimal places; rules compare the stored value
    pub hourly_rate: Money,
    pub supporting_document: Option<SupportingDocument>,
    pub(crate) state: ApprovalState,
    pub submitted_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
    /// Set once the automated pipeline has run
    pub auto_validated: bool,
    /// Validation errors then warnings, joined with "; "
    pub validation_notes: Option<String>,
}

impl Claim {
    /// Creates an unrouted claim in the `New` state
    pub fn new(
        id: ClaimId,
        lecturer_name: impl Into<String>,
        contract_name: impl Into<String>,
        hours_worked: u32,
        hourly_rate: Money,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            lecturer_name: lecturer_name.into(),
            lecturer_id: None,
            contract_name: contract_name.into(),
            hours_worked,
            hourly_rate,
            supporting_document: None,
            state: ApprovalState::New,
            submitted_at,
            last_updated_at: None,
            auto_validated: false,
            validation_notes: None,
        }
    }

    /// Attaches a stored supporting document
    pub fn with_document(mut self, document: SupportingDocument) -> Self {
        self.supporting_document = Some(document);
        self
    }

    /// Hours multiplied by rate, recomputed on every call
    ///
    /// Saturates at the `Decimal` bounds, so thresholds still compare above
    /// every limit. Use [`Claim::checked_total_amount`] to detect overflow.
    pub fn total_amount(&self) -> Money {
        self.hourly_rate * Decimal::from(self.hours_worked)
    }

    pub fn checked_total_amount(&self) -> Result<Money, MoneyError> {
        self.hourly_rate.checked_multiply(Decimal::from(self.hours_worked))
    }

    pub fn has_supporting_document(&self) -> bool {
        self.supporting_document
            .as_ref()
            .is_some_and(|d| !d.path.is_empty())
    }

    pub fn state(&self) -> ApprovalState {
        self.state
    }

    pub fn status(&self) -> ClaimStatus {
        self.state.status()
    }

    pub fn manager_approved(&self) -> bool {
        self.state.manager_approved()
    }

    pub fn coordinator_approved(&self) -> bool {
        self.state.coordinator_approved()
    }

    pub fn workflow_status(&self) -> &'static str {
        self.state.workflow_label()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

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
    fn test_new_claim_defaults() {
        let c = claim(10, dec!(100));
        assert_eq!(c.status(), ClaimStatus::Pending);
        assert_eq!(c.workflow_status(), "New");
        assert!(!c.manager_approved());
        assert!(!c.coordinator_approved());
        assert!(!c.has_supporting_document());
        assert!(!c.auto_validated);
    }

    #[test]
    fn test_total_tracks_hours_and_rate() {
        let mut c = claim(5, dec!(1000));
        assert_eq!(c.total_amount().amount(), dec!(5000));

        c.hours_worked = 10;
        assert_eq!(c.total_amount().amount(), dec!(10000));

        c.hourly_rate = Money::new(dec!(1200), Currency::ZAR);
        assert_eq!(c.total_amount().amount(), dec!(12000));
    }

    #[test]
    fn test_total_overflow_saturates() {
        let c = claim(3, Decimal::MAX / dec!(2));

        assert!(matches!(c.checked_total_amount(), Err(MoneyError::Overflow(_))));
        assert_eq!(c.total_amount().amount(), Decimal::MAX);
    }

    #[test]
    fn test_empty_document_path_is_not_a_document() {
        let c = claim(1, dec!(100)).with_document(SupportingDocument {
            name: "timesheet.pdf".to_string(),
            path: String::new(),
        });
        assert!(!c.has_supporting_document());
    }

    #[test]
    fn test_projections_per_state() {
        let cases = [
            (
                ApprovalState::AwaitingManager { coordinator_approved: true },
                ClaimStatus::Pending,
                false,
                true,
            ),
            (
                ApprovalState::AwaitingCoordinator { manager_approved: true },
                ClaimStatus::Pending,
                true,
                false,
            ),
            (
                ApprovalState::Approved { automatic: true },
                ClaimStatus::Approved,
                true,
                true,
            ),
            (
                ApprovalState::Rejected { by: RejectedBy::Manager },
                ClaimStatus::Rejected,
                false,
                false,
            ),
        ];

        for (state, status, manager, coordinator) in cases {
            assert_eq!(state.status(), status);
            assert_eq!(state.manager_approved(), manager);
            assert_eq!(state.coordinator_approved(), coordinator);
        }
    }
}
