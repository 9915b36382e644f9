//! Claims pipeline service
//!
//! Orchestrates intake, validation, routing and the approval transitions over
//! the injected repository, lecturer directory and clock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use core_kernel::{ClaimId, Clock, Currency, DateRange, Money, Timezone};

use crate::attention::AttentionFilter;
use crate::claim::{ApproverRole, Claim, ClaimStatus};
use crate::error::ClaimError;
use crate::ports::{ClaimRepository, LecturerDirectory};
use crate::reporting::{ClaimReporter, ReportResult};
use crate::routing::{ApprovalRouter, WorkflowDecision};
use crate::submission::ClaimSubmission;
use crate::validation::{ValidationEngine, ValidationOutcome};
use crate::workflow;

const RECENT_CLAIMS: usize = 10;

/// What the pipeline did with an accepted submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub claim: Claim,
    pub outcome: ValidationOutcome,
    pub decision: WorkflowDecision,
}

/// HR dashboard figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Active lecturers in the directory
    pub total_lecturers: usize,
    pub pending_claims: usize,
    pub approved_claims: usize,
    pub rejected_claims: usize,
    pub payments_this_month: Money,
    pub period: DateRange,
    /// Latest submissions first
    pub recent_claims: Vec<Claim>,
}

pub struct ClaimsService {
    claims: Arc<dyn ClaimRepository>,
    lecturers: Arc<dyn LecturerDirectory>,
    clock: Arc<dyn Clock>,
    currency: Currency,
    timezone: Timezone,
}

impl ClaimsService {
    pub fn new(
        claims: Arc<dyn ClaimRepository>,
        lecturers: Arc<dyn LecturerDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            claims,
            lecturers,
            clock,
            currency: Currency::default(),
            timezone: Timezone::default(),
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn reporter(&self) -> ClaimReporter {
        ClaimReporter::new(self.currency, self.timezone)
    }

    /// Runs a submission through intake, validation and routing, then stores it
    #[instrument(skip(self, submission), fields(lecturer = %submission.lecturer_name))]
    pub async fn submit(
        &self,
        submission: ClaimSubmission,
    ) -> Result<SubmissionReceipt, ClaimError> {
        if let Err(e) = submission.check(self.currency) {
            warn!(error = %e, "submission refused");
            return Err(e);
        }

        let now = self.clock.now();
        let lecturer = self.lecturers.find_active_by_name(&submission.lecturer_name).await?;
        let mut claim =
            submission.into_claim(ClaimId::new_v7(), self.currency, now, &self.timezone);
        claim.lecturer_id = lecturer.map(|l| l.id);

        let outcome = ValidationEngine::validate(&claim);
        debug!(
            claim_id = %claim.id,
            errors = ?outcome.errors,
            warnings = ?outcome.warnings,
            "claim validated"
        );

        let decision = ApprovalRouter::decide(&claim, &outcome);
        claim.apply_decision(&decision)?;
        claim.record_validation(&outcome);

        info!(
            claim_id = %claim.id,
            action = %decision.action,
            total = %claim.total_amount(),
            workflow_status = claim.workflow_status(),
            "claim submitted"
        );

        self.claims.insert(claim.clone()).await?;
        Ok(SubmissionReceipt { claim, outcome, decision })
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    pub async fn manager_approve(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.transition(id, ApproverRole::Manager, true).await
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    pub async fn coordinator_approve(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.transition(id, ApproverRole::Coordinator, true).await
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    pub async fn manager_reject(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.transition(id, ApproverRole::Manager, false).await
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    pub async fn coordinator_reject(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.transition(id, ApproverRole::Coordinator, false).await
    }

    async fn transition(
        &self,
        id: ClaimId,
        role: ApproverRole,
        approve: bool,
    ) -> Result<Claim, ClaimError> {
        let now = self.clock.now();
        let result = self
            .claims
            .modify(
                id,
                Box::new(move |claim: &mut Claim| {
                    if approve {
                        claim.approve(role, now)
                    } else {
                        claim.reject(role, now)
                    }
                }),
            )
            .await;

        match result {
            Ok(Some(claim)) => {
                info!(
                    %role,
                    status = %claim.status(),
                    workflow_status = claim.workflow_status(),
                    "claim {}",
                    if approve { "approved" } else { "rejected" }
                );
                Ok(claim)
            }
            Ok(None) => {
                warn!(%role, "claim not found");
                Err(ClaimError::ClaimNotFound(id.to_string()))
            }
            Err(e) => {
                warn!(%role, error = %e, "transition refused");
                Err(e)
            }
        }
    }

    pub async fn find(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.claims
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClaimError::ClaimNotFound(id.to_string()))
    }

    pub async fn next_approval_step(&self, id: ClaimId) -> Result<&'static str, ClaimError> {
        let claim = self.find(id).await?;
        Ok(workflow::next_approval_step(&claim))
    }

    pub async fn list(&self) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.claims.list().await?)
    }

    pub async fn manager_queue(&self) -> Result<Vec<Claim>, ClaimError> {
        Ok(AttentionFilter::manager_queue(&self.list().await?))
    }

    pub async fn coordinator_queue(&self) -> Result<Vec<Claim>, ClaimError> {
        Ok(AttentionFilter::coordinator_queue(&self.list().await?))
    }

    #[instrument(skip(self))]
    pub async fn dashboard_summary(
        &self,
        now: DateTime<Utc>,
    ) -> Result<DashboardSummary, ClaimError> {
        let claims = self.list().await?;
        let period = DateRange::month_to_date(now, &self.timezone);
        let count = |status: ClaimStatus| claims.iter().filter(|c| c.status() == status).count();

        let mut recent = claims.clone();
        recent.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        recent.truncate(RECENT_CLAIMS);

        Ok(DashboardSummary {
            total_lecturers: self.lecturers.count_active().await?,
            pending_claims: count(ClaimStatus::Pending),
            approved_claims: count(ClaimStatus::Approved),
            rejected_claims: count(ClaimStatus::Rejected),
            payments_this_month: self.reporter().total_payments_for_period(&claims, period)?,
            period,
            recent_claims: recent,
        })
    }

    pub async fn payment_report(&self, range: DateRange) -> Result<ReportResult, ClaimError> {
        let claims = self.list().await?;
        self.reporter().payment_report(&claims, range, self.clock.now())
    }

    pub async fn claims_summary_report(
        &self,
        status: Option<ClaimStatus>,
    ) -> Result<ReportResult, ClaimError> {
        let claims = self.list().await?;
        self.reporter().claims_summary_report(&claims, status, self.clock.now())
    }
}
