//! Batch submission runner
//!
//! Reads a JSON document of lecturers and claim submissions, pushes every
//! submission through the pipeline and reports what happened to each.
//!
//! ```json
//! {
//!   "lecturers": [{ "first_name": "Thandi", "last_name": "Mokoena", "email": "t@example.ac.za" }],
//!   "submissions": [{ "lecturer_name": "Thandi Mokoena", "contract_name": "PROG6212",
//!                     "hours_worked": 10, "hourly_rate": "100.00" }]
//! }
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use core_kernel::{ClaimId, Money};
use domain_claims::{
    ClaimError, ClaimStatus, ClaimSubmission, ClaimsService, Lecturer, ReportResult, WorkflowAction,
};

use crate::error::AppError;

/// A directory entry as written in a batch file
#[derive(Debug, Clone, Deserialize)]
pub struct LecturerEntry {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "active")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

impl LecturerEntry {
    pub fn into_lecturer(self, created_at: DateTime<Utc>) -> Lecturer {
        let mut lecturer = Lecturer::new(self.first_name, self.last_name, self.email, created_at);
        lecturer.is_active = self.is_active;
        lecturer
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub lecturers: Vec<LecturerEntry>,
    pub submissions: Vec<ClaimSubmission>,
}

impl BatchFile {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AppError::BatchFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BatchOutcome {
    Accepted {
        claim_id: ClaimId,
        action: WorkflowAction,
        status: ClaimStatus,
        workflow_status: String,
        total_amount: Money,
        validation_notes: Option<String>,
    },
    /// Refused at intake; no claim was created
    Refused { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    pub lecturer_name: String,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub summary: ReportResult,
}

impl BatchReport {
    pub fn accepted(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, BatchOutcome::Accepted { .. }))
            .count()
    }
}

/// Submits each entry in order
///
/// Intake refusals are recorded per entry; any other failure aborts the run.
pub async fn run_batch(
    service: &ClaimsService,
    submissions: Vec<ClaimSubmission>,
) -> Result<BatchReport, AppError> {
    let mut entries = Vec::with_capacity(submissions.len());

    for (index, submission) in submissions.into_iter().enumerate() {
        let lecturer_name = submission.lecturer_name.clone();
        let outcome = match service.submit(submission).await {
            Ok(receipt) => BatchOutcome::Accepted {
                claim_id: receipt.claim.id,
                action: receipt.decision.action,
                status: receipt.claim.status(),
                workflow_status: receipt.claim.workflow_status().to_string(),
                total_amount: receipt.claim.total_amount(),
                validation_notes: receipt.claim.validation_notes.clone(),
            },
            Err(ClaimError::InvalidSubmission(reason)) => {
                warn!(index, %reason, "batch entry refused");
                BatchOutcome::Refused { reason }
            }
            Err(e) => return Err(e.into()),
        };
        entries.push(BatchEntry { index, lecturer_name, outcome });
    }

    let summary = service.claims_summary_report(None).await?;
    info!(
        entries = entries.len(),
        claims = summary.summary.total_claims,
        total = %summary.summary.total_amount,
        "batch complete"
    );
    Ok(BatchReport { entries, summary })
}
