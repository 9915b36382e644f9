//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{DateTime, Utc};
use core_kernel::{ClaimId, Currency, Money};
use domain_claims::{
    ApprovalRouter, Claim, ClaimSubmission, DocumentUpload, SupportingDocument, ValidationEngine,
};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::TemporalFixtures;

/// A plausible lecturer name
pub fn fake_lecturer_name() -> String {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    format!("{} {}", first, last)
}

/// Builder for claims that bypass intake
pub struct ClaimBuilder {
    id: ClaimId,
    lecturer_name: String,
    hours_worked: u32,
    hourly_rate: Decimal,
    document: Option<SupportingDocument>,
    submitted_at: DateTime<Utc>,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a new builder for a 10 hour, R100.00 claim without a document
    pub fn new() -> Self {
        Self {
            id: ClaimId::new_v7(),
            lecturer_name: fake_lecturer_name(),
            hours_worked: 10,
            hourly_rate: dec!(100.00),
            document: None,
            submitted_at: TemporalFixtures::submission_time(),
        }
    }

    pub fn with_lecturer(mut self, name: impl Into<String>) -> Self {
        self.lecturer_name = name.into();
        self
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours_worked = hours;
        self
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Attaches a stored timesheet
    pub fn with_document(mut self) -> Self {
        self.document = Some(SupportingDocument {
            name: "timesheet.pdf".to_string(),
            path: "/uploads/timesheet_20240515100000.pdf".to_string(),
        });
        self
    }

    /// Builds an unrouted claim in the `New` state
    pub fn build(self) -> Claim {
        let claim = Claim::new(
            self.id,
            self.lecturer_name,
            "PROG6212",
            self.hours_worked,
            Money::new(self.hourly_rate, Currency::ZAR),
            self.submitted_at,
        );
        match self.document {
            Some(document) => claim.with_document(document),
            None => claim,
        }
    }

    /// Builds the claim and runs it through validation and routing
    pub fn build_routed(self) -> Claim {
        let mut claim = self.build();
        let outcome = ValidationEngine::validate(&claim);
        let decision = ApprovalRouter::decide(&claim, &outcome);
        claim
            .apply_decision(&decision)
            .expect("new claims always accept a routing decision");
        claim.record_validation(&outcome);
        claim
    }
}

/// Builder for intake submissions
pub struct ClaimSubmissionBuilder {
    submission: ClaimSubmission,
}

impl Default for ClaimSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimSubmissionBuilder {
    /// Creates a new builder for a valid 10 hour, R100.00 submission
    pub fn new() -> Self {
        Self {
            submission: ClaimSubmission {
                lecturer_name: fake_lecturer_name(),
                contract_name: "PROG6212".to_string(),
                hours_worked: 10,
                hourly_rate: dec!(100.00),
                supporting_document: None,
            },
        }
    }

    pub fn with_lecturer(mut self, name: impl Into<String>) -> Self {
        self.submission.lecturer_name = name.into();
        self
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.submission.hours_worked = hours;
        self
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.submission.hourly_rate = rate;
        self
    }

    /// Attaches a small PDF timesheet
    pub fn with_document(self) -> Self {
        self.with_upload("timesheet.pdf", 48_000)
    }

    pub fn with_upload(mut self, file_name: impl Into<String>, size_bytes: u64) -> Self {
        self.submission.supporting_document = Some(DocumentUpload {
            file_name: file_name.into(),
            size_bytes,
        });
        self
    }

    pub fn build(self) -> ClaimSubmission {
        self.submission
    }
}
