//! Claim intake
//!
//! A [`ClaimSubmission`] is what a lecturer sends in. Intake checks run before
//! any claim exists; a submission that fails them is refused outright rather
//! than stored as a rejected claim.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::{Validate, ValidationErrors};

use core_kernel::{ClaimId, Currency, Money, Timezone};

use crate::claim::{Claim, SupportingDocument};
use crate::error::ClaimError;

pub const MIN_SUBMITTED_RATE: Decimal = dec!(15.00);
pub const MAX_SUBMITTED_RATE: Decimal = dec!(500.00);
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;
pub const ALLOWED_DOCUMENT_TYPES: [&str; 5] = [".pdf", ".docx", ".xlsx", ".jpg", ".png"];

const NAMES_REQUIRED: &str = "Lecturer name and contract name are required.";

/// Metadata of an uploaded file; the bytes are handled by the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub file_name: String,
    pub size_bytes: u64,
}

impl DocumentUpload {
    /// Lower-cased extension including the dot, or empty
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default()
    }

    /// Path the document store saves the file under
    ///
    /// `/uploads/{stem}_{yyyyMMddHHmmss}{ext}` with the local upload time.
    pub fn stored_path(&self, uploaded_at: DateTime<Utc>, tz: &Timezone) -> String {
        let path = Path::new(&self.file_name);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let stamp = uploaded_at.with_timezone(&tz.0).format("%Y%m%d%H%M%S");
        format!("/uploads/{}_{}{}", stem, stamp, ext)
    }

    fn check(&self) -> Result<(), String> {
        if self.size_bytes > MAX_DOCUMENT_BYTES {
            return Err(format!(
                "File size exceeds {} MB limit.",
                MAX_DOCUMENT_BYTES / (1024 * 1024)
            ));
        }
        if !ALLOWED_DOCUMENT_TYPES.contains(&self.extension().as_str()) {
            return Err(format!(
                "Invalid file type. Allowed types: {}",
                ALLOWED_DOCUMENT_TYPES.join(", ")
            ));
        }
        Ok(())
    }
}

/// A lecturer's claim as submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClaimSubmission {
    #[validate(length(min = 1, message = "Lecturer name and contract name are required."))]
    pub lecturer_name: String,
    #[validate(length(min = 1, message = "Lecturer name and contract name are required."))]
    pub contract_name: String,
    #[validate(range(min = 1, max = 200, message = "Hours worked must be between 1 and 200."))]
    pub hours_worked: u32,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub supporting_document: Option<DocumentUpload>,
}

impl ClaimSubmission {
    /// Runs the intake checks, reporting the first failure
    ///
    /// Order: names, rate, hours, document.
    pub fn check(&self, currency: Currency) -> Result<(), ClaimError> {
        let field_errors = self.validate().err();

        if self.lecturer_name.trim().is_empty()
            || self.contract_name.trim().is_empty()
            || has_field_error(&field_errors, "lecturer_name")
            || has_field_error(&field_errors, "contract_name")
        {
            return Err(ClaimError::InvalidSubmission(NAMES_REQUIRED.to_string()));
        }

        if self.hourly_rate < MIN_SUBMITTED_RATE || self.hourly_rate > MAX_SUBMITTED_RATE {
            return Err(ClaimError::InvalidSubmission(format!(
                "Hourly rate must be between {} and {}.",
                Money::new(MIN_SUBMITTED_RATE, currency),
                Money::new(MAX_SUBMITTED_RATE, currency)
            )));
        }

        if let Some(message) = first_message(&field_errors, "hours_worked") {
            return Err(ClaimError::InvalidSubmission(message));
        }

        if let Some(document) = self.uploaded_document() {
            document.check().map_err(ClaimError::InvalidSubmission)?;
        }

        Ok(())
    }

    /// The attached document, ignoring empty uploads
    pub fn uploaded_document(&self) -> Option<&DocumentUpload> {
        self.supporting_document.as_ref().filter(|d| d.size_bytes > 0)
    }

    /// Builds the `New` claim for an accepted submission
    pub fn into_claim(
        self,
        id: ClaimId,
        currency: Currency,
        submitted_at: DateTime<Utc>,
        tz: &Timezone,
    ) -> Claim {
        let document = self.uploaded_document().map(|upload| SupportingDocument {
            name: upload.file_name.clone(),
            path: upload.stored_path(submitted_at, tz),
        });

        let claim = Claim::new(
            id,
            self.lecturer_name,
            self.contract_name,
            self.hours_worked,
            Money::new(self.hourly_rate, currency),
            submitted_at,
        );

        match document {
            Some(document) => claim.with_document(document),
            None => claim,
        }
    }
}

fn has_field_error(errors: &Option<ValidationErrors>, field: &str) -> bool {
    errors
        .as_ref()
        .is_some_and(|e| e.field_errors().contains_key(field))
}

fn first_message(errors: &Option<ValidationErrors>, field: &str) -> Option<String> {
    let errors = errors.as_ref()?;
    let field_errors = errors.field_errors();
    let error = field_errors.get(field)?.first()?;
    Some(
        error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid {}.", field)),
    )
}
