//! Lecturer Claims Domain
//!
//! This crate implements the pipeline a lecturer's claim for hours worked
//! goes through: intake checks, automated validation, approval routing, the
//! two-stage manager/coordinator approval, and HR payment reporting.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> Validated -> Routed -> Manager / Coordinator review -> Approved
//!                              |                                  \-> Rejected
//!                              +-> Auto-Approved / Rejected
//! ```
//!
//! The pure parts ([`ValidationEngine`], [`ApprovalRouter`],
//! [`ApprovalStateMachine`], [`AttentionFilter`], [`ClaimReporter`]) do no
//! I/O. [`ClaimsService`] wires them to the [`ClaimRepository`] and
//! [`LecturerDirectory`] ports and an injected clock.

pub mod attention;
pub mod claim;
pub mod error;
pub mod lecturer;
pub mod ports;
pub mod record;
pub mod reporting;
pub mod routing;
pub mod service;
pub mod submission;
pub mod validation;
pub mod workflow;

pub use attention::AttentionFilter;
pub use claim::{ApprovalState, ApproverRole, Claim, ClaimStatus, RejectedBy, SupportingDocument};
pub use error::ClaimError;
pub use lecturer::Lecturer;
pub use ports::memory::{InMemoryClaimRepository, InMemoryLecturerDirectory};
pub use ports::{ClaimMutation, ClaimRepository, LecturerDirectory};
pub use record::ClaimRecord;
pub use reporting::{ClaimReporter, PaymentLine, ReportResult, ReportSummary, SummaryRow};
pub use routing::{ApprovalRouter, WorkflowAction, WorkflowDecision, MANAGER_APPROVAL_LIMIT};
pub use service::{ClaimsService, DashboardSummary, SubmissionReceipt};
pub use submission::{ClaimSubmission, DocumentUpload};
pub use validation::{ValidationEngine, ValidationOutcome};
pub use workflow::{next_approval_step, ApprovalStateMachine};
