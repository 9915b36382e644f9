//! Claims Pipeline Application
//!
//! Bootstrap for running the claims pipeline outside a test: configuration
//! from the environment, structured logging, and in-memory adapters wired to
//! the system clock.
//!
//! # Environment Variables
//!
//! * `CLAIMS_LOG_LEVEL` - Log level or filter directive (default: info)
//! * `CLAIMS_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `CLAIMS_CURRENCY` - Payment currency code (default: ZAR)
//! * `CLAIMS_TIMEZONE` - IANA zone for report dates (default: Africa/Johannesburg)
//! * `CLAIMS_BATCH_FILE` - Batch input when no path is given on the command line

pub mod batch;
pub mod config;
pub mod error;
pub mod telemetry;

use std::sync::Arc;

use core_kernel::{Clock, SystemClock};
use domain_claims::{
    ClaimRepository, ClaimsService, InMemoryClaimRepository, InMemoryLecturerDirectory, Lecturer,
    LecturerDirectory,
};

pub use crate::config::{ClaimsConfig, LogFormat};
pub use crate::error::AppError;

/// A configured claims service
pub struct ClaimsApp {
    pub config: ClaimsConfig,
    pub service: ClaimsService,
}

impl ClaimsApp {
    /// Wires the service to the given adapters
    pub fn new(
        config: ClaimsConfig,
        claims: Arc<dyn ClaimRepository>,
        lecturers: Arc<dyn LecturerDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let service = ClaimsService::new(claims, lecturers, clock)
            .with_currency(config.currency()?)
            .with_timezone(config.timezone()?);

        tracing::info!(
            currency = %config.currency,
            timezone = %config.timezone,
            "claims service ready"
        );
        Ok(Self { config, service })
    }

    /// In-memory storage, the given lecturer directory and the system clock
    pub fn in_memory(config: ClaimsConfig, lecturers: Vec<Lecturer>) -> Result<Self, AppError> {
        Self::new(
            config,
            Arc::new(InMemoryClaimRepository::new()),
            Arc::new(InMemoryLecturerDirectory::with_lecturers(lecturers)),
            Arc::new(SystemClock),
        )
    }
}
