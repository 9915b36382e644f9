//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the claims pipeline. These fixtures
//! are consistent and predictable for unit tests.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{DateRange, FixedClock};
use domain_claims::{ClaimsService, InMemoryClaimRepository, InMemoryLecturerDirectory, Lecturer};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Mid-morning on a weekday in May 2024
    pub fn submission_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 8, 0, 0).unwrap()
    }

    /// A clock pinned at [`TemporalFixtures::submission_time`]
    pub fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(Self::submission_time()))
    }

    /// 1 to 31 May 2024
    pub fn may_2024() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        )
        .unwrap()
    }
}

/// Fixture for lecturer directory entries
pub struct LecturerFixtures;

impl LecturerFixtures {
    pub fn thandi() -> Lecturer {
        Lecturer::new(
            "Thandi",
            "Mokoena",
            "t.mokoena@example.ac.za",
            TemporalFixtures::submission_time(),
        )
    }

    pub fn pieter() -> Lecturer {
        Lecturer::new(
            "Pieter",
            "van Wyk",
            "p.vanwyk@example.ac.za",
            TemporalFixtures::submission_time(),
        )
    }

    pub fn retired() -> Lecturer {
        let mut lecturer = Lecturer::new(
            "Ayesha",
            "Patel",
            "a.patel@example.ac.za",
            TemporalFixtures::submission_time(),
        );
        lecturer.is_active = false;
        lecturer
    }

    pub fn directory() -> InMemoryLecturerDirectory {
        InMemoryLecturerDirectory::with_lecturers(vec![
            Self::thandi(),
            Self::pieter(),
            Self::retired(),
        ])
    }
}

/// A service over fresh in-memory adapters
pub struct ServiceFixture {
    pub service: ClaimsService,
    pub repository: InMemoryClaimRepository,
    pub clock: Arc<FixedClock>,
}

impl ServiceFixture {
    pub fn new() -> Self {
        let repository = InMemoryClaimRepository::new();
        let clock = TemporalFixtures::fixed_clock();
        let service = ClaimsService::new(
            Arc::new(repository.clone()),
            Arc::new(LecturerFixtures::directory()),
            clock.clone(),
        );
        Self { service, repository, clock }
    }
}

impl Default for ServiceFixture {
    fn default() -> Self {
        Self::new()
    }
}
