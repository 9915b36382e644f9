//! Lecturer directory entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::LecturerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: LecturerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Lecturer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LecturerId::new_v7(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            is_active: true,
            created_at,
        }
    }

    /// "First Last", the form lecturers sign claims with
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match against a name on a claim
    pub fn answers_to(&self, name: &str) -> bool {
        self.full_name().to_lowercase() == name.trim().to_lowercase()
    }
}
