use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Candidate {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub applied_role: String,
    pub resume_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new candidate row. Timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub full_name: String,
    pub email: String,
    pub applied_role: String,
    pub resume_path: Option<String>,
}

/// Partial change set applied by update operations. `None` leaves the
/// column untouched; `updated_at` is always refreshed.
#[derive(Debug, Clone, Default)]
pub struct CandidateChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub applied_role: Option<String>,
    pub resume_path: Option<String>,
}

impl CandidateChanges {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.applied_role.is_none()
            && self.resume_path.is_none()
    }
}
