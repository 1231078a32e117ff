use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::candidate::{Candidate, CandidateChanges, NewCandidate};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub applied_role: String,
}

impl CreateCandidatePayload {
    pub fn into_new_candidate(self, resume_path: Option<String>) -> NewCandidate {
        NewCandidate {
            full_name: self.full_name,
            email: self.email,
            applied_role: self.applied_role,
            resume_path,
        }
    }

    pub fn into_changes(self, resume_path: Option<String>) -> CandidateChanges {
        CandidateChanges {
            full_name: Some(self.full_name),
            email: Some(self.email),
            applied_role: Some(self.applied_role),
            resume_path,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub applied_role: Option<String>,
}

impl UpdateCandidatePayload {
    pub fn into_changes(self, resume_path: Option<String>) -> CandidateChanges {
        CandidateChanges {
            full_name: self.full_name,
            email: self.email,
            applied_role: self.applied_role,
            resume_path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandidateResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub applied_role: String,
    pub resume: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Candidate> for CandidateResponse {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            full_name: candidate.full_name,
            email: candidate.email,
            applied_role: candidate.applied_role,
            resume: candidate.resume_path,
            created_at: candidate.created_at,
            updated_at: candidate.updated_at,
        }
    }
}
