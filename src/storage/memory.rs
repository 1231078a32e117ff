use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::CandidateStore;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateChanges, NewCandidate};

/// In-memory candidate store backed by a `HashMap`.
///
/// Mirrors the Postgres store's contract (newest-first listing, unique
/// email, timestamp handling) without a database. Used by the integration
/// tests; also handy for local experiments.
#[derive(Default)]
pub struct MemoryCandidateStore {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    rows: HashMap<i64, Candidate>,
}

impl MemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn list(&self) -> Result<Vec<Candidate>> {
        let state = self.inner.lock().expect("memory store mutex poisoned");
        let mut candidates: Vec<Candidate> = state.rows.values().cloned().collect();
        candidates.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(candidates)
    }

    async fn get(&self, id: i64) -> Result<Option<Candidate>> {
        let state = self.inner.lock().expect("memory store mutex poisoned");
        Ok(state.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>> {
        let state = self.inner.lock().expect("memory store mutex poisoned");
        Ok(state.rows.values().find(|c| c.email == email).cloned())
    }

    async fn insert(&self, candidate: NewCandidate) -> Result<Candidate> {
        let mut state = self.inner.lock().expect("memory store mutex poisoned");
        if state.rows.values().any(|c| c.email == candidate.email) {
            return Err(Error::Conflict(
                "Duplicate value for unique field".to_string(),
            ));
        }
        state.next_id += 1;
        let now = Utc::now();
        let created = Candidate {
            id: state.next_id,
            full_name: candidate.full_name,
            email: candidate.email,
            applied_role: candidate.applied_role,
            resume_path: candidate.resume_path,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, changes: CandidateChanges) -> Result<Option<Candidate>> {
        let mut state = self.inner.lock().expect("memory store mutex poisoned");
        if let Some(ref email) = changes.email {
            if state.rows.values().any(|c| c.email == *email && c.id != id) {
                return Err(Error::Conflict(
                    "Duplicate value for unique field".to_string(),
                ));
            }
        }
        let Some(row) = state.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(full_name) = changes.full_name {
            row.full_name = full_name;
        }
        if let Some(email) = changes.email {
            row.email = email;
        }
        if let Some(applied_role) = changes.applied_role {
            row.applied_role = applied_role;
        }
        if let Some(resume_path) = changes.resume_path {
            row.resume_path = Some(resume_path);
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut state = self.inner.lock().expect("memory store mutex poisoned");
        Ok(state.rows.remove(&id).is_some())
    }
}
