pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateChanges, NewCandidate};

/// Storage operations over candidate records.
///
/// `list` returns records newest-first by `created_at`. `insert` assigns
/// the id and both timestamps; `update` refreshes `updated_at` and never
/// touches `created_at`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Candidate>>;

    async fn get(&self, id: i64) -> Result<Option<Candidate>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>>;

    async fn insert(&self, candidate: NewCandidate) -> Result<Candidate>;

    /// Applies a partial change set. Returns `None` when the id is unknown.
    async fn update(&self, id: i64, changes: CandidateChanges) -> Result<Option<Candidate>>;

    /// Returns `false` when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool>;
}
