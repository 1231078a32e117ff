use async_trait::async_trait;
use sqlx::PgPool;

use super::CandidateStore;
use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateChanges, NewCandidate};

const CANDIDATE_COLUMNS: &str =
    "id, full_name, email, applied_role, resume_path, created_at, updated_at";

/// PostgreSQL-backed candidate store using `sqlx::PgPool`.
///
/// Every mutation runs inside its own transaction: commit on success,
/// rollback (via drop) on any fault, with the error propagated unchanged.
/// The connection is returned to the pool on every exit path.
#[derive(Clone)]
pub struct PostgresCandidateStore {
    pool: PgPool,
}

impl PostgresCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PostgresCandidateStore {
    async fn list(&self) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    async fn get(&self, id: i64) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn insert(&self, candidate: NewCandidate) -> Result<Candidate> {
        let mut tx = self.pool.begin().await?;
        // created_at and updated_at share the transaction timestamp, so
        // they are equal on the freshly created row.
        let created = sqlx::query_as::<_, Candidate>(&format!(
            "INSERT INTO candidates (full_name, email, applied_role, resume_path) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(&candidate.full_name)
        .bind(&candidate.email)
        .bind(&candidate.applied_role)
        .bind(&candidate.resume_path)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, id: i64, changes: CandidateChanges) -> Result<Option<Candidate>> {
        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query_as::<_, Candidate>(&format!(
            "UPDATE candidates SET \
                full_name = COALESCE($1, full_name), \
                email = COALESCE($2, email), \
                applied_role = COALESCE($3, applied_role), \
                resume_path = COALESCE($4, resume_path), \
                updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(&changes.full_name)
        .bind(&changes.email)
        .bind(&changes.applied_role)
        .bind(&changes.resume_path)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
