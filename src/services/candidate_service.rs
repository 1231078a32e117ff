use std::sync::Arc;

use validator::Validate;

use crate::dto::candidate_dto::{CreateCandidatePayload, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::storage::CandidateStore;

/// Domain operations over candidates, delegating persistence to the
/// configured [`CandidateStore`].
#[derive(Clone)]
pub struct CandidateService {
    store: Arc<dyn CandidateStore>,
}

impl CandidateService {
    pub fn new(store: Arc<dyn CandidateStore>) -> Self {
        Self { store }
    }

    pub async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        self.store.list().await
    }

    pub async fn get_candidate(&self, id: i64) -> Result<Candidate> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
    }

    pub async fn create_candidate(
        &self,
        payload: CreateCandidatePayload,
        resume_path: Option<String>,
    ) -> Result<Candidate> {
        payload.validate()?;
        if self.store.find_by_email(&payload.email).await?.is_some() {
            return Err(Error::Conflict(
                "A candidate with this email address already exists.".to_string(),
            ));
        }
        self.store.insert(payload.into_new_candidate(resume_path)).await
    }

    /// Full update: every text field is replaced; the resume is replaced
    /// only when a new file was uploaded.
    pub async fn replace_candidate(
        &self,
        id: i64,
        payload: CreateCandidatePayload,
        resume_path: Option<String>,
    ) -> Result<Candidate> {
        payload.validate()?;
        self.ensure_email_free(&payload.email, id).await?;
        self.store
            .update(id, payload.into_changes(resume_path))
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
    }

    /// Partial update: only the supplied fields change.
    pub async fn update_candidate(
        &self,
        id: i64,
        payload: UpdateCandidatePayload,
        resume_path: Option<String>,
    ) -> Result<Candidate> {
        payload.validate()?;
        if let Some(ref email) = payload.email {
            self.ensure_email_free(email, id).await?;
        }
        let changes = payload.into_changes(resume_path);
        if changes.is_empty() {
            return Err(Error::BadRequest("No fields to update".to_string()));
        }
        self.store
            .update(id, changes)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
    }

    pub async fn delete_candidate(&self, id: i64) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(Error::NotFound("Candidate not found".to_string()));
        }
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str, current_id: i64) -> Result<()> {
        if let Some(existing) = self.store.find_by_email(email).await? {
            if existing.id != current_id {
                return Err(Error::Conflict(
                    "A candidate with this email address already exists.".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::NewCandidate;
    use crate::storage::MockCandidateStore;
    use chrono::Utc;

    fn stored(id: i64, email: &str) -> Candidate {
        let now = Utc::now();
        Candidate {
            id,
            full_name: "Jane Doe".into(),
            email: email.into(),
            applied_role: "Engineer".into(),
            resume_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn payload(email: &str) -> CreateCandidatePayload {
        CreateCandidatePayload {
            full_name: "Jane Doe".into(),
            email: email.into(),
            applied_role: "Engineer".into(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_without_insert() {
        let mut store = MockCandidateStore::new();
        store
            .expect_find_by_email()
            .withf(|email| email == "jane@example.com")
            .returning(|_| Ok(Some(stored(1, "jane@example.com"))));
        store.expect_insert().never();

        let service = CandidateService::new(Arc::new(store));
        let err = service
            .create_candidate(payload("jane@example.com"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn create_validates_before_touching_storage() {
        let mut store = MockCandidateStore::new();
        store.expect_find_by_email().never();
        store.expect_insert().never();

        let service = CandidateService::new(Arc::new(store));
        let err = service
            .create_candidate(payload("not-an-email"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn create_inserts_when_email_is_free() {
        let mut store = MockCandidateStore::new();
        store.expect_find_by_email().returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|c: &NewCandidate| c.email == "jane@example.com")
            .returning(|c| {
                let now = Utc::now();
                Ok(Candidate {
                    id: 7,
                    full_name: c.full_name,
                    email: c.email,
                    applied_role: c.applied_role,
                    resume_path: c.resume_path,
                    created_at: now,
                    updated_at: now,
                })
            });

        let service = CandidateService::new(Arc::new(store));
        let created = service
            .create_candidate(payload("jane@example.com"), None)
            .await
            .unwrap();
        assert_eq!(created.id, 7);
    }

    #[tokio::test]
    async fn patch_with_no_fields_is_rejected() {
        let mut store = MockCandidateStore::new();
        store.expect_update().never();

        let service = CandidateService::new(Arc::new(store));
        let err = service
            .update_candidate(1, UpdateCandidatePayload::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn patch_keeping_own_email_is_allowed() {
        let mut store = MockCandidateStore::new();
        store
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored(1, "jane@example.com"))));
        store
            .expect_update()
            .returning(|id, _| Ok(Some(stored(id, "jane@example.com"))));

        let service = CandidateService::new(Arc::new(store));
        let updated = service
            .update_candidate(
                1,
                UpdateCandidatePayload {
                    email: Some("jane@example.com".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.id, 1);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let mut store = MockCandidateStore::new();
        store.expect_delete().returning(|_| Ok(false));

        let service = CandidateService::new(Arc::new(store));
        let err = service.delete_candidate(99).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
