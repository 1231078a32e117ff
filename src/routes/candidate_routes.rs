use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::path::Path as StdPath;
use tokio::fs;

use crate::{
    dto::candidate_dto::{CandidateResponse, CreateCandidatePayload, UpdateCandidatePayload},
    error::{Error, Result},
    AppState,
};

/// Raw multipart fields for a candidate write request.
#[derive(Debug, Default)]
struct CandidateForm {
    full_name: Option<String>,
    email: Option<String>,
    applied_role: Option<String>,
    resume_path: Option<String>,
}

impl CandidateForm {
    fn require_create(self) -> Result<(CreateCandidatePayload, Option<String>)> {
        let full_name = self
            .full_name
            .ok_or_else(|| Error::BadRequest("full_name is required".into()))?;
        let email = self
            .email
            .ok_or_else(|| Error::BadRequest("email is required".into()))?;
        let applied_role = self
            .applied_role
            .ok_or_else(|| Error::BadRequest("applied_role is required".into()))?;
        Ok((
            CreateCandidatePayload {
                full_name,
                email,
                applied_role,
            },
            self.resume_path,
        ))
    }

    fn into_update(self) -> (UpdateCandidatePayload, Option<String>) {
        (
            UpdateCandidatePayload {
                full_name: self.full_name,
                email: self.email,
                applied_role: self.applied_role,
            },
            self.resume_path,
        )
    }
}

async fn save_resume_file(filename: &str, data: &bytes::Bytes) -> Result<String> {
    let ext = StdPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    let allowed_exts = ["pdf", "doc", "docx", "txt", "rtf", "jpg", "jpeg", "png", "webp"];
    if !allowed_exts.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed",
            ext
        )));
    }

    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }
    if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
        return Err(Error::BadRequest("Invalid JPEG file content".into()));
    }
    if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Err(Error::BadRequest("Invalid PNG file content".into()));
    }

    let upload_dir = format!("{}/resumes", crate::config::get_config().uploads_dir);
    fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| Error::Internal(e.to_string()))?;

    let file_id = uuid::Uuid::new_v4();
    let safe_filename = format!("{}.{}", file_id, ext);
    let file_path = format!("{}/{}", upload_dir, safe_filename);

    fs::write(&file_path, data).await.map_err(|e| {
        tracing::error!("Failed to write resume file: {}", e);
        Error::Internal(format!("Failed to save file: {}", e))
    })?;

    Ok(file_path)
}

async fn read_candidate_form(mut multipart: Multipart) -> Result<CandidateForm> {
    let mut form = CandidateForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        Error::BadRequest(e.to_string())
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "full_name" => form.full_name = Some(field.text().await?),
            "email" => form.email = Some(field.text().await?),
            "applied_role" => form.applied_role = Some(field.text().await?),
            "resume" => {
                let filename = field.file_name().unwrap_or("resume.bin").to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read resume bytes: {}", e);
                    Error::BadRequest("Failed to read file upload".into())
                })?;

                if !data.is_empty() {
                    form.resume_path = Some(save_resume_file(&filename, &data).await?);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

#[utoipa::path(
    get,
    path = "/api/candidates",
    responses(
        (status = 200, description = "Candidates, newest first", body = Vec<CandidateResponse>),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.list_candidates().await?;
    let body: Vec<CandidateResponse> = candidates.into_iter().map(CandidateResponse::from).collect();
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body(content = CreateCandidatePayload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Candidate created", body = CandidateResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let (payload, resume_path) = read_candidate_form(multipart).await?.require_create()?;
    let candidate = state
        .candidate_service
        .create_candidate(payload, resume_path)
        .await?;
    tracing::info!(id = candidate.id, "Candidate created");
    Ok((StatusCode::CREATED, Json(CandidateResponse::from(candidate))))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found", body = CandidateResponse),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get_candidate(id).await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    put,
    path = "/api/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    request_body(content = CreateCandidatePayload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Candidate replaced", body = CandidateResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Candidate not found"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn replace_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let (payload, resume_path) = read_candidate_form(multipart).await?.require_create()?;
    let candidate = state
        .candidate_service
        .replace_candidate(id, payload, resume_path)
        .await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    patch,
    path = "/api/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    request_body(content = UpdateCandidatePayload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Candidate updated", body = CandidateResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Candidate not found"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let (payload, resume_path) = read_candidate_form(multipart).await?.into_update();
    let candidate = state
        .candidate_service
        .update_candidate(id, payload, resume_path)
        .await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    delete,
    path = "/api/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 204, description = "Candidate deleted"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.candidate_service.delete_candidate(id).await?;
    tracing::info!(id, "Candidate deleted");
    Ok(StatusCode::NO_CONTENT)
}
