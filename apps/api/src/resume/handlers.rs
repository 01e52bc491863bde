//! Axum route handler for résumé upload.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::jobs::models::JobListing;
use crate::jobs::pagination::{fetch_page, PageRequest};
use crate::resume::analyze_text;
use crate::resume::contact::ContactRecord;
use crate::resume::document::{extract_text, Document, DocumentFormat, ExtractionError};
use crate::state::AppState;

/// Multipart field carrying the résumé file.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize, Deserialize)]
pub struct ScanResponse {
    pub contact: ContactRecord,
    pub skills: Vec<String>,
    pub jobs: Vec<JobListing>,
    pub next_page: u32,
}

/// POST /upload
///
/// Extracts contact details and skills from the uploaded résumé, then scrapes the
/// first page of matching jobs. An unreadable document is a 422; a readable one with
/// no skills or jobs is a successful, empty result.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, AppError> {
    let document = read_resume_field(&mut multipart, state.config.max_upload_bytes).await?;
    let format = document.format;

    let text = tokio::task::spawn_blocking(move || extract_text(&document))
        .await
        .map_err(|e| ExtractionError::Aborted(e.to_string()))??;

    let profile = analyze_text(
        &text,
        &state.contacts,
        state.skill_matcher.as_ref(),
        &state.vocabulary,
    );
    info!(
        "Analyzed {} résumé: email={}, phone={}, {} skills",
        format.as_str(),
        profile.contact.email.is_some(),
        profile.contact.phone.is_some(),
        profile.skills.len()
    );

    let skills: Vec<String> = profile.skills.into_iter().collect();
    let page = fetch_page(&state.scraper, &PageRequest::first(skills.clone())).await;

    Ok(Json(ScanResponse {
        contact: profile.contact,
        skills,
        jobs: page.jobs,
        next_page: page.next_page,
    }))
}

/// Pulls the `resume` file out of the form, checking its format and size.
async fn read_resume_field(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<Document, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let format = DocumentFormat::detect(field.file_name(), field.content_type())
            .ok_or_else(|| AppError::Validation("Please upload a PDF or DOCX file".to_string()))?;

        let content = field.bytes().await.map_err(multipart_error)?;
        if content.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if content.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File size exceeds the {max_bytes} byte limit"
            )));
        }

        return Ok(Document::new(content, format));
    }

    Err(AppError::Validation(format!(
        "No résumé uploaded; expected a '{RESUME_FIELD}' file field"
    )))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Malformed upload: {}", e.body_text()))
    }
}
