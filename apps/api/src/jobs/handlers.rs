use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::pagination::{fetch_page, JobPage, PageRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    /// Comma-separated skills, as returned by `/upload`.
    #[serde(default)]
    pub skills: String,
    pub page: Option<u32>,
}

/// GET /jobs?skills=a,b,c&page=n
///
/// Scrapes one further page for a skill set. The client supplies the `next_page`
/// from its previous response; nothing is remembered between calls.
pub async fn handle_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<JobPage>, AppError> {
    let request = PageRequest::new(
        PageRequest::parse_skills(&query.skills),
        query.page.unwrap_or(1),
    )?;
    Ok(Json(fetch_page(&state.scraper, &request).await))
}
