pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers::handle_jobs;
use crate::resume::handlers::handle_upload;
use crate::state::AppState;

/// Headroom over the file limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/upload", post(handle_upload))
        .route("/jobs", get(handle_jobs))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{body::Body, http::Request, http::StatusCode, response::Response};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::jobs::scraper::tests::{settings, FakeBrowser};
    use crate::jobs::scraper::JobScraper;
    use crate::resume::contact::ContactExtractor;
    use crate::resume::skills::{SkillVocabulary, SubstringMatcher};

    pub(crate) fn test_app(browser: FakeBrowser, max_upload_bytes: usize) -> Router {
        let config = Config {
            port: 0,
            rust_log: "debug".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            job_search_url: "https://www.linkedin.com/jobs/search/".to_string(),
            job_location: "India".to_string(),
            settle_delay: Duration::ZERO,
            scrape_deadline: Duration::from_secs(5),
            max_upload_bytes,
            skill_vocabulary_path: None,
        };
        build_router(AppState {
            config,
            vocabulary: Arc::new(SkillVocabulary::builtin()),
            skill_matcher: Arc::new(SubstringMatcher),
            contacts: Arc::new(ContactExtractor::new()),
            scraper: Arc::new(JobScraper::new(Arc::new(browser), settings())),
        })
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(FakeBrowser::new(|_| Ok(String::new())), 1024);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = read_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = test_app(FakeBrowser::new(|_| Ok(String::new())), 1024);
        let response = app
            .oneshot(Request::builder().uri("/resumes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
