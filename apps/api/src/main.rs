mod config;
mod errors;
mod jobs;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::scraper::JobScraper;
use crate::jobs::webdriver::WebDriverBrowser;
use crate::resume::contact::ContactExtractor;
use crate::resume::skills::{SkillVocabulary, SubstringMatcher};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Finder API v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary: external file if configured, built-in list otherwise
    let vocabulary = match &config.skill_vocabulary_path {
        Some(path) => {
            let vocabulary = SkillVocabulary::from_json_file(path)?;
            info!(
                "Loaded {} skills from {}",
                vocabulary.len(),
                path.display()
            );
            vocabulary
        }
        None => SkillVocabulary::builtin(),
    };
    if vocabulary.is_empty() {
        warn!("Skill vocabulary is empty; no skills will ever be detected");
    }

    // One WebDriver session per scrape call; the browser factory itself is stateless
    let browser = WebDriverBrowser::new(config.webdriver_url.clone());
    let scraper = JobScraper::new(Arc::new(browser), config.scrape_settings());
    info!(
        "Job scraper targeting {} ({}) via WebDriver at {}",
        config.job_search_url, config.job_location, config.webdriver_url
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        vocabulary: Arc::new(vocabulary),
        skill_matcher: Arc::new(SubstringMatcher),
        contacts: Arc::new(ContactExtractor::new()),
        scraper: Arc::new(scraper),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
