use std::sync::Arc;

use crate::config::Config;
use crate::jobs::scraper::JobScraper;
use crate::resume::contact::ContactExtractor;
use crate::resume::skills::{SkillMatcher, SkillVocabulary};

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once in `main` and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub vocabulary: Arc<SkillVocabulary>,
    /// Pluggable skill matcher. Default: SubstringMatcher.
    pub skill_matcher: Arc<dyn SkillMatcher>,
    pub contacts: Arc<ContactExtractor>,
    /// Opens one browser session per request; no sessions are shared.
    pub scraper: Arc<JobScraper>,
}
