//! Job scraper — searches the job site for the first few skills and collects
//! location-filtered listings.
//!
//! Best effort by contract: `scrape` never returns an error. Driver startup,
//! navigation, page-source and deadline failures are logged and become an
//! empty result. The browser session is quit after the skill loop whether or not
//! it succeeded; if the deadline cancels the future, the session's drop guard
//! releases it instead.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::jobs::cards::{parse_job_cards, CardSelectors};
use crate::jobs::models::JobListing;
use crate::jobs::pagination::result_offset;
use crate::jobs::webdriver::{Browser, BrowserSession, ScrapeError};

/// Skills beyond this many are ignored.
pub const MAX_SKILLS_PER_SEARCH: usize = 3;
/// Cap on listings returned by one call, across all skills.
pub const MAX_LISTINGS: usize = 20;

#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Search results page, e.g. `https://www.linkedin.com/jobs/search/`.
    pub search_url: String,
    /// Location filter sent with the query; also the marker a card's location must contain.
    pub location: String,
    /// Wait after each navigation so client-rendered cards can populate.
    pub settle_delay: Duration,
    /// Upper bound on one whole `scrape` call.
    pub deadline: Duration,
}

pub struct JobScraper {
    browser: Arc<dyn Browser>,
    selectors: CardSelectors,
    settings: ScrapeSettings,
}

impl JobScraper {
    pub fn new(browser: Arc<dyn Browser>, settings: ScrapeSettings) -> Self {
        Self {
            browser,
            selectors: CardSelectors::linkedin(),
            settings,
        }
    }

    /// Returns up to 20 listings for the first 3 `skills` on the given 1-based page.
    /// Empty `skills` returns immediately without opening a browser.
    pub async fn scrape(&self, skills: &[String], page: u32) -> Vec<JobListing> {
        if skills.is_empty() {
            debug!("No skills to search for, skipping job scrape");
            return Vec::new();
        }
        let skills = &skills[..skills.len().min(MAX_SKILLS_PER_SEARCH)];

        let outcome =
            tokio::time::timeout(self.settings.deadline, self.scrape_with_session(skills, page))
                .await
                .unwrap_or(Err(ScrapeError::DeadlineExceeded(self.settings.deadline)));

        match outcome {
            Ok(listings) => {
                info!(
                    "Scraped {} job listings for {:?} (page {})",
                    listings.len(),
                    skills,
                    page
                );
                listings
            }
            Err(e) => {
                warn!("Job scrape for {:?} (page {}) failed, returning no jobs: {}", skills, page, e);
                Vec::new()
            }
        }
    }

    async fn scrape_with_session(
        &self,
        skills: &[String],
        page: u32,
    ) -> Result<Vec<JobListing>, ScrapeError> {
        let mut session = self.browser.open_session().await?;

        let outcome = self.collect_listings(session.as_mut(), skills, page).await;

        if let Err(e) = session.quit().await {
            warn!("Failed to close browser session: {e}");
        }

        let mut listings = outcome?;
        listings.truncate(MAX_LISTINGS);
        Ok(listings)
    }

    async fn collect_listings(
        &self,
        session: &mut dyn BrowserSession,
        skills: &[String],
        page: u32,
    ) -> Result<Vec<JobListing>, ScrapeError> {
        let mut listings = Vec::new();

        for skill in skills {
            let url = self.search_url(skill, page)?;
            debug!("Navigating to {url}");
            session.navigate(url.as_str()).await?;
            tokio::time::sleep(self.settings.settle_delay).await;

            let html = session.page_source().await?;
            let found = parse_job_cards(&html, &self.selectors, &self.settings.location);
            debug!("Skill '{}' yielded {} listings", skill, found.len());
            listings.extend(found);
        }

        Ok(listings)
    }

    /// Search URL for one skill: keyword, location filter and `start` offset for the page.
    pub fn search_url(&self, skill: &str, page: u32) -> Result<Url, ScrapeError> {
        let offset = result_offset(page).to_string();
        let url = Url::parse_with_params(
            &self.settings.search_url,
            &[
                ("keywords", skill),
                ("location", self.settings.location.as_str()),
                ("start", offset.as_str()),
            ],
        )?;
        Ok(url)
    }
}
