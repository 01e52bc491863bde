//! Page cursor for job retrieval.
//!
//! The server keeps no pagination state: every response carries `next_page`, and the
//! client sends it back together with its skill list. Only `page >= 1` is enforced;
//! the skill list and page progression are not checked against earlier calls.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::models::JobListing;
use crate::jobs::scraper::JobScraper;

/// Results per page on the search site; the scrape offset advances by this much per page.
pub const RESULTS_PER_PAGE: u32 = 25;

/// One retrieval request: which skills, which page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub skills: Vec<String>,
    pub page: u32,
}

impl PageRequest {
    pub fn new(skills: Vec<String>, page: u32) -> Result<Self, AppError> {
        if page == 0 {
            return Err(AppError::Validation("page must be 1 or greater".to_string()));
        }
        Ok(Self { skills, page })
    }

    /// The first page for a freshly extracted skill set.
    pub fn first(skills: Vec<String>) -> Self {
        Self { skills, page: 1 }
    }

    /// Parses the comma-separated `skills` query parameter, keeping client order.
    pub fn parse_skills(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn next_page(&self) -> u32 {
        self.page.saturating_add(1)
    }
}

/// Offset into the search results for a 1-based page: `(page - 1) * 25`.
pub fn result_offset(page: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(RESULTS_PER_PAGE)
}

/// One page of results plus the cursor for the following request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPage {
    pub jobs: Vec<JobListing>,
    pub next_page: u32,
}

/// Scrapes one page. An empty `jobs` list is the client's cue to stop paging.
pub async fn fetch_page(scraper: &JobScraper, request: &PageRequest) -> JobPage {
    let jobs = scraper.scrape(&request.skills, request.page).await;
    JobPage {
        jobs,
        next_page: request.next_page(),
    }
}
