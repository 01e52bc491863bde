use serde::{Deserialize, Serialize};

/// One normalized job posting scraped from the search site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    /// Posting link with query string and fragment removed.
    pub url: String,
    pub location: String,
}
