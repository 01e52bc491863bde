//! Job-card parsing for the search results page.
//!
//! The results markup is an external contract that drifts. A card missing any
//! required element is skipped; it never aborts the page.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::jobs::models::JobListing;

/// CSS selectors locating a job card and its parts.
#[derive(Debug, Clone)]
pub struct CardSelectors {
    pub card: Selector,
    pub title: Selector,
    pub company: Selector,
    pub location: Selector,
    pub link: Selector,
}

impl CardSelectors {
    /// Selectors for the public (signed-out) LinkedIn job search page.
    pub fn linkedin() -> Self {
        Self {
            card: parse_selector("div.base-search-card"),
            title: parse_selector(".base-search-card__title"),
            company: parse_selector(".base-search-card__subtitle"),
            location: parse_selector(".job-search-card__location"),
            link: parse_selector("a.base-card__full-link"),
        }
    }
}

fn parse_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector '{css}': {e:?}"))
}

/// Parses every job card on a results page, keeping only complete cards whose
/// location contains `country`.
///
/// `Html` is not `Send`; this stays synchronous so it never lives across an await.
pub fn parse_job_cards(html: &str, selectors: &CardSelectors, country: &str) -> Vec<JobListing> {
    let document = Html::parse_document(html);
    let mut listings = Vec::new();
    let mut skipped = 0usize;

    for card in document.select(&selectors.card) {
        match parse_card(card, selectors, country) {
            Some(listing) => listings.push(listing),
            None => skipped += 1,
        }
    }

    debug!(
        "Parsed {} job cards ({} skipped as incomplete or outside {})",
        listings.len(),
        skipped,
        country
    );
    listings
}

fn parse_card(card: ElementRef<'_>, selectors: &CardSelectors, country: &str) -> Option<JobListing> {
    let location = first_text(card, &selectors.location)?;
    if !location.contains(country) {
        return None;
    }

    let title = first_text(card, &selectors.title)?;
    let company = first_text(card, &selectors.company)?;
    let href = card
        .select(&selectors.link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(strip_query)
        .filter(|href| !href.is_empty())?;

    Some(JobListing {
        title,
        company,
        url: href.to_string(),
        location,
    })
}

/// Whitespace-normalized text of the first match, or `None` if absent or blank.
fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let element = card.select(selector).next()?;
    let text = element.text().collect::<Vec<_>>().join(" ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Drops the query string (tracking parameters) and fragment from a link.
pub fn strip_query(href: &str) -> &str {
    let end = href.find(|c| c == '?' || c == '#').unwrap_or(href.len());
    href[..end].trim()
}
