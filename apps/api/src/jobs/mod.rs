// Job retrieval: headless-browser scraping of the job search site, card parsing,
// and the stateless page cursor handed back to clients.

pub mod cards;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod scraper;
pub mod webdriver;
