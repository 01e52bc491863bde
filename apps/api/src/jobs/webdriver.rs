//! WebDriver client — drives a headless Chrome through a W3C WebDriver endpoint
//! (chromedriver, selenium) via fantoccini.
//!
//! Every browser session is owned by exactly one scrape call. `WebDriverSession`
//! keeps its client until `close` succeeds; a session dropped while still open
//! (deadline, failed quit) closes it in the background.

use async_trait::async_trait;
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::{Client, ClientBuilder};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

const CHROME_ARGS: &[&str] = &[
    "--headless=new",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--window-size=1366,900",
];

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("could not start a browser session: {0}")]
    Session(#[from] NewSessionError),

    #[error("browser command failed: {0}")]
    Command(#[from] CmdError),

    #[error("browser session already closed")]
    SessionClosed,

    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("scrape exceeded its {0:?} deadline")]
    DeadlineExceeded(std::time::Duration),
}

/// Starts browser sessions. Implement this to scrape without a real browser.
#[async_trait]
pub trait Browser: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>, ScrapeError>;
}

/// One live browser session.
#[async_trait]
pub trait BrowserSession: Send {
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError>;
    async fn page_source(&mut self) -> Result<String, ScrapeError>;
    /// Closes the browser. Must be safe to call once on every exit path.
    async fn quit(&mut self) -> Result<(), ScrapeError>;
}

/// Browser factory backed by a WebDriver endpoint.
#[derive(Debug, Clone)]
pub struct WebDriverBrowser {
    endpoint: String,
}

impl WebDriverBrowser {
    pub fn new(endpoint: impl Into<String>) -> Self {
        // Session paths are joined onto the endpoint, so it must end in '/'.
        let endpoint = endpoint.into();
        Self {
            endpoint: format!("{}/", endpoint.trim_end_matches('/')),
        }
    }

    fn capabilities() -> Map<String, Value> {
        let mut capabilities = Map::new();
        capabilities.insert("browserName".to_string(), json!("chrome"));
        capabilities.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": CHROME_ARGS }),
        );
        capabilities
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>, ScrapeError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(Self::capabilities());
        let client = builder.connect(&self.endpoint).await?;
        debug!("WebDriver session started at {}", self.endpoint);

        Ok(Box::new(WebDriverSession {
            client: Some(client),
        }))
    }
}

pub struct WebDriverSession {
    /// `None` once the remote session has been closed.
    client: Option<Client>,
}

impl WebDriverSession {
    fn client(&self) -> Result<&Client, ScrapeError> {
        self.client.as_ref().ok_or(ScrapeError::SessionClosed)
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.client()?.goto(url).await?;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, ScrapeError> {
        Ok(self.client()?.source().await?)
    }

    async fn quit(&mut self) -> Result<(), ScrapeError> {
        let Some(client) = &self.client else {
            return Ok(());
        };
        client.clone().close().await?;
        self.client = None;
        debug!("WebDriver session closed");
        Ok(())
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        let Some(client) = self.client.take() else {
            return;
        };
        warn!("WebDriver session dropped while open, closing it");
        // Without a runtime the client is simply dropped; fantoccini then ends
        // the session itself once its last handle is gone.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        runtime.spawn(async move {
            if let Err(e) = client.close().await {
                warn!("Failed to close WebDriver session: {e}");
            }
        });
    }
}
