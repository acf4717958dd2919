//! HTTP client for the job board's server-rendered pages.

mod urls;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;

use jobscout_core::AppConfig;

use crate::error::ScraperError;
use crate::rate_limit::{retry_with_jitter, RetryPolicy};

#[cfg(test)]
use urls::{normalize_base_url, origin_of, search_url};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "pl-PL,pl;q=0.9,en-US;q=0.8,en;q=0.7";

/// HTTP client for job-board search and listing pages.
///
/// Search-page requests share a counting semaphore so that at most
/// `max_concurrent_fetches` of them are in flight at once across every
/// keyword task holding a clone of this client. A permit is held for the
/// duration of one HTTP attempt, never across retry sleeps. Listing-page
/// requests are issued one at a time by the caller and take no permit.
///
/// Every request goes through [`retry_with_jitter`]; only HTTP 200 counts
/// as success, 403 is reported as [`ScraperError::Blocked`].
#[derive(Clone)]
pub struct JobBoardClient {
    client: Client,
    base_url: String,
    origin: String,
    permits: Arc<Semaphore>,
    policy: RetryPolicy,
}

impl JobBoardClient {
    /// Creates a client with the given timeout, `User-Agent`, concurrency
    /// cap and retry policy.
    ///
    /// `max_concurrent_fetches` of `0` is treated as `1`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `base_url` is not an absolute URL.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_concurrent_fetches: usize,
        policy: RetryPolicy,
    ) -> Result<Self, ScraperError> {
        let base_url = urls::normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            origin: urls::origin_of(&base_url),
            base_url,
            permits: Arc::new(Semaphore::new(max_concurrent_fetches.max(1))),
            policy,
        })
    }

    /// Builds a client from the `JOBSCOUT_SCRAPER_*` settings.
    ///
    /// # Errors
    ///
    /// Same as [`JobBoardClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.search_base_url,
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            config.scraper_max_concurrent_fetches,
            RetryPolicy::from_app_config(config),
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches the raw HTML of one search-results page.
    ///
    /// # Errors
    ///
    /// The last attempt's error once the retry policy is exhausted:
    /// [`ScraperError::Blocked`], [`ScraperError::UnexpectedStatus`], or
    /// [`ScraperError::Http`].
    pub async fn fetch_search_page(&self, keyword: &str, page: u32) -> Result<String, ScraperError> {
        let url = urls::search_url(&self.base_url, keyword, page);
        tracing::debug!(keyword, page, url = %url, "fetching search page");

        let url = url.as_str();
        retry_with_jitter(&self.policy, url, || async move {
            // Never closed, so acquisition cannot fail.
            let _permit = self.permits.acquire().await.ok();
            self.get_html(url).await
        })
        .await
    }

    /// Fetches the raw HTML of one listing page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` is not absolute (not retried).
    /// - Otherwise as for [`JobBoardClient::fetch_search_page`].
    pub async fn fetch_listing_page(&self, url: &str) -> Result<String, ScraperError> {
        reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        tracing::debug!(url, "fetching listing page");

        retry_with_jitter(&self.policy, url, || self.get_html(url)).await
    }

    async fn get_html(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(reqwest::header::REFERER, &self.origin)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            StatusCode::FORBIDDEN => Err(ScraperError::Blocked {
                url: url.to_owned(),
            }),
            status => Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            }),
        }
    }
}

impl std::fmt::Debug for JobBoardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobBoardClient")
            .field("base_url", &self.base_url)
            .field("available_permits", &self.permits.available_permits())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
