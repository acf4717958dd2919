//! Search phase: concurrent keyword fan-out, caching, dedup and pre-filter.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;

use jobscout_core::{pre_filter, FilterConfig, ListingSummary};

use crate::aggregate::aggregate;
use crate::cache::ListingCache;
use crate::client::JobBoardClient;
use crate::parse::parse_search_results;

/// Trims keywords, drops blanks and removes duplicates, keeping first-seen order.
#[must_use]
pub fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_owned())
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .collect()
}

/// Runs the search phase for a set of keywords.
///
/// Each keyword is served from the [`ListingCache`] when fresh. Otherwise
/// its pages `1..=max_pages` are fetched in order, stopping early at the
/// first page that parses to no offers. A page that fails to fetch or parse
/// contributes nothing and does not stop the keyword.
#[derive(Debug, Clone)]
pub struct Harvester {
    client: JobBoardClient,
    cache: Arc<ListingCache>,
    max_pages: u32,
}

impl Harvester {
    #[must_use]
    pub fn new(client: JobBoardClient, cache: Arc<ListingCache>, max_pages: u32) -> Self {
        Self {
            client,
            cache,
            max_pages: max_pages.max(1),
        }
    }

    #[must_use]
    pub fn client(&self) -> &JobBoardClient {
        &self.client
    }

    /// Launches every keyword concurrently and returns the deduplicated union.
    ///
    /// Keywords are normalized first. Concurrency is bounded by the client's
    /// fetch semaphore, not by the number of keywords.
    pub async fn harvest<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<ListingSummary> {
        let keywords = normalize_keywords(keywords);
        tracing::info!(keywords = keywords.len(), max_pages = self.max_pages, "starting search phase");

        let per_keyword = join_all(keywords.iter().map(|kw| self.harvest_keyword(kw))).await;
        let raw_count: usize = per_keyword.iter().map(Vec::len).sum();
        let unique = aggregate(per_keyword);

        tracing::info!(raw = raw_count, unique = unique.len(), "search phase complete");
        unique
    }

    /// Search-phase results for one keyword, through the cache.
    pub async fn harvest_keyword(&self, keyword: &str) -> Vec<ListingSummary> {
        self.cache
            .get_or_fetch(keyword, || self.fetch_keyword_pages(keyword))
            .await
    }

    async fn fetch_keyword_pages(&self, keyword: &str) -> Vec<ListingSummary> {
        let mut listings = Vec::new();

        for page in 1..=self.max_pages {
            let body = match self.client.fetch_search_page(keyword, page).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(keyword, page, error = %e, "search page abandoned");
                    continue;
                }
            };

            match parse_search_results(&body, keyword) {
                Ok(found) if found.is_empty() => {
                    tracing::debug!(keyword, page, "no offers on page; stopping");
                    break;
                }
                Ok(found) => {
                    tracing::info!(keyword, page, count = found.len(), "search page parsed");
                    listings.extend(found);
                }
                Err(e) => {
                    tracing::warn!(keyword, page, error = %e, "search page unreadable");
                }
            }
        }

        listings
    }
}

/// Applies the pre-filter to every listing, logging each rejection.
#[must_use]
pub fn select_candidates(listings: Vec<ListingSummary>, filters: &FilterConfig) -> Vec<ListingSummary> {
    let total = listings.len();
    let candidates: Vec<ListingSummary> = listings
        .into_iter()
        .filter(|listing| match pre_filter(listing, filters) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(
                    title = %listing.title,
                    location = %listing.location,
                    %reason,
                    "pre-filter rejected listing"
                );
                false
            }
        })
        .collect();

    tracing::info!(total, candidates = candidates.len(), "pre-filter complete");
    candidates
}
