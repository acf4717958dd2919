//! The `search` and `listings` commands: summary-phase harvest into the
//! listings table, and paged reads back out of it.

use std::sync::Arc;

use chrono::Utc;
use jobscout_core::{AppConfig, ContinuationToken};
use jobscout_scraper::{normalize_keywords, Harvester, JobBoardClient, ListingCache};

use crate::hunt::truncate;

/// Harvest `keywords` and upsert every unique listing into `group`.
///
/// # Errors
///
/// Returns an error if no usable keyword is given, `pages` is zero, or the
/// HTTP client cannot be built. Individual upsert failures are logged and
/// skipped.
pub(crate) async fn run_search(
    pool: &sqlx::SqlitePool,
    config: &AppConfig,
    keywords: &[String],
    group: &str,
    created_by: &str,
    pages: u32,
) -> anyhow::Result<()> {
    let keywords = normalize_keywords(keywords);
    if keywords.is_empty() {
        anyhow::bail!("at least one non-blank --keyword is required");
    }
    if pages == 0 {
        anyhow::bail!("--pages must be at least 1");
    }

    let client = JobBoardClient::from_app_config(config)?;
    let cache = Arc::new(ListingCache::from_ttl_secs(config.cache_ttl_secs));
    let harvester = Harvester::new(client, cache, pages);

    let listings = harvester.harvest(&keywords).await;
    let scraped_at = Utc::now();

    let mut saved = 0_usize;
    for listing in &listings {
        match jobscout_db::upsert_listing(pool, group, listing, created_by, scraped_at).await {
            Ok(()) => saved += 1,
            Err(e) => {
                tracing::error!(link = %listing.link, error = %e, "failed to store listing");
            }
        }
    }

    println!(
        "stored {saved} of {} listing(s) in group '{group}'",
        listings.len()
    );
    Ok(())
}

/// Print one page of `group`, followed by the token for the next page.
///
/// # Errors
///
/// Returns an error if `token` is not a token this command printed, or the
/// query fails.
pub(crate) async fn run_listings(
    pool: &sqlx::SqlitePool,
    group: &str,
    page_size: u32,
    token: Option<&str>,
) -> anyhow::Result<()> {
    let token = token
        .map(|t| {
            ContinuationToken::from_url_param(t)
                .ok_or_else(|| anyhow::anyhow!("--token is not valid UTF-8 once decoded"))
        })
        .transpose()?;

    let page = jobscout_db::list_listings_page(pool, group, page_size, token.as_ref()).await?;

    if page.listings.is_empty() {
        println!("no listings in group '{group}'; run `search` first");
        return Ok(());
    }

    println!("{:<20}{:<24}{:<30}TITLE", "KEYWORD", "SALARY", "COMPANY");
    for row in &page.listings {
        println!(
            "{:<20}{:<24}{:<30}{}",
            truncate(&row.partition_key, 18),
            truncate(&row.salary, 22),
            truncate(&row.company, 28),
            row.title
        );
        println!("    {}", row.link);
    }

    match page.next_token {
        Some(next) => println!("\nnext page: --token {}", next.to_url_param()),
        None => println!("\n(last page)"),
    }
    Ok(())
}
