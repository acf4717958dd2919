//! The `hunt` command: the full harvest → filter → analyze → record run.
//!
//! Per-listing failures while recording or exporting are logged and skipped
//! so one bad row does not abort the rest of the run.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use jobscout_core::AppConfig;
use jobscout_scraper::{
    analyze_candidates, select_candidates, AnalysisReport, Harvester, JobBoardClient,
    ListingCache,
};

use crate::export::export_match;

/// Run the whole pipeline over the hunt configuration.
///
/// When `dry_run` is `true` the matches are printed and nothing is written
/// to the tracker or the export directory.
///
/// # Errors
///
/// Returns an error if the hunt file cannot be loaded or the HTTP client
/// cannot be built. Fetch, record and export failures are logged only.
pub(crate) async fn run_hunt(
    pool: &sqlx::SqlitePool,
    config: &AppConfig,
    hunt_path: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let hunt_path = hunt_path.unwrap_or(&config.hunt_config_path);
    let hunt = jobscout_core::load_hunt_config(hunt_path)?;
    let keywords = hunt.keywords();

    tracing::info!(
        path = %hunt_path.display(),
        queries = keywords.len(),
        dry_run,
        "starting hunt"
    );
    for query in &hunt.search_queries {
        tracing::debug!(keyword = %query.keyword, description = %query.description, "query");
    }

    let client = JobBoardClient::from_app_config(config)?;
    let cache = Arc::new(ListingCache::from_ttl_secs(config.cache_ttl_secs));
    let harvester = Harvester::new(client, cache, hunt.settings.max_pages_per_query);

    let listings = harvester.harvest(&keywords).await;
    let harvested = listings.len();
    let candidates = select_candidates(listings, &hunt.filters);
    println!(
        "harvested {harvested} unique listing(s); {} passed the pre-filter",
        candidates.len()
    );

    let report = analyze_candidates(harvester.client(), &candidates, &hunt).await;
    print_report(&report);

    if dry_run {
        println!("dry run: nothing recorded or exported");
        return Ok(());
    }

    let now = Utc::now();
    let mut recorded = 0_usize;
    let mut exported = 0_usize;
    for scored in &report.matches {
        let detail = &scored.detail;
        match jobscout_db::record_offer(
            pool,
            &detail.company,
            &detail.title,
            &detail.location,
            &detail.link,
            scored.score.status.as_str(),
            now,
        )
        .await
        {
            Ok(offer_id) => {
                recorded += 1;
                tracing::debug!(offer_id, link = %detail.link, "offer recorded");
            }
            Err(e) => {
                tracing::error!(link = %detail.link, error = %e, "failed to record offer");
            }
        }

        if scored.score.score >= hunt.settings.min_score_to_save_folder {
            match export_match(&config.export_dir, scored, now.date_naive()) {
                Ok(folder) => {
                    exported += 1;
                    tracing::info!(folder = %folder.display(), "exported");
                }
                Err(e) => {
                    tracing::warn!(link = %detail.link, error = %e, "export failed");
                }
            }
        }
    }

    println!("recorded {recorded} offer(s); exported {exported} folder(s)");
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!(
        "analyzed {}: {} match(es), {} below salary floor, {} below min score, {} failed",
        report.candidates,
        report.matches.len(),
        report.below_salary_floor,
        report.below_min_score,
        report.fetch_failed
    );
    if report.matches.is_empty() {
        return;
    }

    println!("{:<7}{:<14}{:<10}{:<30}TITLE", "SCORE", "VERDICT", "STATUS", "COMPANY");
    for scored in &report.matches {
        println!(
            "{:<7}{:<14}{:<10}{:<30}{}",
            scored.score.score,
            scored.score.verdict.to_string(),
            scored.score.status.as_str(),
            truncate(&scored.detail.company, 28),
            scored.detail.title
        );
    }
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
