//! Deep-analysis phase: fetch each candidate's listing page and score it.

use std::time::Duration;

use jobscout_core::{
    extract_salary, passes_salary_floor, score_listing, HuntConfig, ListingDetail, ListingSummary,
    ScoreResult,
};

use crate::client::JobBoardClient;
use crate::detail::parse_listing_detail;
use crate::error::ScraperError;

/// A candidate that cleared every gate, with its score.
#[derive(Debug, Clone)]
pub struct ScoredListing {
    pub detail: ListingDetail,
    pub score: ScoreResult,
    /// Monthly salary derived from the listing's salary text; `0` if unknown.
    pub monthly_salary: u32,
}

/// Per-run tallies of the deep-analysis phase.
#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    pub candidates: usize,
    pub fetch_failed: usize,
    pub below_salary_floor: usize,
    pub below_min_score: usize,
    /// Listings scoring at least `min_score_to_persist`, in candidate order.
    pub matches: Vec<ScoredListing>,
}

/// Why a single candidate produced no match.
#[derive(Debug)]
pub enum Skip {
    Failed(ScraperError),
    SalaryBelowFloor(u32),
    ScoreBelowMinimum(u32),
}

/// Fetches, parses and scores one candidate.
///
/// # Errors
///
/// Returns a [`Skip`] when the page cannot be fetched or parsed, when a
/// known salary is under the configured floor, or when the score is under
/// `min_score_to_persist`.
pub async fn analyze_candidate(
    client: &JobBoardClient,
    candidate: &ListingSummary,
    hunt: &HuntConfig,
) -> Result<ScoredListing, Skip> {
    let body = client
        .fetch_listing_page(&candidate.link)
        .await
        .map_err(Skip::Failed)?;
    let detail = parse_listing_detail(&body, &candidate.link)
        .map_err(|e| Skip::Failed(e.into()))?
        .with_summary(candidate);

    let monthly_salary = extract_salary(&detail.salary);
    if !passes_salary_floor(monthly_salary, hunt.filters.min_salary_monthly) {
        return Err(Skip::SalaryBelowFloor(monthly_salary));
    }

    let score = score_listing(&detail, &hunt.scoring_weights);
    if score.score < hunt.settings.min_score_to_persist {
        return Err(Skip::ScoreBelowMinimum(score.score));
    }

    Ok(ScoredListing {
        detail,
        score,
        monthly_salary,
    })
}

/// Analyzes candidates one at a time, pausing
/// `settings.deep_analysis_pause_secs` between consecutive fetches.
///
/// A failure on one candidate is logged and counted; it never stops the run.
pub async fn analyze_candidates(
    client: &JobBoardClient,
    candidates: &[ListingSummary],
    hunt: &HuntConfig,
) -> AnalysisReport {
    let pause = Duration::try_from_secs_f64(hunt.settings.deep_analysis_pause_secs)
        .unwrap_or_default();
    let total = candidates.len();
    let mut report = AnalysisReport {
        candidates: total,
        ..AnalysisReport::default()
    };

    for (idx, candidate) in candidates.iter().enumerate() {
        if idx > 0 && !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
        tracing::info!(
            position = idx + 1,
            total,
            title = %candidate.title,
            company = %candidate.company,
            "deep analysis"
        );

        match analyze_candidate(client, candidate, hunt).await {
            Ok(scored) => {
                tracing::info!(
                    link = %candidate.link,
                    score = scored.score.score,
                    verdict = %scored.score.verdict,
                    "match"
                );
                report.matches.push(scored);
            }
            Err(Skip::Failed(e)) => {
                tracing::warn!(link = %candidate.link, error = %e, "deep analysis failed");
                report.fetch_failed += 1;
            }
            Err(Skip::SalaryBelowFloor(salary)) => {
                tracing::info!(link = %candidate.link, salary, "salary below floor");
                report.below_salary_floor += 1;
            }
            Err(Skip::ScoreBelowMinimum(score)) => {
                tracing::info!(link = %candidate.link, score, "score below minimum");
                report.below_min_score += 1;
            }
        }
    }

    tracing::info!(
        candidates = report.candidates,
        matches = report.matches.len(),
        failed = report.fetch_failed,
        "deep analysis complete"
    );
    report
}
