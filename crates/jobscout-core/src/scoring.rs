//! Weighted keyword rubric and salary normalization.

use std::collections::BTreeMap;

use crate::hunt::{CategoryRule, ScoringConfig};
use crate::listing::{ListingDetail, ScoreResult, Verdict, SALARY_NOT_PROVIDED};

/// Share of a category's weight earned by each primary keyword found.
const PRIMARY_KEYWORD_SHARE: f64 = 0.4;

/// Number of leading keywords in a category treated as primary.
const PRIMARY_KEYWORD_COUNT: usize = 2;

/// Flat bonus when any non-primary keyword is found.
const BONUS_POINTS: f64 = 10.0;

const MAX_SCORE: u32 = 100;

/// Substrings (lowercase, whitespace removed) that mark a salary as annual.
const ANNUAL_MARKERS: [&str; 4] = ["rok", "rocz", "year", "annual"];

/// Scores a listing against every category of the rubric.
///
/// The text searched is the lowercased concatenation of the title,
/// description, responsibilities and requirements. Each category earns
/// 40% of its weight per primary keyword present, plus a flat 10 points
/// if any remaining keyword is present, capped at the category weight.
#[must_use]
pub fn score_listing(detail: &ListingDetail, config: &ScoringConfig) -> ScoreResult {
    let blob = scoring_blob(detail);

    let mut total = 0.0_f64;
    let mut breakdown = BTreeMap::new();

    for (name, rule) in &config.categories {
        let contribution = category_score(&blob, rule);
        breakdown.insert(name.clone(), truncate_points(contribution));
        total += contribution;
    }

    let score = truncate_points(total).min(MAX_SCORE);
    let verdict = Verdict::from_score(score);

    ScoreResult {
        score,
        breakdown,
        verdict,
        status: verdict.workflow_status(),
    }
}

fn scoring_blob(detail: &ListingDetail) -> String {
    let responsibilities = detail.responsibilities.join(" ");
    let requirements = detail.requirements.join(" ");
    [
        detail.title.as_str(),
        detail.description(),
        responsibilities.as_str(),
        requirements.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

fn category_score(blob: &str, rule: &CategoryRule) -> f64 {
    let split = rule.keywords.len().min(PRIMARY_KEYWORD_COUNT);
    let (primary, rest) = rule.keywords.split_at(split);

    let primary_hits = primary.iter().filter(|kw| keyword_present(blob, kw)).count();
    #[allow(clippy::cast_precision_loss)]
    let primary_score = rule.weight * PRIMARY_KEYWORD_SHARE * primary_hits as f64;

    let bonus = if rest.iter().any(|kw| keyword_present(blob, kw)) {
        BONUS_POINTS
    } else {
        0.0
    };

    (primary_score + bonus).min(rule.weight)
}

fn keyword_present(blob: &str, keyword: &str) -> bool {
    let needle = keyword.trim().to_lowercase();
    !needle.is_empty() && blob.contains(&needle)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_points(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.trunc().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Normalizes a free-text salary into a monthly figure.
///
/// Whitespace is stripped and decimal commas become dots before the first
/// run of digits is taken as the amount. Annual amounts are divided by 12.
/// Returns `0` (unknown) when the text has no digits or carries the
/// "not provided" marker.
#[must_use]
pub fn extract_salary(salary_text: &str) -> u32 {
    let lower = salary_text.to_lowercase();
    if lower.trim().is_empty()
        || lower.contains(&SALARY_NOT_PROVIDED.to_lowercase())
        || lower.contains("not provided")
    {
        return 0;
    }

    let compact: String = lower
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let Some(start) = compact.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    let digits: String = compact[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    let amount = digits
        .parse::<u64>()
        .map_or(u32::MAX, |v| u32::try_from(v).unwrap_or(u32::MAX));

    if ANNUAL_MARKERS.iter().any(|m| compact.contains(m)) {
        amount / 12
    } else {
        amount
    }
}

#[cfg(test)]
#[path = "scoring_test.rs"]
mod tests;
