//! Per-match export folders with a markdown copy of the offer and its score.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use jobscout_scraper::ScoredListing;

pub(crate) const OFFER_FILE: &str = "00_OFFER.md";
pub(crate) const ANALYSIS_FILE: &str = "01_ANALYSIS.md";

const MAX_TITLE_CHARS: usize = 50;

/// `"{date} ( {company} ) {title}"`, with the title cut to 50 characters and
/// path separators replaced by `-`.
pub(crate) fn folder_name(date: NaiveDate, company: &str, title: &str) -> String {
    let title: String = title.chars().take(MAX_TITLE_CHARS).collect();
    format!(
        "{} ( {} ) {}",
        date.format("%Y-%m-%d"),
        strip_separators(company.trim()),
        strip_separators(title.trim())
    )
}

fn strip_separators(text: &str) -> String {
    text.replace(['/', '\\'], "-")
}

/// Write the offer and analysis files for `scored` under `export_dir`.
///
/// Re-exporting the same listing on the same day overwrites both files.
/// Returns the folder that was written.
///
/// # Errors
///
/// Returns an error if the folder or either file cannot be written.
pub(crate) fn export_match(
    export_dir: &Path,
    scored: &ScoredListing,
    date: NaiveDate,
) -> std::io::Result<PathBuf> {
    let detail = &scored.detail;
    let folder = export_dir.join(folder_name(date, &detail.company, &detail.title));
    std::fs::create_dir_all(&folder)?;

    std::fs::write(folder.join(OFFER_FILE), render_offer(scored))?;
    std::fs::write(folder.join(ANALYSIS_FILE), render_analysis(scored))?;
    Ok(folder)
}

pub(crate) fn render_offer(scored: &ScoredListing) -> String {
    let detail = &scored.detail;
    let mut out = String::new();

    let _ = writeln!(out, "# {}\n", detail.title);
    let _ = writeln!(
        out,
        "## Match: {}% ({})\n",
        scored.score.score, scored.score.verdict
    );
    let _ = writeln!(out, "**Company:** {}", detail.company);
    let _ = writeln!(out, "**Location:** {}", detail.location);
    let _ = writeln!(out, "**Salary:** {}", detail.salary);
    let _ = writeln!(out, "**Link:** {}", detail.link);
    if !detail.expiration_date.is_empty() {
        let _ = writeln!(out, "**Expires:** {}", detail.expiration_date);
    }

    for (heading, items) in [
        ("Responsibilities", &detail.responsibilities),
        ("Requirements", &detail.requirements),
        ("Offered", &detail.offered),
        ("Benefits", &detail.benefits),
    ] {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n### {heading}");
        for item in items {
            let _ = writeln!(out, "- {item}");
        }
    }

    out
}

pub(crate) fn render_analysis(scored: &ScoredListing) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Analysis\n");
    let _ = writeln!(out, "Score: {}%", scored.score.score);
    let _ = writeln!(out, "Verdict: {}", scored.score.verdict);
    let _ = writeln!(out, "Status: {}", scored.score.status);
    if scored.monthly_salary > 0 {
        let _ = writeln!(out, "Monthly salary: {}", scored.monthly_salary);
    }

    let _ = writeln!(out, "\n## Breakdown");
    for (category, points) in &scored.score.breakdown {
        let _ = writeln!(out, "- {category}: {points}");
    }

    out
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
