use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Marker the job board uses when a listing carries no salary information.
pub const SALARY_NOT_PROVIDED: &str = "Nie podano";

/// Placeholder for scalar detail fields missing from the payload.
pub const NOT_AVAILABLE: &str = "N/A";

/// One posting as it appears on a search-results page for `keyword`.
///
/// `link` is the natural identity of a posting; records without one never
/// leave the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub keyword: String,
    pub title: String,
    pub company: String,
    /// Free text, e.g. `"9 000–12 000 zł brutto / mies."`, or [`SALARY_NOT_PROVIDED`].
    pub salary_text: String,
    pub location: String,
    pub link: String,
    /// `<li>` items of the board's generated summary joined with `" | "`.
    pub requirements_summary: String,
}

/// Full record for one posting, produced by a deep fetch of its `link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDetail {
    /// Search keyword the listing was found under; empty until merged with a summary.
    pub keyword: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    pub requirements_summary: String,
    /// Salary text as shown on the search-results page; the detail page's
    /// own breakdown is in `salary`.
    pub salary_text: String,
    pub offer_id: String,
    pub publication_date: String,
    pub expiration_date: String,
    pub is_active: bool,
    pub region: String,
    pub position_levels: Vec<String>,
    pub work_schedules: Vec<String>,
    pub contract_types: Vec<String>,
    pub work_modes: Vec<String>,
    pub remote_work: bool,
    /// `"parent > child"` category labels.
    pub categories: Vec<String>,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub offered: Vec<String>,
    pub benefits: Vec<String>,
    pub about_company: Vec<String>,
    pub salary: String,
}

impl ListingDetail {
    /// Carries the search-phase context (keyword, summary and salary text)
    /// onto a freshly parsed detail record.
    #[must_use]
    pub fn with_summary(mut self, summary: &ListingSummary) -> Self {
        self.keyword.clone_from(&summary.keyword);
        self.requirements_summary
            .clone_from(&summary.requirements_summary);
        self.salary_text.clone_from(&summary.salary_text);
        if self.title == NOT_AVAILABLE && !summary.title.is_empty() {
            self.title.clone_from(&summary.title);
        }
        if self.company == NOT_AVAILABLE && !summary.company.is_empty() {
            self.company.clone_from(&summary.company);
        }
        self
    }

    /// Free-text description used by the scoring blob.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.requirements_summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    MustApply,
    StrongMatch,
    Maybe,
    Reject,
}

impl Verdict {
    /// Maps a total score onto its verdict band.
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            85.. => Verdict::MustApply,
            70..=84 => Verdict::StrongMatch,
            50..=69 => Verdict::Maybe,
            _ => Verdict::Reject,
        }
    }

    #[must_use]
    pub fn workflow_status(self) -> WorkflowStatus {
        match self {
            Verdict::MustApply | Verdict::StrongMatch => WorkflowStatus::Lead,
            Verdict::Maybe => WorkflowStatus::Holding,
            Verdict::Reject => WorkflowStatus::Rejected,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::MustApply => write!(f, "must apply"),
            Verdict::StrongMatch => write!(f, "strong match"),
            Verdict::Maybe => write!(f, "maybe"),
            Verdict::Reject => write!(f, "reject"),
        }
    }
}

/// Status label handed to the tracker log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStatus {
    Lead,
    Holding,
    Rejected,
}

impl WorkflowStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStatus::Lead => "Lead",
            WorkflowStatus::Holding => "Holding",
            WorkflowStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Total match score in `0..=100`.
    pub score: u32,
    /// Per-category contribution, truncated to whole points.
    pub breakdown: BTreeMap<String, u32>,
    pub verdict: Verdict,
    pub status: WorkflowStatus,
}
