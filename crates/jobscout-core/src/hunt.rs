//! Hunt configuration: search queries, run settings, pre-filter rules and the
//! weighted keyword rubric, loaded once per run from YAML.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keyword: String,
    /// Human-readable label used in logs.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    pub max_pages_per_query: u32,
    /// Scored listings below this total are not recorded in the tracker.
    pub min_score_to_persist: u32,
    /// Scored listings at or above this total get an exported folder.
    pub min_score_to_save_folder: u32,
    /// Pause between consecutive deep fetches.
    pub deep_analysis_pause_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub allowed_locations: Vec<String>,
    #[serde(default)]
    pub excluded_title_keywords: Vec<String>,
    pub required_title_keywords: Vec<String>,
    /// Monthly salary floor; listings with an unknown salary are never rejected by it.
    #[serde(alias = "min_salary_pln")]
    pub min_salary_monthly: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub weight: f64,
    /// Order matters: the first two entries are the primary keywords.
    pub keywords: Vec<String>,
}

/// Category name → rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringConfig {
    pub categories: BTreeMap<String, CategoryRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntConfig {
    pub search_queries: Vec<SearchQuery>,
    pub settings: RunSettings,
    pub filters: FilterConfig,
    pub scoring_weights: ScoringConfig,
}

impl HuntConfig {
    /// Query keywords trimmed and deduplicated, in configuration order.
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.search_queries
            .iter()
            .map(|q| q.keyword.trim().to_string())
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .collect()
    }
}

/// Load and validate the hunt configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_hunt_config(path: &Path) -> Result<HuntConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::HuntFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_hunt_config(&content)
}

/// Parse and validate a hunt configuration document.
///
/// # Errors
///
/// Returns [`ConfigError::HuntFileParse`] when a required section or key is
/// missing, or [`ConfigError::Validation`] when a value is out of range.
pub fn parse_hunt_config(content: &str) -> Result<HuntConfig, ConfigError> {
    let hunt: HuntConfig = serde_yaml::from_str(content).map_err(ConfigError::HuntFileParse)?;
    validate_hunt(&hunt)?;
    Ok(hunt)
}

fn validate_hunt(hunt: &HuntConfig) -> Result<(), ConfigError> {
    if hunt.search_queries.is_empty() {
        return Err(ConfigError::Validation(
            "at least one search query is required".to_string(),
        ));
    }

    for query in &hunt.search_queries {
        if query.keyword.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "search query '{}' has an empty keyword",
                query.description
            )));
        }
    }

    if hunt.settings.max_pages_per_query == 0 {
        return Err(ConfigError::Validation(
            "settings.max_pages_per_query must be at least 1".to_string(),
        ));
    }

    let pause = hunt.settings.deep_analysis_pause_secs;
    if !pause.is_finite() || pause < 0.0 {
        return Err(ConfigError::Validation(format!(
            "settings.deep_analysis_pause_secs must be a non-negative number, got {pause}"
        )));
    }

    if hunt.filters.allowed_locations.is_empty() {
        return Err(ConfigError::Validation(
            "filters.allowed_locations must list at least one location".to_string(),
        ));
    }

    if hunt.scoring_weights.categories.is_empty() {
        return Err(ConfigError::Validation(
            "scoring_weights must define at least one category".to_string(),
        ));
    }

    for (name, rule) in &hunt.scoring_weights.categories {
        if !rule.weight.is_finite() || rule.weight <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "scoring category '{name}' has invalid weight {}; must be > 0",
                rule.weight
            )));
        }
        if rule.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "scoring category '{name}' has no keywords"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "hunt_test.rs"]
mod tests;
