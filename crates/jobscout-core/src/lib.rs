pub mod app_config;
pub mod config;
pub mod filter;
pub mod hunt;
pub mod listing;
pub mod page;
pub mod scoring;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{passes_salary_floor, pre_filter, RejectReason};
pub use hunt::{
    load_hunt_config, parse_hunt_config, CategoryRule, FilterConfig, HuntConfig, RunSettings,
    ScoringConfig, SearchQuery,
};
pub use listing::{
    ListingDetail, ListingSummary, ScoreResult, Verdict, WorkflowStatus, NOT_AVAILABLE,
    SALARY_NOT_PROVIDED,
};
pub use page::ContinuationToken;
pub use scoring::{extract_salary, score_listing};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read hunt config at {path}: {source}")]
    HuntFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse hunt config: {0}")]
    HuntFileParse(#[source] serde_yaml::Error),

    #[error("hunt config validation failed: {0}")]
    Validation(String),
}
