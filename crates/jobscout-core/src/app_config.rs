use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings read from the environment.
///
/// The keyword rubric and filters live in the hunt file pointed to by
/// `hunt_config_path`; see [`crate::hunt::load_hunt_config`].
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub hunt_config_path: PathBuf,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub export_dir: PathBuf,
    pub search_base_url: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Ceiling on in-flight search-page fetches across all keywords.
    pub scraper_max_concurrent_fetches: usize,
    pub scraper_max_attempts: u32,
    pub scraper_jitter_min_ms: u64,
    pub scraper_jitter_max_ms: u64,
    pub scraper_blocked_cooldown_min_ms: u64,
    pub scraper_blocked_cooldown_max_ms: u64,
    pub cache_ttl_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("hunt_config_path", &self.hunt_config_path)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("export_dir", &self.export_dir)
            .field("search_base_url", &self.search_base_url)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field(
                "scraper_max_concurrent_fetches",
                &self.scraper_max_concurrent_fetches,
            )
            .field("scraper_max_attempts", &self.scraper_max_attempts)
            .field("scraper_jitter_min_ms", &self.scraper_jitter_min_ms)
            .field("scraper_jitter_max_ms", &self.scraper_jitter_max_ms)
            .field(
                "scraper_blocked_cooldown_min_ms",
                &self.scraper_blocked_cooldown_min_ms,
            )
            .field(
                "scraper_blocked_cooldown_max_ms",
                &self.scraper_blocked_cooldown_max_ms,
            )
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}
