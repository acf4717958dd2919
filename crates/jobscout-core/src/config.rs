use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("JOBSCOUT_ENV", "development"))?;
    let log_level = or_default("JOBSCOUT_LOG_LEVEL", "info");
    let hunt_config_path = PathBuf::from(or_default("JOBSCOUT_HUNT_CONFIG", "./config/hunt.yaml"));
    let database_url = or_default("JOBSCOUT_DATABASE_URL", "sqlite:jobscout.db?mode=rwc");
    let db_max_connections = parse_u32("JOBSCOUT_DB_MAX_CONNECTIONS", "5")?;
    if db_max_connections == 0 {
        return Err(invalid(
            "JOBSCOUT_DB_MAX_CONNECTIONS",
            "must be at least 1".to_string(),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("JOBSCOUT_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let export_dir = PathBuf::from(or_default("JOBSCOUT_EXPORT_DIR", "./matches"));
    let search_base_url = or_default("JOBSCOUT_SEARCH_BASE_URL", "https://www.pracuj.pl")
        .trim_end_matches('/')
        .to_string();

    let scraper_request_timeout_secs = parse_u64("JOBSCOUT_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default("JOBSCOUT_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);

    let scraper_max_concurrent_fetches =
        parse_usize("JOBSCOUT_SCRAPER_MAX_CONCURRENT_FETCHES", "2")?;
    if scraper_max_concurrent_fetches == 0 {
        return Err(invalid(
            "JOBSCOUT_SCRAPER_MAX_CONCURRENT_FETCHES",
            "must be at least 1".to_string(),
        ));
    }

    let scraper_max_attempts = parse_u32("JOBSCOUT_SCRAPER_MAX_ATTEMPTS", "3")?;
    if scraper_max_attempts == 0 {
        return Err(invalid(
            "JOBSCOUT_SCRAPER_MAX_ATTEMPTS",
            "must be at least 1".to_string(),
        ));
    }

    let scraper_jitter_min_ms = parse_u64("JOBSCOUT_SCRAPER_JITTER_MIN_MS", "1000")?;
    let scraper_jitter_max_ms = parse_u64("JOBSCOUT_SCRAPER_JITTER_MAX_MS", "3000")?;
    if scraper_jitter_min_ms > scraper_jitter_max_ms {
        return Err(invalid(
            "JOBSCOUT_SCRAPER_JITTER_MAX_MS",
            format!("must be >= JOBSCOUT_SCRAPER_JITTER_MIN_MS ({scraper_jitter_min_ms})"),
        ));
    }

    let scraper_blocked_cooldown_min_ms =
        parse_u64("JOBSCOUT_SCRAPER_BLOCKED_COOLDOWN_MIN_MS", "5000")?;
    let scraper_blocked_cooldown_max_ms =
        parse_u64("JOBSCOUT_SCRAPER_BLOCKED_COOLDOWN_MAX_MS", "10000")?;
    if scraper_blocked_cooldown_min_ms > scraper_blocked_cooldown_max_ms {
        return Err(invalid(
            "JOBSCOUT_SCRAPER_BLOCKED_COOLDOWN_MAX_MS",
            format!(
                "must be >= JOBSCOUT_SCRAPER_BLOCKED_COOLDOWN_MIN_MS ({scraper_blocked_cooldown_min_ms})"
            ),
        ));
    }

    let cache_ttl_secs = parse_u64("JOBSCOUT_CACHE_TTL_SECS", "1200")?;

    Ok(AppConfig {
        env,
        log_level,
        hunt_config_path,
        database_url,
        db_max_connections,
        db_acquire_timeout_secs,
        export_dir,
        search_base_url,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_concurrent_fetches,
        scraper_max_attempts,
        scraper_jitter_min_ms,
        scraper_jitter_max_ms,
        scraper_blocked_cooldown_min_ms,
        scraper_blocked_cooldown_max_ms,
        cache_ttl_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "JOBSCOUT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
