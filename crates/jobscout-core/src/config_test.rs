use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "JOBSCOUT_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.hunt_config_path, PathBuf::from("./config/hunt.yaml"));
    assert_eq!(cfg.database_url, "sqlite:jobscout.db?mode=rwc");
    assert_eq!(cfg.db_max_connections, 5);
    assert_eq!(cfg.db_acquire_timeout_secs, 10);
    assert_eq!(cfg.search_base_url, "https://www.pracuj.pl");
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_max_concurrent_fetches, 2);
    assert_eq!(cfg.scraper_max_attempts, 3);
    assert_eq!(cfg.scraper_jitter_min_ms, 1000);
    assert_eq!(cfg.scraper_jitter_max_ms, 3000);
    assert_eq!(cfg.scraper_blocked_cooldown_min_ms, 5000);
    assert_eq!(cfg.scraper_blocked_cooldown_max_ms, 10000);
    assert_eq!(cfg.cache_ttl_secs, 1200);
}

#[test]
fn search_base_url_trailing_slash_is_trimmed() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_SEARCH_BASE_URL", "http://127.0.0.1:8080/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.search_base_url, "http://127.0.0.1:8080");
}

#[test]
fn max_concurrent_fetches_override() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_SCRAPER_MAX_CONCURRENT_FETCHES", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_max_concurrent_fetches, 4);
}

#[test]
fn max_concurrent_fetches_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_SCRAPER_MAX_CONCURRENT_FETCHES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_SCRAPER_MAX_CONCURRENT_FETCHES"),
        "expected InvalidEnvVar(JOBSCOUT_SCRAPER_MAX_CONCURRENT_FETCHES), got: {result:?}"
    );
}

#[test]
fn max_attempts_invalid() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_SCRAPER_MAX_ATTEMPTS", "three");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_SCRAPER_MAX_ATTEMPTS"),
        "expected InvalidEnvVar(JOBSCOUT_SCRAPER_MAX_ATTEMPTS), got: {result:?}"
    );
}

#[test]
fn jitter_range_must_be_ordered() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_SCRAPER_JITTER_MIN_MS", "4000");
    map.insert("JOBSCOUT_SCRAPER_JITTER_MAX_MS", "1000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_SCRAPER_JITTER_MAX_MS"),
        "expected InvalidEnvVar(JOBSCOUT_SCRAPER_JITTER_MAX_MS), got: {result:?}"
    );
}

#[test]
fn blocked_cooldown_range_must_be_ordered() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_SCRAPER_BLOCKED_COOLDOWN_MIN_MS", "9000");
    map.insert("JOBSCOUT_SCRAPER_BLOCKED_COOLDOWN_MAX_MS", "5000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_SCRAPER_BLOCKED_COOLDOWN_MAX_MS"),
        "expected InvalidEnvVar(JOBSCOUT_SCRAPER_BLOCKED_COOLDOWN_MAX_MS), got: {result:?}"
    );
}

#[test]
fn db_max_connections_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_DB_MAX_CONNECTIONS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_DB_MAX_CONNECTIONS"),
        "expected InvalidEnvVar(JOBSCOUT_DB_MAX_CONNECTIONS), got: {result:?}"
    );
}

#[test]
fn cache_ttl_override() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_CACHE_TTL_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.cache_ttl_secs, 60);
}

#[test]
fn debug_output_redacts_database_url() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_DATABASE_URL", "sqlite:/secret/location.db");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("/secret/location.db"));
    assert!(rendered.contains("[redacted]"));
}
