use crate::app_config::{AppConfig, Environment, ProviderUrls};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// Every setting has a default; the service starts with no environment at all.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("WANDERLENS_ENV", "development"));
    let bind_addr = parse_addr("WANDERLENS_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("WANDERLENS_LOG_LEVEL", "info");

    let http_timeout_secs = parse_u64("WANDERLENS_HTTP_TIMEOUT_SECS", "10")?;
    let user_agent = or_default(
        "WANDERLENS_USER_AGENT",
        "wanderlens/0.1 (location-image-search)",
    );
    let max_retries = parse_u32("WANDERLENS_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("WANDERLENS_RETRY_BACKOFF_BASE_SECS", "1")?;

    let images_per_source = parse_usize("WANDERLENS_IMAGES_PER_SOURCE", "30")?;
    let min_images_threshold = parse_usize("WANDERLENS_MIN_IMAGES_THRESHOLD", "15")?;

    let defaults = ProviderUrls::default();
    let provider_urls = ProviderUrls {
        openverse: or_default("WANDERLENS_OPENVERSE_BASE_URL", &defaults.openverse),
        wikimedia: or_default("WANDERLENS_WIKIMEDIA_BASE_URL", &defaults.wikimedia),
        reddit: or_default("WANDERLENS_REDDIT_BASE_URL", &defaults.reddit),
        pinterest: or_default("WANDERLENS_PINTEREST_BASE_URL", &defaults.pinterest),
        flickr: or_default("WANDERLENS_FLICKR_BASE_URL", &defaults.flickr),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        http_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        images_per_source,
        min_images_threshold,
        provider_urls,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
