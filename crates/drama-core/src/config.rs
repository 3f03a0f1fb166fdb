use crate::app_config::{AppConfig, Preset, RedditCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The preset is resolved first and supplies defaults for the posting-site
/// fields; every field can still be overridden individually.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got '{raw}'"),
            }),
            Err(_) => Ok(default),
        }
    };

    let preset: Preset = or_default("DRAMA_PRESET", "local-test").parse()?;

    let site = or_default("DRAMA_SITE", preset.default_site());
    let https = parse_bool("DRAMA_HTTPS", preset.default_https())?;
    let auth_token = match (lookup("DRAMA_AUTH_TOKEN"), preset.default_auth_token()) {
        (Ok(token), _) => token.trim().to_string(),
        (Err(_), Some(fallback)) => fallback.to_string(),
        (Err(_), None) => return Err(ConfigError::MissingEnvVar("DRAMA_AUTH_TOKEN".to_string())),
    };
    let request_delay_secs =
        parse_u64("DRAMA_REQUEST_DELAY_SECS", preset.default_request_delay_secs())?;
    let request_timeout_secs = parse_u64("DRAMA_REQUEST_TIMEOUT_SECS", 30)?;
    let log_level = or_default("DRAMA_LOG_LEVEL", "info");
    let subreddit = or_default("DRAMA_SUBREDDIT", "all");
    let submission_limit = parse_usize("DRAMA_SUBMISSION_LIMIT", 100)?;
    let daily_cron = or_default("DRAMA_DAILY_CRON", "0 0 12 * * *");

    let reddit = RedditCredentials {
        client_id: require("REDDIT_CLIENT_ID")?,
        client_secret: require("REDDIT_CLIENT_SECRET")?,
        user_agent: require("REDDIT_USER_AGENT")?,
    };

    Ok(AppConfig {
        preset,
        site,
        https,
        auth_token,
        request_delay_secs,
        request_timeout_secs,
        log_level,
        subreddit,
        submission_limit,
        daily_cron,
        reddit,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
