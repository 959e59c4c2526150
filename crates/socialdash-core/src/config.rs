use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Unlike [`load_app_config`], this does not read `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(invalid(var, "must not be empty"));
        }
        Ok(raw)
    };

    let env = parse_environment(&or_default("SOCIALDASH_ENV", "development"))?;

    let api_url = non_empty("SOCIALDASH_API_URL", "http://localhost:5000/api")?;
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(invalid("SOCIALDASH_API_URL", "must start with http:// or https://"));
    }
    let log_level = or_default("SOCIALDASH_LOG_LEVEL", "info");
    let user_agent = non_empty("SOCIALDASH_USER_AGENT", "socialdash/0.1 (metrics)")?;

    let request_timeout_secs: u64 =
        parse_number(&or_default, "SOCIALDASH_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid("SOCIALDASH_REQUEST_TIMEOUT_SECS", "must be at least 1"));
    }
    let top_n: usize = parse_number(&or_default, "SOCIALDASH_TOP_N", "10")?;

    let likes_per_view = parse_ratio(&or_default, "SOCIALDASH_LIKES_PER_VIEW", "0.05")?;
    let comments_per_like = parse_ratio(&or_default, "SOCIALDASH_COMMENTS_PER_LIKE", "0.1")?;
    let comments_per_view = parse_ratio(&or_default, "SOCIALDASH_COMMENTS_PER_VIEW", "0.02")?;
    let min_estimated_likes: u64 =
        parse_number(&or_default, "SOCIALDASH_MIN_ESTIMATED_LIKES", "1")?;
    let min_estimated_comments: u64 =
        parse_number(&or_default, "SOCIALDASH_MIN_ESTIMATED_COMMENTS", "5")?;

    Ok(AppConfig {
        env,
        api_url,
        log_level,
        request_timeout_secs,
        user_agent,
        top_n,
        likes_per_view,
        comments_per_like,
        comments_per_view,
        min_estimated_likes,
        min_estimated_comments,
    })
}

fn invalid(var: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.into(),
    }
}

fn parse_number<T, D>(or_default: &D, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: Fn(&str, &str) -> String,
{
    or_default(var, default)
        .trim()
        .parse::<T>()
        .map_err(|e| invalid(var, e.to_string()))
}

/// Parses a non-negative, finite multiplier.
fn parse_ratio<D>(or_default: &D, var: &str, default: &str) -> Result<f64, ConfigError>
where
    D: Fn(&str, &str) -> String,
{
    let ratio: f64 = parse_number(or_default, var, default)?;
    if !ratio.is_finite() || ratio < 0.0 {
        return Err(invalid(var, format!("{ratio} is not a non-negative ratio")));
    }
    Ok(ratio)
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(invalid(
            "SOCIALDASH_ENV",
            format!("unknown environment {other:?}"),
        )),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
