use crate::app_config::{AppConfig, Environment};
use crate::prompt::DEFAULT_TEMPERATURE;
use crate::ConfigError;

/// Gemini model used when `LOCALBENCH_GEMINI_MODEL` is unset.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// API root used when `LOCALBENCH_GEMINI_BASE_URL` is unset.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Highest sampling temperature the model accepts.
const MAX_TEMPERATURE: f32 = 2.0;

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
/// Kept apart from the real environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    // A blank credential is as unusable as a missing one.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let gemini_api_key = require("GEMINI_API_KEY")?;

    let env = parse_environment(&or_default("LOCALBENCH_ENV", "development"))?;

    let bind_addr = or_default("LOCALBENCH_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("LOCALBENCH_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("LOCALBENCH_LOG_LEVEL", "info");

    let gemini_model = or_default("LOCALBENCH_GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    if gemini_model.trim().is_empty() {
        return Err(invalid("LOCALBENCH_GEMINI_MODEL", "must not be empty".to_string()));
    }
    let gemini_base_url = or_default("LOCALBENCH_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);

    let temperature = or_default("LOCALBENCH_TEMPERATURE", &DEFAULT_TEMPERATURE.to_string())
        .parse::<f32>()
        .map_err(|e| invalid("LOCALBENCH_TEMPERATURE", e.to_string()))?;
    if !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
        return Err(invalid(
            "LOCALBENCH_TEMPERATURE",
            format!("{temperature} is outside 0.0..={MAX_TEMPERATURE}"),
        ));
    }

    let request_timeout_secs = or_default("LOCALBENCH_REQUEST_TIMEOUT_SECS", "120")
        .parse::<u64>()
        .map_err(|e| invalid("LOCALBENCH_REQUEST_TIMEOUT_SECS", e.to_string()))?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "LOCALBENCH_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        temperature,
        request_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LOCALBENCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
