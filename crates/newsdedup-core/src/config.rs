use crate::app_config::AppConfig;
use crate::options::DEFAULT_TITLE_WINDOW_HOURS;
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
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let log_level = or_default("NEWSDEDUP_LOG_LEVEL", "info");
    let title_window_hours = match lookup("NEWSDEDUP_TITLE_WINDOW_HOURS") {
        Ok(raw) => parse_window_hours("NEWSDEDUP_TITLE_WINDOW_HOURS", &raw)?,
        Err(_) => DEFAULT_TITLE_WINDOW_HOURS,
    };

    Ok(AppConfig {
        log_level,
        title_window_hours,
    })
}

fn parse_window_hours(var: &str, raw: &str) -> Result<f64, ConfigError> {
    let hours = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
    if !hours.is_finite() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("window must be a finite number of hours, got `{raw}`"),
        });
    }
    Ok(hours)
}

#[cfg(test)]
mod tests {
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
    fn build_app_config_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert!((cfg.title_window_hours - 48.0).abs() < f64::EPSILON);
        assert_eq!(cfg.dedupe_options().window_ms(), 48 * 3_600_000);
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("NEWSDEDUP_LOG_LEVEL", "debug");
        map.insert("NEWSDEDUP_TITLE_WINDOW_HOURS", "12");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.dedupe_options().window_ms(), 12 * 3_600_000);
    }

    #[test]
    fn build_app_config_ignores_unrelated_vars() {
        let mut map = HashMap::new();
        map.insert("NEWSDEDUP_ENV", "staging");
        map.insert("NEWSDEDUP_UNUSED", "x");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.dedupe_options().window_ms(), 48 * 3_600_000);
    }

    #[test]
    fn build_app_config_rejects_non_numeric_window() {
        let mut map = HashMap::new();
        map.insert("NEWSDEDUP_TITLE_WINDOW_HOURS", "two days");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSDEDUP_TITLE_WINDOW_HOURS"),
            "expected InvalidEnvVar(NEWSDEDUP_TITLE_WINDOW_HOURS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_infinite_window() {
        let mut map = HashMap::new();
        map.insert("NEWSDEDUP_TITLE_WINDOW_HOURS", "inf");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSDEDUP_TITLE_WINDOW_HOURS"),
            "expected InvalidEnvVar(NEWSDEDUP_TITLE_WINDOW_HOURS), got: {result:?}"
        );
    }
}
