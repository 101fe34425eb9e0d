//! Environment-backed configuration.
//!
//! # Responsibility
//! - Load the store location and runtime environment from the process
//!   environment, with optional `.env` overlay.
//! - Enumerate every recognized key statically; no runtime discovery.
//!
//! # Invariants
//! - `DB_NAME` is the only required key; missing it is a hard error.
//! - Unknown `APP_ENV` values are rejected instead of silently defaulted.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const KEY_DB_NAME: &str = "DB_NAME";
const KEY_APP_ENV: &str = "APP_ENV";
const KEY_LOG_DIR: &str = "LOG_DIR";

/// Runtime environment the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    #[default]
    Development,
    Production,
}

impl AppEnv {
    /// Default log level for this environment.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production => "info",
        }
    }
}

/// Typed configuration error naming the offending key.
#[derive(Debug)]
pub enum ConfigError {
    MissingKey(&'static str),
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "missing required environment variable {key}"),
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid value `{value}` for {key}; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

/// Process configuration consumed by the core.
///
/// Only the store descriptor and ambient logging knobs live here; the
/// transport layer carries its own configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database path (`:memory:` is accepted).
    pub db_path: String,
    pub app_env: AppEnv,
    /// Absolute directory for file logging. Logging is skipped when unset.
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// A `.env` file in the working directory is overlaid first when
    /// present; its absence is not an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let db_path = required(KEY_DB_NAME)?;
        let app_env = match optional(KEY_APP_ENV) {
            None => AppEnv::default(),
            Some(value) => parse_app_env(&value)?,
        };
        let log_dir = optional(KEY_LOG_DIR).map(PathBuf::from);

        Ok(Self {
            db_path,
            app_env,
            log_dir,
        })
    }
}

fn parse_app_env(value: &str) -> Result<AppEnv, ConfigError> {
    match value {
        "development" => Ok(AppEnv::Development),
        "production" => Ok(AppEnv::Production),
        _ => Err(ConfigError::InvalidValue {
            key: KEY_APP_ENV,
            value: value.to_string(),
            expected: "development|production",
        }),
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::MissingKey(key))
}

fn optional(key: &'static str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_app_env, AppEnv, Config, ConfigError, KEY_APP_ENV, KEY_DB_NAME};
    use std::env;
    use std::sync::Mutex;

    // from_env reads process globals; serialize the tests that mutate them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn parse_app_env_accepts_known_environments() {
        assert_eq!(parse_app_env("development").unwrap(), AppEnv::Development);
        assert_eq!(parse_app_env("production").unwrap(), AppEnv::Production);
    }

    #[test]
    fn parse_app_env_rejects_unknown_values() {
        match parse_app_env("staging") {
            Err(ConfigError::InvalidValue { key, value, .. }) => {
                assert_eq!(key, KEY_APP_ENV);
                assert_eq!(value, "staging");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn from_env_without_db_name_reports_the_missing_key() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var(KEY_DB_NAME);
        env::remove_var(KEY_APP_ENV);

        match Config::from_env() {
            Err(ConfigError::MissingKey(key)) => assert_eq!(key, KEY_DB_NAME),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn from_env_with_bad_app_env_reports_the_invalid_value() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var(KEY_DB_NAME, ":memory:");
        env::set_var(KEY_APP_ENV, "staging");

        let result = Config::from_env();
        env::remove_var(KEY_DB_NAME);
        env::remove_var(KEY_APP_ENV);

        match result {
            Err(ConfigError::InvalidValue { key, value, .. }) => {
                assert_eq!(key, KEY_APP_ENV);
                assert_eq!(value, "staging");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn from_env_defaults_to_development_without_app_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var(KEY_DB_NAME, ":memory:");
        env::remove_var(KEY_APP_ENV);

        let result = Config::from_env();
        env::remove_var(KEY_DB_NAME);

        let config = result.unwrap();
        assert_eq!(config.db_path, ":memory:");
        assert_eq!(config.app_env, AppEnv::Development);
    }
}
