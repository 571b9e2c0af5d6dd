//! Harness configuration
//!
//! All settings come from environment variables:
//! - `MYSQL_USER` - client user name (default `root`)
//! - `MYSQL_PASSWORD` - client password (default empty)
//! - `SQLGRADE_MYSQL_BIN` - client program (default `mysql`)
//! - `SQLGRADE_SCRIPT_DIR` - directory holding the exercise scripts (default `.`)
//! - `SQLGRADE_TIMEOUT_SECS` - per-call timeout in seconds (default 10)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default client user
pub const DEFAULT_USER: &str = "root";

/// Default client program
pub const DEFAULT_CLIENT: &str = "mysql";

/// Default per-call timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_USER: &str = "MYSQL_USER";
pub const ENV_PASSWORD: &str = "MYSQL_PASSWORD";
pub const ENV_CLIENT: &str = "SQLGRADE_MYSQL_BIN";
pub const ENV_SCRIPT_DIR: &str = "SQLGRADE_SCRIPT_DIR";
pub const ENV_TIMEOUT: &str = "SQLGRADE_TIMEOUT_SECS";

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Settings shared by every checker in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub user: String,
    pub password: String,
    pub client_program: String,
    pub script_dir: PathBuf,
    pub timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            client_program: DEFAULT_CLIENT.to_string(),
            script_dir: PathBuf::from("."),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl HarnessConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HarnessConfig::default();

        let timeout = match lookup(ENV_TIMEOUT) {
            Some(raw) => Duration::from_secs(parse_timeout(&raw)?),
            None => defaults.timeout,
        };

        Ok(HarnessConfig {
            user: lookup(ENV_USER).unwrap_or(defaults.user),
            password: lookup(ENV_PASSWORD).unwrap_or(defaults.password),
            client_program: lookup(ENV_CLIENT)
                .filter(|p| !p.is_empty())
                .unwrap_or(defaults.client_program),
            script_dir: lookup(ENV_SCRIPT_DIR)
                .filter(|d| !d.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.script_dir),
            timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason| ConfigError::InvalidValue {
        var: ENV_TIMEOUT,
        value: raw.to_string(),
        reason,
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be at least 1 second")),
        Ok(secs) => Ok(secs),
        Err(_) => Err(invalid("not a whole number of seconds")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = HarnessConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.user, "root");
        assert_eq!(config.password, "");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_credentials_from_env() {
        let config = HarnessConfig::from_lookup(lookup_from(&[
            (ENV_USER, "grader"),
            (ENV_PASSWORD, "s3cret"),
            (ENV_SCRIPT_DIR, "/tmp/student"),
            (ENV_TIMEOUT, "3"),
        ]))
        .unwrap();
        assert_eq!(config.user, "grader");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.script_dir, PathBuf::from("/tmp/student"));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.client_program, "mysql");
    }

    #[test]
    fn test_empty_user_is_kept() {
        // An empty user means "no -u flag", not "use the default"
        let config = HarnessConfig::from_lookup(lookup_from(&[(ENV_USER, "")])).unwrap();
        assert_eq!(config.user, "");
    }

    #[test]
    fn test_invalid_timeout() {
        let err = HarnessConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT, "ten")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: ENV_TIMEOUT, .. }));

        let err = HarnessConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT, "0")])).unwrap_err();
        assert!(err.to_string().contains("at least 1 second"));
    }
}
