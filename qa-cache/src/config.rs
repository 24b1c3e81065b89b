//! Cache configuration: cache file path and password persistence policy.
//! Loaded from environment variables QA_CACHE_FILE and QA_PERSIST_PASSWORDS; load `.env`
//! (e.g. `dotenvy::dotenv()`) before calling [`CacheConfig::from_env`] to pick it up.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};

pub const ENV_CACHE_FILE: &str = "QA_CACHE_FILE";
pub const ENV_PERSIST_PASSWORDS: &str = "QA_PERSIST_PASSWORDS";
pub const DEFAULT_CACHE_FILE: &str = "qacache.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub path: PathBuf,
    /// Whether password answers may be written to the cache file.
    pub persist_passwords: bool,
}

impl CacheConfig {
    /// Config for `path` with password persistence off.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            persist_passwords: false,
        }
    }

    pub fn with_persist_passwords(mut self, persist_passwords: bool) -> Self {
        self.persist_passwords = persist_passwords;
        self
    }

    /// QA_CACHE_FILE defaults to `qacache.yaml`; QA_PERSIST_PASSWORDS defaults to false.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            env::var(ENV_CACHE_FILE).ok(),
            env::var(ENV_PERSIST_PASSWORDS).ok(),
        )
    }

    fn from_vars(cache_file: Option<String>, persist_passwords: Option<String>) -> Result<Self> {
        let path = cache_file
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CACHE_FILE.to_string());
        let persist_passwords = match persist_passwords {
            Some(value) => parse_flag(&value)
                .map_err(|e| anyhow::anyhow!("{} is invalid: {}", ENV_PERSIST_PASSWORDS, e))?,
            None => false,
        };
        Ok(Self {
            path: PathBuf::from(path),
            persist_passwords,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => bail!("expected true/false, got {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::from_vars(None, None).unwrap();
        assert_eq!(config, CacheConfig::new(DEFAULT_CACHE_FILE));
        assert!(!config.persist_passwords);
    }

    #[test]
    fn test_from_vars() {
        let config =
            CacheConfig::from_vars(Some("/tmp/answers.yaml".into()), Some("Yes".into())).unwrap();
        assert_eq!(config.path, PathBuf::from("/tmp/answers.yaml"));
        assert!(config.persist_passwords);

        let config = CacheConfig::from_vars(Some("  ".into()), Some("0".into())).unwrap();
        assert_eq!(config.path, PathBuf::from(DEFAULT_CACHE_FILE));
        assert!(!config.persist_passwords);
    }

    #[test]
    fn test_invalid_flag() {
        let err = CacheConfig::from_vars(None, Some("maybe".into())).unwrap_err();
        assert!(err.to_string().contains(ENV_PERSIST_PASSWORDS));
    }
}
