// src/config.rs

use std::{env, path::PathBuf, str::FromStr};

use dotenvy::dotenv;
use thiserror::Error;

/// An environment variable that is set but cannot be used.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL URL. Without it respondents are kept in memory.
    pub database_url: Option<String>,
    pub rust_log: String,
    pub host: String,
    pub port: u16,
    /// Prefix every route is nested under, e.g. `/api/v1`.
    pub api_prefix: String,
    /// Number of questions sampled for a new respondent.
    pub question_count: usize,
    /// JSON question bank replacing the built-in one.
    pub question_bank_path: Option<PathBuf>,
    /// Subject listing root of the book catalog.
    pub books_base_url: String,
    /// Fixed seed for question sampling.
    pub quiz_seed: Option<u64>,
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            rust_log: "info".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_prefix: "/api/v1".to_string(),
            question_count: 2,
            question_bank_path: None,
            books_base_url: "https://www.ebooks.com/en-gh/subjects".to_string(),
            quiz_seed: None,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let defaults = Self::default();

        let allowed_origins = match optional("ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            None => defaults.allowed_origins,
        };

        Ok(Self {
            database_url: optional("DATABASE_URL"),
            rust_log: optional("RUST_LOG").unwrap_or(defaults.rust_log),
            host: optional("SERVER_HOST").unwrap_or(defaults.host),
            port: parsed("SERVER_PORT")?.unwrap_or(defaults.port),
            api_prefix: optional("API_PREFIX").unwrap_or(defaults.api_prefix),
            question_count: parsed("QUESTION_COUNT")?.unwrap_or(defaults.question_count),
            question_bank_path: optional("QUESTION_BANK_PATH").map(PathBuf::from),
            books_base_url: optional("BOOKS_BASE_URL").unwrap_or(defaults.books_base_url),
            quiz_seed: parsed("QUIZ_SEED")?,
            allowed_origins,
        })
    }
}

/// Reads a variable, treating an empty value as unset.
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    optional(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidValue { key, value: raw })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_rejects_invalid_number() {
        // Unique key, tests run in parallel within one process.
        unsafe { env::set_var("BOOKMATCH_TEST_BAD_PORT", "80a") };
        let err = parsed::<u16>("BOOKMATCH_TEST_BAD_PORT").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "BOOKMATCH_TEST_BAD_PORT",
                value: "80a".to_string()
            }
        );
        assert_eq!(err.to_string(), "BOOKMATCH_TEST_BAD_PORT has an invalid value: '80a'");
    }

    #[test]
    fn test_parsed_treats_blank_as_unset() {
        unsafe { env::set_var("BOOKMATCH_TEST_BLANK_COUNT", "  ") };
        assert_eq!(parsed::<usize>("BOOKMATCH_TEST_BLANK_COUNT").unwrap(), None);
    }
}
