//! Quiz configuration loaded from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `QUIZ_TIME_LIMIT_SECS` | `15` |
//! | `QUIZ_SHUFFLE` | `true` |
//! | `QUIZ_BANK_PATH` | bundled question bank |
//! | `RUST_LOG` | `info` |

use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::{DEFAULT_QUESTION_TIME_LIMIT_SECS, QuizSettings};
use storage::InMemoryQuestionBank;
use tracing::Level;

use crate::error::QuizError;
use crate::quiz::QuizSession;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug)]
pub struct QuizConfig {
    pub settings: QuizSettings,
    pub bank_path: Option<PathBuf>,
    pub log_level: Level,
}

impl QuizConfig {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored outside of tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unparsable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let time_limit = match lookup("QUIZ_TIME_LIMIT_SECS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                ConfigError::InvalidValue("QUIZ_TIME_LIMIT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_QUESTION_TIME_LIMIT_SECS,
        };

        let shuffle = match lookup("QUIZ_SHUFFLE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "QUIZ_SHUFFLE".to_string(),
                    format!("'{raw}' is not a boolean"),
                )
            })?,
            None => true,
        };

        let settings = QuizSettings::new(time_limit, shuffle).map_err(|e| {
            ConfigError::InvalidValue("QUIZ_TIME_LIMIT_SECS".to_string(), e.to_string())
        })?;

        let bank_path = lookup("QUIZ_BANK_PATH")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{log_level_str}' is not a valid log level"),
            )
        })?;

        Ok(Self {
            settings,
            bank_path,
            log_level,
        })
    }

    /// Question bank named by this configuration, shuffling as configured.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Supply` if the bank file cannot be loaded.
    pub fn question_bank(&self) -> Result<InMemoryQuestionBank, QuizError> {
        let bank = match &self.bank_path {
            Some(path) => InMemoryQuestionBank::from_json_file(path)?,
            None => InMemoryQuestionBank::bundled()?,
        };
        Ok(bank.with_shuffle(self.settings.shuffle_questions()))
    }

    /// Build an unstarted session over the configured question bank.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Supply` if the bank file cannot be loaded.
    pub fn build_session(&self) -> Result<QuizSession, QuizError> {
        let bank = self.question_bank()?;
        Ok(QuizSession::new(Arc::new(bank), self.settings))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
