use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Seconds a player gets per question unless configured otherwise.
pub const DEFAULT_QUESTION_TIME_LIMIT_SECS: u32 = 15;

const MAX_QUESTION_TIME_LIMIT_SECS: u32 = 3_600;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question time limit must be between 1 and 3600 seconds, got {0}")]
    InvalidQuestionTimeLimit(u32),
}

/// Per-play-through quiz configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuizSettings", into = "RawQuizSettings")]
pub struct QuizSettings {
    question_time_limit_secs: u32,
    shuffle_questions: bool,
}

impl QuizSettings {
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidQuestionTimeLimit` if the limit is zero or above one hour.
    pub fn new(
        question_time_limit_secs: u32,
        shuffle_questions: bool,
    ) -> Result<Self, SettingsError> {
        if !(1..=MAX_QUESTION_TIME_LIMIT_SECS).contains(&question_time_limit_secs) {
            return Err(SettingsError::InvalidQuestionTimeLimit(
                question_time_limit_secs,
            ));
        }
        Ok(Self {
            question_time_limit_secs,
            shuffle_questions,
        })
    }

    #[must_use]
    pub fn question_time_limit_secs(&self) -> u32 {
        self.question_time_limit_secs
    }

    #[must_use]
    pub fn question_time_limit(&self) -> Duration {
        Duration::from_secs(u64::from(self.question_time_limit_secs))
    }

    /// When true, the question supplier reshuffles on every start and restart.
    #[must_use]
    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_time_limit_secs: DEFAULT_QUESTION_TIME_LIMIT_SECS,
            shuffle_questions: true,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawQuizSettings {
    #[serde(default = "default_time_limit")]
    question_time_limit_secs: u32,
    #[serde(default = "default_shuffle")]
    shuffle_questions: bool,
}

fn default_time_limit() -> u32 {
    DEFAULT_QUESTION_TIME_LIMIT_SECS
}

fn default_shuffle() -> bool {
    true
}

impl TryFrom<RawQuizSettings> for QuizSettings {
    type Error = SettingsError;

    fn try_from(raw: RawQuizSettings) -> Result<Self, Self::Error> {
        Self::new(raw.question_time_limit_secs, raw.shuffle_questions)
    }
}

impl From<QuizSettings> for RawQuizSettings {
    fn from(settings: QuizSettings) -> Self {
        Self {
            question_time_limit_secs: settings.question_time_limit_secs,
            shuffle_questions: settings.shuffle_questions,
        }
    }
}
