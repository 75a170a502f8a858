use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::selection::QuestionOutcome;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many outcomes for a single play-through: {len}")]
    TooManyOutcomes { len: usize },

    #[error("total questions ({total}) does not match outcome counts ({sum})")]
    CountMismatch { total: u32, sum: u32 },

    #[error("outcome counts overflow")]
    CountOverflow,
}

/// Final tally of a completed play-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total_questions: u32,
    correct: u32,
    wrong: u32,
    unanswered: u32,
}

impl QuizSummary {
    /// Build a summary from explicit counts.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`,
    /// `QuizSummaryError::CountMismatch` if the counts do not add up to `total_questions`,
    /// or `QuizSummaryError::CountOverflow` if they cannot be summed in a `u32`.
    pub fn new(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        total_questions: u32,
        correct: u32,
        wrong: u32,
        unanswered: u32,
    ) -> Result<Self, QuizSummaryError> {
        if completed_at < started_at {
            return Err(QuizSummaryError::InvalidTimeRange);
        }
        let sum = correct
            .checked_add(wrong)
            .and_then(|s| s.checked_add(unanswered))
            .ok_or(QuizSummaryError::CountOverflow)?;
        if sum != total_questions {
            return Err(QuizSummaryError::CountMismatch {
                total: total_questions,
                sum,
            });
        }

        Ok(Self {
            started_at,
            completed_at,
            total_questions,
            correct,
            wrong,
            unanswered,
        })
    }

    /// Build a summary from the per-question outcomes of a play-through.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `QuizSummaryError::TooManyOutcomes` if the count cannot fit in `u32`.
    pub fn from_outcomes(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        outcomes: &[QuestionOutcome],
    ) -> Result<Self, QuizSummaryError> {
        let mut correct = 0_u32;
        let mut wrong = 0_u32;
        let mut unanswered = 0_u32;

        for outcome in outcomes {
            match outcome {
                QuestionOutcome::Correct => correct = correct.saturating_add(1),
                QuestionOutcome::Wrong => wrong = wrong.saturating_add(1),
                QuestionOutcome::Unanswered => unanswered = unanswered.saturating_add(1),
            }
        }

        let total = u32::try_from(outcomes.len())
            .map_err(|_| QuizSummaryError::TooManyOutcomes { len: outcomes.len() })?;

        Self::new(started_at, completed_at, total, correct, wrong, unanswered)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Final score: one point per correct answer.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    #[must_use]
    pub fn unanswered(&self) -> u32 {
        self.unanswered
    }

    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}
