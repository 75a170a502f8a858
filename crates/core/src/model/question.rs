use serde::Serialize;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::option::{OPTION_COUNT, OptionError, OptionIndex};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("answer option {0} cannot be empty")]
    EmptyOption(OptionIndex),

    #[error("invalid correct option: {0}")]
    InvalidCorrectOption(#[from] OptionError),
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as it arrives from a question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: [String; OPTION_COUNT],
    pub correct: u8,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(prompt: impl Into<String>, options: [&str; OPTION_COUNT], correct: u8) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.map(str::to_owned),
            correct,
        }
    }

    /// Validate the draft and assign it an id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` or `QuestionError::EmptyOption` for blank text,
    /// and `QuestionError::InvalidCorrectOption` if `correct` is outside 1..=4.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        for (option, text) in OptionIndex::all().zip(self.options.iter()) {
            if text.trim().is_empty() {
                return Err(QuestionError::EmptyOption(option));
            }
        }
        let correct = OptionIndex::new(self.correct)?;

        Ok(Question {
            id,
            prompt: self.prompt,
            options: self.options,
            correct,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Immutable multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct: OptionIndex,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: OptionIndex) -> &str {
        &self.options[index.zero_based()]
    }

    #[must_use]
    pub fn correct(&self) -> OptionIndex {
        self.correct
    }

    #[must_use]
    pub fn is_correct(&self, choice: OptionIndex) -> bool {
        self.correct == choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(correct: u8) -> QuestionDraft {
        QuestionDraft::new(
            "Which planet is known as the Red Planet?",
            ["Venus", "Mars", "Jupiter", "Saturn"],
            correct,
        )
    }

    #[test]
    fn validates_and_exposes_options() {
        let question = draft(2).validate(QuestionId::new(7)).unwrap();
        let mars = OptionIndex::new(2).unwrap();

        assert_eq!(question.id(), QuestionId::new(7));
        assert_eq!(question.correct(), mars);
        assert_eq!(question.option(mars), "Mars");
        assert!(question.is_correct(mars));
        assert!(!question.is_correct(OptionIndex::new(1).unwrap()));
    }

    #[test]
    fn rejects_blank_prompt() {
        let mut d = draft(1);
        d.prompt = "   ".into();
        assert_eq!(d.validate(QuestionId::new(1)).unwrap_err(), QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_blank_option() {
        let mut d = draft(1);
        d.options[2] = String::new();
        assert_eq!(
            d.validate(QuestionId::new(1)).unwrap_err(),
            QuestionError::EmptyOption(OptionIndex::new(3).unwrap())
        );
    }

    #[test]
    fn rejects_correct_index_out_of_range() {
        let err = draft(0).validate(QuestionId::new(1)).unwrap_err();
        assert_eq!(
            err,
            QuestionError::InvalidCorrectOption(OptionError::OutOfRange(0))
        );
    }
}
