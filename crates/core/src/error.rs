use thiserror::Error;

use crate::model::{OptionError, QuestionError, QuizSummaryError, SettingsError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Option(#[from] OptionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Summary(#[from] QuizSummaryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OptionIndex, QuestionDraft, QuestionId, QuizSettings};

    fn build(correct: u8, limit: u32) -> Result<(), Error> {
        QuestionDraft::new("Prompt", ["a", "b", "c", "d"], correct).validate(QuestionId::new(1))?;
        QuizSettings::new(limit, true)?;
        OptionIndex::new(correct)?;
        Ok(())
    }

    #[test]
    fn model_errors_convert() {
        assert!(build(2, 15).is_ok());
        assert!(matches!(build(5, 15), Err(Error::Question(_))));
        assert!(matches!(build(2, 0), Err(Error::Settings(_))));
    }
}
