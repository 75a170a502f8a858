//! JSON question bank files.
//!
//! A bank is a JSON array of [`QuestionRecord`]s. Question ids are assigned
//! by position, starting at 1.

use std::fs;
use std::path::Path;

use quiz_core::model::{Question, QuestionId};
use tracing::{debug, warn};

use crate::repository::{QuestionRecord, StorageError};

/// Parse a question bank from JSON text.
///
/// # Errors
///
/// Returns `StorageError::Parse` for malformed JSON and
/// `StorageError::InvalidRecord` for the first record that fails validation.
pub fn parse_question_bank(json: &str) -> Result<Vec<Question>, StorageError> {
    let records: Vec<QuestionRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let position = i + 1;
            record
                .into_question(QuestionId::new(position as u64))
                .map_err(|source| {
                    warn!(position, error = %source, "rejected question record");
                    StorageError::InvalidRecord { position, source }
                })
        })
        .collect()
}

/// Read and parse a question bank file.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read, otherwise the errors
/// of [`parse_question_bank`].
pub fn load_question_bank(path: impl AsRef<Path>) -> Result<Vec<Question>, StorageError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let questions = parse_question_bank(&raw)?;
    debug!(path = %path.display(), count = questions.len(), "loaded question bank");
    Ok(questions)
}

/// Serialize questions back into the bank file format.
///
/// # Errors
///
/// Returns `StorageError::Parse` if serialization fails.
pub fn to_json(questions: &[Question]) -> Result<String, StorageError> {
    let records: Vec<QuestionRecord> = questions
        .iter()
        .map(QuestionRecord::from_question)
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
