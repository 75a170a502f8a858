#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{load_question_bank, parse_question_bank, to_json};
pub use repository::{InMemoryQuestionBank, QuestionRecord, QuestionSupplier, StorageError};
