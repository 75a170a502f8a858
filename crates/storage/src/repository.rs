use quiz_core::model::{Question, QuestionDraft, QuestionError, QuestionId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by question suppliers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question bank could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question #{position} is invalid: {source}")]
    InvalidRecord {
        position: usize,
        #[source]
        source: QuestionError,
    },

    #[error("question bank unavailable: {0}")]
    Unavailable(String),
}

/// Persisted shape of a question in a question bank file.
///
/// Options are flattened into `answer1`..`answer4` and `ans` is the 1-based
/// index of the right one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub answer1: String,
    pub answer2: String,
    pub answer3: String,
    pub answer4: String,
    pub ans: u8,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        let [answer1, answer2, answer3, answer4] = question.options().clone();
        Self {
            question: question.prompt().to_owned(),
            answer1,
            answer2,
            answer3,
            answer4,
            ans: question.correct().get(),
        }
    }

    #[must_use]
    pub fn into_draft(self) -> QuestionDraft {
        QuestionDraft {
            prompt: self.question,
            options: [self.answer1, self.answer2, self.answer3, self.answer4],
            correct: self.ans,
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt/options are blank or `ans` is not 1-4.
    pub fn into_question(self, id: QuestionId) -> Result<Question, QuestionError> {
        self.into_draft().validate(id)
    }
}

/// Source of the ordered question list for a play-through.
///
/// Called once when a quiz starts and once per restart. Implementations own
/// the ordering, including any shuffling.
pub trait QuestionSupplier: Send + Sync {
    /// Produce the questions for a new play-through.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the questions cannot be produced.
    fn questions(&self) -> Result<Vec<Question>, StorageError>;
}

impl<T: QuestionSupplier + ?Sized> QuestionSupplier for Arc<T> {
    fn questions(&self) -> Result<Vec<Question>, StorageError> {
        (**self).questions()
    }
}

/// In-memory question bank that hands out a freshly shuffled copy on every request.
#[derive(Clone)]
pub struct InMemoryQuestionBank {
    questions: Arc<Vec<Question>>,
    shuffle: bool,
    rng: Arc<Mutex<StdRng>>,
}

impl InMemoryQuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self::with_rng(questions, StdRng::seed_from_u64(rand::random()))
    }

    /// Bank with a deterministic shuffle sequence.
    #[must_use]
    pub fn with_seed(questions: Vec<Question>, seed: u64) -> Self {
        Self::with_rng(questions, StdRng::seed_from_u64(seed))
    }

    fn with_rng(questions: Vec<Question>, rng: StdRng) -> Self {
        Self {
            questions: Arc::new(questions),
            shuffle: true,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Enable or disable shuffling. Disabled banks return questions in stored order.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Build a bank from drafts, assigning ids by position starting at 1.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` for the first draft that fails validation.
    pub fn from_drafts(drafts: Vec<QuestionDraft>) -> Result<Self, StorageError> {
        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| {
                let position = i + 1;
                draft
                    .validate(QuestionId::new(position as u64))
                    .map_err(|source| StorageError::InvalidRecord { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(questions))
    }

    /// Load a bank from a JSON question file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::new(crate::json::load_question_bank(path)?))
    }

    /// The general-knowledge bank bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bundled file is malformed.
    pub fn bundled() -> Result<Self, StorageError> {
        let questions = crate::json::parse_question_bank(include_str!("../data/questions.json"))?;
        Ok(Self::new(questions))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn shuffles(&self) -> bool {
        self.shuffle
    }
}

impl QuestionSupplier for InMemoryQuestionBank {
    fn questions(&self) -> Result<Vec<Question>, StorageError> {
        let mut questions = self.questions.as_ref().clone();
        if self.shuffle {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
            questions.shuffle(&mut *rng);
        }
        tracing::debug!(count = questions.len(), shuffled = self.shuffle, "supplied questions");
        Ok(questions)
    }
}
