use quiz_core::model::{AnswerMark, OptionIndex, Question, QuizSummary, Selection};

use super::progress::QuizProgress;
use super::session::QuizPhase;

/// Read-only view of a session for the display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub progress: QuizProgress,
    pub score: u32,
    pub time_remaining: u32,
    pub locked: bool,
    pub question: Option<Question>,
    pub last_selection: Option<Selection>,
    pub summary: Option<QuizSummary>,
}

impl QuizSnapshot {
    /// Highlight for one option; `Unmarked` until the question is answered.
    #[must_use]
    pub fn mark_for(&self, option: OptionIndex) -> AnswerMark {
        self.last_selection
            .map_or(AnswerMark::Unmarked, |selection| selection.mark_for(option))
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Completed
    }
}
