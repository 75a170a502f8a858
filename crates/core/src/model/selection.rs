use serde::{Deserialize, Serialize};

use crate::model::option::OptionIndex;

/// How a display layer should mark one answer option after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerMark {
    /// The right answer. Marked whether or not the user picked it.
    Correct,
    /// The user's pick when it was not the right answer.
    Wrong,
    Unmarked,
}

/// The answer accepted for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub chosen: OptionIndex,
    pub correct: OptionIndex,
}

impl Selection {
    #[must_use]
    pub fn new(chosen: OptionIndex, correct: OptionIndex) -> Self {
        Self { chosen, correct }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.chosen == self.correct
    }

    #[must_use]
    pub fn mark_for(&self, option: OptionIndex) -> AnswerMark {
        if option == self.correct {
            AnswerMark::Correct
        } else if option == self.chosen {
            AnswerMark::Wrong
        } else {
            AnswerMark::Unmarked
        }
    }

    /// Marks for all four options, in display order.
    #[must_use]
    pub fn marks(&self) -> [AnswerMark; 4] {
        let mut marks = [AnswerMark::Unmarked; 4];
        for option in OptionIndex::all() {
            marks[option.zero_based()] = self.mark_for(option);
        }
        marks
    }
}

/// Final result recorded once per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionOutcome {
    Correct,
    Wrong,
    /// The countdown ran out (or the question was force-skipped) before an answer.
    Unanswered,
}

impl From<&Selection> for QuestionOutcome {
    fn from(selection: &Selection) -> Self {
        if selection.is_correct() {
            Self::Correct
        } else {
            Self::Wrong
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(raw: u8) -> OptionIndex {
        OptionIndex::new(raw).unwrap()
    }

    #[test]
    fn wrong_pick_marks_both_choice_and_answer() {
        let selection = Selection::new(idx(1), idx(3));

        assert!(!selection.is_correct());
        assert_eq!(
            selection.marks(),
            [
                AnswerMark::Wrong,
                AnswerMark::Unmarked,
                AnswerMark::Correct,
                AnswerMark::Unmarked
            ]
        );
        assert_eq!(QuestionOutcome::from(&selection), QuestionOutcome::Wrong);
    }

    #[test]
    fn right_pick_marks_only_the_answer() {
        let selection = Selection::new(idx(4), idx(4));

        assert!(selection.is_correct());
        assert_eq!(selection.mark_for(idx(4)), AnswerMark::Correct);
        assert_eq!(selection.mark_for(idx(2)), AnswerMark::Unmarked);
        assert_eq!(QuestionOutcome::from(&selection), QuestionOutcome::Correct);
    }
}
