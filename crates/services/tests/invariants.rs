use std::sync::Arc;

use proptest::prelude::*;
use quiz_core::model::{Question, QuestionDraft, QuestionId, QuizSettings};
use services::{QuizError, QuizPhase, QuizSession, TickOutcome};
use storage::InMemoryQuestionBank;

#[derive(Debug, Clone)]
enum Op {
    Submit(u8),
    Tick,
    Advance,
    ForceAdvance,
    Restart,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..=6).prop_map(Op::Submit),
        6 => Just(Op::Tick),
        2 => Just(Op::Advance),
        1 => Just(Op::ForceAdvance),
        1 => Just(Op::Restart),
    ]
}

fn session(corrects: &[u8], time_limit: u32) -> QuizSession {
    let questions: Vec<Question> = corrects
        .iter()
        .enumerate()
        .map(|(i, &correct)| {
            QuestionDraft::new(format!("Q{i}"), ["a", "b", "c", "d"], correct)
                .validate(QuestionId::new(i as u64 + 1))
                .unwrap()
        })
        .collect();
    let bank = InMemoryQuestionBank::with_seed(questions, 7);
    let settings = QuizSettings::new(time_limit, true).unwrap();
    let mut session = QuizSession::new(Arc::new(bank), settings);
    session.start().unwrap();
    session
}

proptest! {
    #[test]
    fn session_invariants_hold(
        corrects in prop::collection::vec(1u8..=4, 1..6),
        time_limit in 1u32..5,
        ops in prop::collection::vec(op(), 0..120),
    ) {
        let mut session = session(&corrects, time_limit);
        let total = corrects.len();

        for op in ops {
            let before_index = session.current_index();
            let before_score = session.score();
            let before_locked = session.is_locked();
            let before_phase = session.phase();

            match op {
                Op::Submit(option) => {
                    let result = session.submit_answer(option);
                    match result {
                        Ok(selection) => {
                            prop_assert!(!before_locked);
                            prop_assert!(session.is_locked());
                            let gained = u32::from(selection.is_correct());
                            prop_assert_eq!(session.score(), before_score + gained);
                        }
                        Err(QuizError::AlreadyAnswered) => prop_assert!(before_locked),
                        Err(QuizError::InvalidOption(_)) => {
                            prop_assert!(!(1..=4).contains(&option));
                        }
                        Err(QuizError::NotInProgress(_)) => {
                            prop_assert_eq!(before_phase, QuizPhase::Completed);
                        }
                        Err(other) => prop_assert!(false, "unexpected error {other}"),
                    }
                }
                Op::Tick => {
                    let outcome = session.tick();
                    if matches!(outcome, TickOutcome::TimedOut(_)) {
                        prop_assert!(!before_locked);
                    }
                    if before_locked {
                        prop_assert_eq!(session.current_index(), before_index);
                    }
                    prop_assert_eq!(session.score(), before_score);
                }
                Op::Advance => {
                    if let Err(err) = session.advance(false) {
                        prop_assert!(matches!(
                            err,
                            QuizError::NotAnswered | QuizError::NotInProgress(_)
                        ));
                        prop_assert_eq!(session.current_index(), before_index);
                    }
                    prop_assert_eq!(session.score(), before_score);
                }
                Op::ForceAdvance => {
                    let _ = session.advance(true);
                    prop_assert_eq!(session.score(), before_score);
                }
                Op::Restart => {
                    session.restart().unwrap();
                    prop_assert_eq!(session.score(), 0);
                    prop_assert_eq!(session.current_index(), 0);
                    prop_assert!(!session.is_locked());
                    continue;
                }
            }

            prop_assert!(session.current_index() >= before_index);
            prop_assert!(session.current_index() < total);
            prop_assert!(session.current_index() - before_index <= 1);
            prop_assert!(session.score() as usize <= session.current_index() + 1);
            prop_assert!(session.time_remaining() <= time_limit);
            if session.phase() == QuizPhase::Completed {
                let summary = session.summary().unwrap();
                prop_assert_eq!(summary.total_questions() as usize, total);
                prop_assert_eq!(summary.correct(), session.score());
            }
        }
    }
}
