use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{Question, QuestionDraft, QuestionId, QuizSettings};
use services::{
    AdvanceOutcome, QuizError, QuizEvent, QuizPhase, QuizProgress, QuizRunner, QuizSession,
};
use storage::InMemoryQuestionBank;
use tokio::sync::broadcast;

fn question(id: u64, correct: u8) -> Question {
    QuestionDraft::new(format!("Question {id}"), ["a", "b", "c", "d"], correct)
        .validate(QuestionId::new(id))
        .unwrap()
}

fn session(questions: Vec<Question>) -> QuizSession {
    let bank = InMemoryQuestionBank::new(questions).with_shuffle(false);
    QuizSession::new(Arc::new(bank), QuizSettings::default())
}

async fn next_event(events: &mut broadcast::Receiver<QuizEvent>) -> QuizEvent {
    tokio::time::timeout(Duration::from_secs(60), events.recv())
        .await
        .expect("event within a minute")
        .expect("event channel open")
}

#[tokio::test(start_paused = true)]
async fn unanswered_question_times_out_and_completes() {
    let runner = QuizRunner::spawn(session(vec![question(1, 1)])).unwrap();
    let mut events = runner.subscribe();

    for expected in (1..15).rev() {
        assert_eq!(
            next_event(&mut events).await,
            QuizEvent::Tick {
                remaining: expected
            }
        );
    }
    assert_eq!(
        next_event(&mut events).await,
        QuizEvent::TimedOut {
            progress: QuizProgress::new(1, 1)
        }
    );
    match next_event(&mut events).await {
        QuizEvent::Completed {
            score,
            total,
            summary,
        } => {
            assert_eq!(score, 0);
            assert_eq!(total, 1);
            assert_eq!(summary.map(|s| s.unanswered()), Some(1));
        }
        other => panic!("unexpected event {other:?}"),
    }

    let snapshot = runner.snapshot().await.unwrap();
    assert!(snapshot.is_complete());
}

#[tokio::test(start_paused = true)]
async fn answered_question_waits_for_the_player() {
    let runner = QuizRunner::spawn(session(vec![question(1, 2), question(2, 3)])).unwrap();
    let mut events = runner.subscribe();

    let selection = runner.submit_answer(2).await.unwrap();
    assert!(selection.is_correct());
    assert!(matches!(
        next_event(&mut events).await,
        QuizEvent::Answered { score: 1, .. }
    ));

    tokio::time::sleep(Duration::from_secs(40)).await;

    let snapshot = runner.snapshot().await.unwrap();
    assert_eq!(snapshot.progress.position, 1);
    assert_eq!(snapshot.time_remaining, 0);
    assert!(snapshot.locked);

    let outcome = runner.advance().await.unwrap();
    assert_eq!(
        outcome,
        AdvanceOutcome::Next {
            progress: QuizProgress::new(2, 2)
        }
    );
    let snapshot = runner.snapshot().await.unwrap();
    assert_eq!(snapshot.time_remaining, 15);
    assert!(!snapshot.locked);
}

#[tokio::test(start_paused = true)]
async fn rejections_come_back_to_the_caller() {
    let runner = QuizRunner::spawn(session(vec![question(1, 1)])).unwrap();

    assert!(matches!(
        runner.advance().await,
        Err(QuizError::NotAnswered)
    ));
    assert!(matches!(
        runner.submit_answer(9).await,
        Err(QuizError::InvalidOption(9))
    ));
    runner.submit_answer(1).await.unwrap();
    assert!(matches!(
        runner.submit_answer(2).await,
        Err(QuizError::AlreadyAnswered)
    ));
}

#[tokio::test(start_paused = true)]
async fn restart_rearms_the_countdown() {
    let runner = QuizRunner::spawn(session(vec![question(1, 1), question(2, 1)])).unwrap();
    let mut events = runner.subscribe();

    tokio::time::sleep(Duration::from_millis(5_500)).await;
    runner.restart().await.unwrap();

    let restarted = loop {
        if let QuizEvent::Restarted { progress } = next_event(&mut events).await {
            break progress;
        }
    };
    assert_eq!(restarted, QuizProgress::new(1, 2));

    let snapshot = runner.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, QuizPhase::InProgress);
    assert_eq!(snapshot.time_remaining, 15);
    assert_eq!(
        next_event(&mut events).await,
        QuizEvent::Tick { remaining: 14 }
    );
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_task() {
    let runner = QuizRunner::spawn(session(vec![question(1, 1)])).unwrap();
    let mut events = runner.subscribe();

    runner.shutdown().await;

    assert!(matches!(
        events.recv().await,
        Err(broadcast::error::RecvError::Closed)
    ));
}

#[tokio::test]
async fn spawn_rejects_a_zero_tick_period() {
    let result = QuizRunner::spawn_with_period(session(vec![question(1, 1)]), Duration::ZERO);
    assert!(matches!(result, Err(QuizError::InvalidConfiguration(_))));
}

#[tokio::test]
async fn spawn_rejects_an_empty_bank() {
    let result = QuizRunner::spawn(session(Vec::new()));
    assert!(matches!(result, Err(QuizError::InvalidConfiguration(_))));
}
