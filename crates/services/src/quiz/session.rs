use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use quiz_core::Clock;
use quiz_core::model::{
    OptionIndex, Question, QuestionOutcome, QuizSettings, QuizSummary, Selection,
};
use storage::QuestionSupplier;

use super::countdown::{Countdown, CountdownTick, TimerToken};
use super::progress::QuizProgress;
use super::snapshot::QuizSnapshot;
use crate::error::QuizError;

//
// ─── PHASES AND OUTCOMES ───────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Completed,
}

/// Where an advance landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next { progress: QuizProgress },
    /// The last question was passed; the score is final.
    Completed { score: u32, total: usize },
}

/// What a single clock tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counting { remaining: u32 },
    /// Time ran out on a question that was already answered. Nothing advances.
    Expired,
    /// Time ran out on an unanswered question and the session moved on.
    TimedOut(AdvanceOutcome),
    /// No countdown is armed for this tick.
    Idle,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of a timed multiple-choice quiz.
///
/// The session never reads real time for its countdown. An external clock
/// calls [`QuizSession::tick`] once per second; everything else is driven by
/// player actions. `locked` decides every race between the two: once a
/// question is answered, its countdown can no longer force an advance.
pub struct QuizSession {
    supplier: Arc<dyn QuestionSupplier>,
    settings: QuizSettings,
    clock: Clock,
    questions: Vec<Question>,
    current: usize,
    locked: bool,
    score: u32,
    phase: QuizPhase,
    last_selection: Option<Selection>,
    outcomes: Vec<QuestionOutcome>,
    countdown: Countdown,
    started_at: Option<DateTime<Utc>>,
    summary: Option<QuizSummary>,
}

impl QuizSession {
    #[must_use]
    pub fn new(supplier: Arc<dyn QuestionSupplier>, settings: QuizSettings) -> Self {
        Self {
            supplier,
            settings,
            clock: Clock::default(),
            questions: Vec::new(),
            current: 0,
            locked: false,
            score: 0,
            phase: QuizPhase::NotStarted,
            last_selection: None,
            outcomes: Vec::new(),
            countdown: Countdown::new(settings.question_time_limit_secs()),
            started_at: None,
            summary: None,
        }
    }

    /// Use the given clock for start/completion timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Begin the first play-through with questions from the supplier.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` unless the session is `NotStarted`,
    /// `QuizError::Supply` if the supplier fails, and
    /// `QuizError::InvalidConfiguration` if it returns no questions.
    pub fn start(&mut self) -> Result<(), QuizError> {
        if self.phase != QuizPhase::NotStarted {
            return Err(QuizError::AlreadyStarted);
        }
        let questions = self.supplier.questions()?;
        self.begin(questions)
    }

    /// Begin the first play-through with an explicit question list.
    ///
    /// Restarts still draw from the supplier.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` unless the session is `NotStarted`, and
    /// `QuizError::InvalidConfiguration` if `questions` is empty.
    pub fn start_with(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        if self.phase != QuizPhase::NotStarted {
            return Err(QuizError::AlreadyStarted);
        }
        self.begin(questions)
    }

    /// Throw away the current play-through and begin a new one, from any phase.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Supply` or `QuizError::InvalidConfiguration` when no
    /// usable question list is available. The session is left untouched then.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        let questions = self.supplier.questions()?;
        self.begin(questions)?;
        info!(total = self.questions.len(), "quiz restarted");
        Ok(())
    }

    fn begin(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        if questions.is_empty() {
            return Err(QuizError::InvalidConfiguration(
                "question list is empty".into(),
            ));
        }

        self.questions = questions;
        self.current = 0;
        self.locked = false;
        self.score = 0;
        self.last_selection = None;
        self.outcomes.clear();
        self.summary = None;
        self.started_at = Some(self.clock.now());
        self.phase = QuizPhase::InProgress;
        self.countdown.arm();

        info!(
            total = self.questions.len(),
            time_limit = self.countdown.limit(),
            "quiz started"
        );
        Ok(())
    }

    /// Answer the current question with a 1-based option index.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside a play-through,
    /// `QuizError::AlreadyAnswered` if the question is locked, and
    /// `QuizError::InvalidOption` if `option` is not in 1..=4.
    pub fn submit_answer(&mut self, option: u8) -> Result<Selection, QuizError> {
        self.ensure_in_progress()?;
        if self.locked {
            return Err(QuizError::AlreadyAnswered);
        }
        let chosen = OptionIndex::new(option).map_err(|_| QuizError::InvalidOption(option))?;

        let correct = self.questions[self.current].correct();
        let selection = Selection::new(chosen, correct);
        if selection.is_correct() {
            self.score += 1;
        }
        self.outcomes.push(QuestionOutcome::from(&selection));
        self.last_selection = Some(selection);
        self.locked = true;

        debug!(
            position = self.current + 1,
            chosen = %chosen,
            correct = selection.is_correct(),
            score = self.score,
            "answer accepted"
        );
        Ok(selection)
    }

    /// Count down one second on the live countdown.
    pub fn tick(&mut self) -> TickOutcome {
        match self.countdown.token() {
            Some(token) => self.tick_with(token),
            None => TickOutcome::Idle,
        }
    }

    /// Count down one second, but only if `token` is still the live countdown.
    pub fn tick_with(&mut self, token: TimerToken) -> TickOutcome {
        if self.phase != QuizPhase::InProgress || self.countdown.token() != Some(token) {
            return TickOutcome::Idle;
        }

        match self.countdown.tick() {
            CountdownTick::Running { remaining } => TickOutcome::Counting { remaining },
            CountdownTick::Disarmed => TickOutcome::Idle,
            CountdownTick::Expired if self.locked => {
                debug!(position = self.current + 1, "time expired after answer");
                TickOutcome::Expired
            }
            CountdownTick::Expired => {
                debug!(position = self.current + 1, "question timed out");
                TickOutcome::TimedOut(self.advance_unchecked())
            }
        }
    }

    /// Move to the next question, or complete the quiz after the last one.
    ///
    /// `forced` skips the answered check; timeouts use it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside a play-through and
    /// `QuizError::NotAnswered` if not forced and the question has no answer yet.
    pub fn advance(&mut self, forced: bool) -> Result<AdvanceOutcome, QuizError> {
        self.ensure_in_progress()?;
        if !forced && !self.locked {
            return Err(QuizError::NotAnswered);
        }
        Ok(self.advance_unchecked())
    }

    fn advance_unchecked(&mut self) -> AdvanceOutcome {
        if !self.locked {
            self.outcomes.push(QuestionOutcome::Unanswered);
        }
        self.countdown.disarm();

        if self.current + 1 >= self.questions.len() {
            self.complete();
            return AdvanceOutcome::Completed {
                score: self.score,
                total: self.questions.len(),
            };
        }

        self.current += 1;
        self.locked = false;
        self.last_selection = None;
        self.countdown.arm();

        let progress = self.progress();
        debug!(position = progress.position, total = progress.total, "advanced");
        AdvanceOutcome::Next { progress }
    }

    fn complete(&mut self) {
        self.phase = QuizPhase::Completed;
        let completed_at = self.clock.now();
        let started_at = self.started_at.unwrap_or(completed_at).min(completed_at);

        match QuizSummary::from_outcomes(started_at, completed_at, &self.outcomes) {
            Ok(summary) => self.summary = Some(summary),
            Err(err) => warn!(error = %err, "could not build quiz summary"),
        }
        info!(
            score = self.score,
            total = self.questions.len(),
            "quiz completed"
        );
    }

    fn ensure_in_progress(&self) -> Result<(), QuizError> {
        if self.phase == QuizPhase::InProgress {
            Ok(())
        } else {
            Err(QuizError::NotInProgress(self.phase))
        }
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    /// `(current position, total)`; `(0, 0)` before any questions are loaded.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let position = if self.questions.is_empty() {
            0
        } else {
            self.current + 1
        };
        QuizProgress::new(position, self.questions.len())
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn last_selection(&self) -> Option<Selection> {
        self.last_selection
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Token of the armed countdown, for clock integrations.
    #[must_use]
    pub fn timer_token(&self) -> Option<TimerToken> {
        if self.phase == QuizPhase::InProgress {
            self.countdown.token()
        } else {
            None
        }
    }

    #[must_use]
    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Wall time since the current play-through began, frozen at completion.
    #[must_use]
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (&self.summary, self.started_at) {
            (Some(summary), _) => Some(summary.duration()),
            (None, Some(started_at)) => Some(self.clock.elapsed_since(started_at)),
            (None, None) => None,
        }
    }

    /// Final tally; only available once the quiz is `Completed`.
    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            phase: self.phase,
            progress: self.progress(),
            score: self.score,
            time_remaining: self.time_remaining(),
            locked: self.locked,
            question: self.current_question().cloned(),
            last_selection: self.last_selection,
            summary: self.summary.clone(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("locked", &self.locked)
            .field("score", &self.score)
            .field("countdown", &self.countdown)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
