use std::time::Duration;

use quiz_core::model::{QuizSummary, Selection};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, instrument};

use super::countdown::TimerToken;
use super::progress::QuizProgress;
use super::session::{AdvanceOutcome, QuizPhase, QuizSession, TickOutcome};
use super::snapshot::QuizSnapshot;
use crate::error::QuizError;

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 64;

/// Notifications published by a running quiz.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    Tick { remaining: u32 },
    Answered { selection: Selection, score: u32 },
    /// The countdown ran out before an answer. Followed by `Advanced` or `Completed`.
    TimedOut { progress: QuizProgress },
    Advanced { progress: QuizProgress },
    Completed { score: u32, total: usize, summary: Option<QuizSummary> },
    Restarted { progress: QuizProgress },
}

enum Command {
    Submit {
        option: u8,
        reply: oneshot::Sender<Result<Selection, QuizError>>,
    },
    Advance {
        reply: oneshot::Sender<Result<AdvanceOutcome, QuizError>>,
    },
    Restart {
        reply: oneshot::Sender<Result<(), QuizError>>,
    },
    Snapshot {
        reply: oneshot::Sender<QuizSnapshot>,
    },
}

/// Drives a [`QuizSession`] against real time on a tokio task.
///
/// Player commands and countdown ticks are handled one at a time by the same
/// task, so they never interleave. Dropping the runner aborts the task and
/// with it any armed countdown.
pub struct QuizRunner {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<QuizEvent>,
    task: TaskGuard,
}

impl QuizRunner {
    /// Start the session (if needed) and spawn it with a one-second tick.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the session's start error if it was not started yet and cannot be.
    pub fn spawn(session: QuizSession) -> Result<Self, QuizError> {
        Self::spawn_with_period(session, Duration::from_secs(1))
    }

    /// Like [`QuizRunner::spawn`] with a custom tick period.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidConfiguration` for a zero `period`, or the
    /// session's start error if it was not started yet and cannot be.
    pub fn spawn_with_period(
        mut session: QuizSession,
        period: Duration,
    ) -> Result<Self, QuizError> {
        if period.is_zero() {
            return Err(QuizError::InvalidConfiguration(
                "tick period must be non-zero".into(),
            ));
        }
        if session.phase() == QuizPhase::NotStarted {
            session.start()?;
        }

        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let handle = tokio::spawn(run(session, receiver, events.clone(), period));

        Ok(Self {
            commands,
            events,
            task: TaskGuard(Some(handle)),
        })
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<QuizEvent> {
        self.events.subscribe()
    }

    /// # Errors
    ///
    /// Returns the session's rejection, or `QuizError::RunnerStopped`.
    pub async fn submit_answer(&self, option: u8) -> Result<Selection, QuizError> {
        self.request(|reply| Command::Submit { option, reply }).await?
    }

    /// Advance after answering. Timeouts advance on their own.
    ///
    /// # Errors
    ///
    /// Returns the session's rejection, or `QuizError::RunnerStopped`.
    pub async fn advance(&self) -> Result<AdvanceOutcome, QuizError> {
        self.request(|reply| Command::Advance { reply }).await?
    }

    /// # Errors
    ///
    /// Returns the session's rejection, or `QuizError::RunnerStopped`.
    pub async fn restart(&self) -> Result<(), QuizError> {
        self.request(|reply| Command::Restart { reply }).await?
    }

    /// # Errors
    ///
    /// Returns `QuizError::RunnerStopped` if the task is gone.
    pub async fn snapshot(&self) -> Result<QuizSnapshot, QuizError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Stop the task and wait for it to finish.
    pub async fn shutdown(self) {
        let Self {
            commands, mut task, ..
        } = self;
        drop(commands);
        if let Some(handle) = task.0.take() {
            let _ = handle.await;
        }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, QuizError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| QuizError::RunnerStopped)?;
        response.await.map_err(|_| QuizError::RunnerStopped)
    }
}

struct TaskGuard(Option<JoinHandle<()>>);

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
        }
    }
}

/// The interval backing one armed countdown.
struct ArmedTimer {
    token: TimerToken,
    interval: Interval,
}

impl ArmedTimer {
    fn new(token: TimerToken, period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { token, interval }
    }
}

/// Match the interval to the session's live countdown.
fn resync(timer: &mut Option<ArmedTimer>, token: Option<TimerToken>, period: Duration) {
    if timer.as_ref().map(|t| t.token) == token {
        return;
    }
    // Disarm before arming so two intervals never coexist.
    *timer = None;
    *timer = token.map(|token| ArmedTimer::new(token, period));
}

async fn next_tick(timer: &mut Option<ArmedTimer>) -> TimerToken {
    match timer {
        Some(armed) => {
            armed.interval.tick().await;
            armed.token
        }
        None => std::future::pending().await,
    }
}

#[instrument(skip_all, fields(total = session.progress().total))]
async fn run(
    mut session: QuizSession,
    mut commands: mpsc::Receiver<Command>,
    events: broadcast::Sender<QuizEvent>,
    period: Duration,
) {
    let mut timer = None;
    resync(&mut timer, session.timer_token(), period);

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };
                handle_command(&mut session, command, &events);
            }
            token = next_tick(&mut timer) => {
                handle_tick(&mut session, token, &events);
            }
        }
        resync(&mut timer, session.timer_token(), period);
    }

    debug!("quiz runner stopped");
}

fn handle_command(
    session: &mut QuizSession,
    command: Command,
    events: &broadcast::Sender<QuizEvent>,
) {
    match command {
        Command::Submit { option, reply } => {
            let result = session.submit_answer(option);
            if let Ok(selection) = &result {
                let _ = events.send(QuizEvent::Answered {
                    selection: *selection,
                    score: session.score(),
                });
            }
            let _ = reply.send(result);
        }
        Command::Advance { reply } => {
            let result = session.advance(false);
            if let Ok(outcome) = &result {
                publish_advance(session, *outcome, events);
            }
            let _ = reply.send(result);
        }
        Command::Restart { reply } => {
            let result = session.restart();
            if result.is_ok() {
                let _ = events.send(QuizEvent::Restarted {
                    progress: session.progress(),
                });
            }
            let _ = reply.send(result);
        }
        Command::Snapshot { reply } => {
            let _ = reply.send(session.snapshot());
        }
    }
}

fn handle_tick(
    session: &mut QuizSession,
    token: TimerToken,
    events: &broadcast::Sender<QuizEvent>,
) {
    let timed_out_at = session.progress();
    match session.tick_with(token) {
        TickOutcome::Counting { remaining } => {
            let _ = events.send(QuizEvent::Tick { remaining });
        }
        TickOutcome::Expired => {
            let _ = events.send(QuizEvent::Tick { remaining: 0 });
        }
        TickOutcome::TimedOut(outcome) => {
            let _ = events.send(QuizEvent::TimedOut {
                progress: timed_out_at,
            });
            publish_advance(session, outcome, events);
        }
        TickOutcome::Idle => {}
    }
}

fn publish_advance(
    session: &QuizSession,
    outcome: AdvanceOutcome,
    events: &broadcast::Sender<QuizEvent>,
) {
    let event = match outcome {
        AdvanceOutcome::Next { progress } => QuizEvent::Advanced { progress },
        AdvanceOutcome::Completed { score, total } => QuizEvent::Completed {
            score,
            total,
            summary: session.summary().cloned(),
        },
    };
    let _ = events.send(event);
}
