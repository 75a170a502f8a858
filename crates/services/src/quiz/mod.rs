mod countdown;
mod progress;
mod runner;
mod session;
mod snapshot;

// Public API of the quiz subsystem.
pub use countdown::{Countdown, CountdownTick, TimerToken};
pub use progress::QuizProgress;
pub use runner::{QuizEvent, QuizRunner};
pub use session::{AdvanceOutcome, QuizPhase, QuizSession, TickOutcome};
pub use snapshot::QuizSnapshot;
