#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod quiz;
pub mod telemetry;

pub use quiz_core::Clock;

pub use config::{ConfigError, QuizConfig};
pub use error::QuizError;
pub use quiz::{
    AdvanceOutcome, Countdown, CountdownTick, QuizEvent, QuizPhase, QuizProgress, QuizRunner,
    QuizSession, QuizSnapshot, TickOutcome, TimerToken,
};
