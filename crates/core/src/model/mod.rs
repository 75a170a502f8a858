mod ids;
mod option;
mod question;
mod selection;
mod settings;
mod summary;

pub use ids::QuestionId;
pub use option::{OPTION_COUNT, OptionError, OptionIndex};
pub use question::{Question, QuestionDraft, QuestionError};
pub use selection::{AnswerMark, QuestionOutcome, Selection};
pub use settings::{DEFAULT_QUESTION_TIME_LIMIT_SECS, QuizSettings, SettingsError};
pub use summary::{QuizSummary, QuizSummaryError};
