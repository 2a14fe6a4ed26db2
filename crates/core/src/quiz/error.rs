use thiserror::Error;

/// Caller mistakes detected by the quiz engine.
///
/// None of these are runtime conditions: each one means the caller asked for
/// something the current session state does not allow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("cannot build a quiz from an empty word list")]
    NoEntries,

    #[error("cannot start a quiz without questions")]
    NoQuestions,

    #[error("quiz already finished")]
    Finished,

    #[error("quiz is still in progress")]
    NotFinished,

    #[error("invalid quiz snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}
