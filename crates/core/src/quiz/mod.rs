//! Quiz session engine: question generation, answer checking and scoring.

mod builder;
mod error;
mod normalize;
mod question;
mod session;

pub use builder::{DISTRACTOR_COUNT, QuestionSetBuilder};
pub use error::QuizError;
pub use normalize::normalize;
pub use question::{Question, QuestionKind};
pub use session::{
    AnswerFeedback, QuizProgress, QuizResult, QuizSession, SessionSnapshot, SessionStatus,
};
