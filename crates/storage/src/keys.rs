//! Keys under which the app keeps its state.

/// Saved word sets, newest first.
pub const VAULT: &str = "vault";

/// Gold, mastered/learning counters and the last quiz score.
pub const STATS: &str = "stats";

/// The word list currently used for flashcards and quizzes.
pub const ACTIVE_WORDS: &str = "active_words";

/// An unfinished quiz, if one was saved.
pub const QUIZ_SESSION: &str = "quiz_session";
