mod entry;
mod ids;
mod stats;
mod word_set;

pub use ids::{EntryId, ParseIdError, QuestionId, WordSetId};

pub use entry::VocabularyEntry;
pub use stats::{RewardPolicy, STARTING_GOLD, StudyStats};
pub use word_set::{WordSet, WordSetError};
