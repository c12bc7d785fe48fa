pub mod error;
pub mod history;
pub mod practice;
pub mod repository;
pub mod user;
pub mod vocabulary;
pub mod word;
pub mod wordbook;

pub use error::CoreError;
pub use history::{HistoryEntry, MistakeAnalysis};
pub use repository::{KeyValueStore, KeyValueWordRepository, MemoryStore, WordRepository};
pub use user::{User, UserRecord};
pub use vocabulary::{LessonRecord, VocabularyItem, VocabularyLesson, VocabularyManager};
pub use word::{Word, WordBookEntry, WordRecord};
pub use wordbook::{REVIEW_INTERVAL_DAYS, WordBook};

#[cfg(test)]
mod tests;
