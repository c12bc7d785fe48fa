pub mod language;
pub mod types;

pub use language::Language;
pub use types::{ContentKind, Difficulty, ExerciseKind, HistoryKind, ParseKindError};
