use lingo_types::Difficulty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub word: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

impl VocabularyItem {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            phonetic: None,
            part_of_speech: None,
        }
    }
}

/// Catalog entry grouping vocabulary by topic
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyLesson {
    id: String,
    title: String,
    description: String,
    category: String,
    language_code: String,
    difficulty: Difficulty,
    items: Vec<VocabularyItem>,
}

impl VocabularyLesson {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        language_code: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            language_code: language_code.into(),
            difficulty,
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn add_item(&mut self, item: VocabularyItem) {
        self.items.push(item);
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn to_record(&self) -> LessonRecord {
        LessonRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            language_code: self.language_code.clone(),
            difficulty: self.difficulty,
            items: self.items.clone(),
        }
    }

    pub fn from_record(record: LessonRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            category: record.category,
            language_code: record.language_code,
            difficulty: record.difficulty,
            items: record.items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub language_code: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub items: Vec<VocabularyItem>,
}

/// Session-scoped lesson catalog, kept in memory only
#[derive(Debug, Default)]
pub struct VocabularyManager {
    lessons: Vec<VocabularyLesson>,
}

impl VocabularyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a lesson by id
    pub fn add_lesson(&mut self, lesson: VocabularyLesson) {
        match self.lessons.iter().position(|l| l.id == lesson.id) {
            Some(position) => self.lessons[position] = lesson,
            None => self.lessons.push(lesson),
        }
    }

    pub fn get_lesson(&self, id: &str) -> Option<&VocabularyLesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    pub fn all_lessons(&self) -> &[VocabularyLesson] {
        &self.lessons
    }

    pub fn lessons_by_language(&self, code: &str) -> Vec<&VocabularyLesson> {
        self.lessons
            .iter()
            .filter(|l| l.language_code == code)
            .collect()
    }

    pub fn lessons_by_category(&self, category: &str) -> Vec<&VocabularyLesson> {
        self.lessons
            .iter()
            .filter(|l| l.category == category)
            .collect()
    }

    pub fn lessons_by_difficulty(&self, difficulty: Difficulty) -> Vec<&VocabularyLesson> {
        self.lessons
            .iter()
            .filter(|l| l.difficulty == difficulty)
            .collect()
    }

    pub fn clear_lessons(&mut self) {
        self.lessons.clear();
    }
}
