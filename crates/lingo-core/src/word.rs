use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vocabulary entry saved by the user
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    id: String,
    text: String,
    language_code: String,
    translation: String,
    explanation: String,
    examples: Vec<String>,
    created_at: DateTime<Utc>,
    last_reviewed: Option<DateTime<Utc>>,
    review_count: u32,
}

impl Word {
    pub fn new(text: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            language_code: language_code.into(),
            translation: String::new(),
            explanation: String::new(),
            examples: Vec::new(),
            created_at: Utc::now(),
            last_reviewed: None,
            review_count: 0,
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_reviewed(&self) -> Option<DateTime<Utc>> {
        self.last_reviewed
    }

    pub fn review_count(&self) -> u32 {
        self.review_count
    }

    pub fn set_translation(&mut self, translation: impl Into<String>) {
        self.translation = translation.into();
    }

    pub fn set_explanation(&mut self, explanation: impl Into<String>) {
        self.explanation = explanation.into();
    }

    pub fn add_example(&mut self, example: impl Into<String>) {
        self.examples.push(example.into());
    }

    /// Record a review right now
    pub fn mark_as_reviewed(&mut self) {
        self.mark_reviewed_at(Utc::now());
    }

    /// Record a review at `at`. Every call counts, there is no de-duplication.
    pub fn mark_reviewed_at(&mut self, at: DateTime<Utc>) {
        self.last_reviewed = Some(at);
        self.review_count += 1;
    }

    pub fn to_record(&self) -> WordRecord {
        WordRecord {
            id: self.id.clone(),
            text: self.text.clone(),
            language_code: self.language_code.clone(),
            translation: self.translation.clone(),
            explanation: self.explanation.clone(),
            examples: self.examples.clone(),
            created_at: self.created_at,
            last_reviewed: self.last_reviewed,
            review_count: self.review_count,
        }
    }

    pub fn from_record(record: WordRecord) -> Self {
        Self {
            id: record.id,
            text: record.text,
            language_code: record.language_code,
            translation: record.translation,
            explanation: record.explanation,
            examples: record.examples,
            created_at: record.created_at,
            last_reviewed: record.last_reviewed,
            review_count: record.review_count,
        }
    }
}

/// Persisted shape of a [`Word`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub id: String,
    pub text: String,
    pub language_code: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_count: u32,
}

/// Document stored in the remote `wordbook` sub-collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordBookEntry {
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Language code, may be absent on old documents
    #[serde(default)]
    pub language: String,
    pub created_at: DateTime<Utc>,
}

impl WordBookEntry {
    pub fn new(
        word: impl Into<String>,
        translation: impl Into<String>,
        example: Option<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            example: example.filter(|e| !e.trim().is_empty()),
            language: language.into(),
            created_at: Utc::now(),
        }
    }

    /// Flatten a word into the remote entry shape, keeping its first example
    pub fn from_word(word: &Word) -> Self {
        Self {
            word: word.text().to_string(),
            translation: word.translation().to_string(),
            example: word.examples().first().cloned(),
            language: word.language_code().to_string(),
            created_at: word.created_at(),
        }
    }
}
