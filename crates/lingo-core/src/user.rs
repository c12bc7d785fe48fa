use chrono::{DateTime, Utc};
use lingo_types::Language;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Learner profile
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: String,
    name: String,
    teaching_language: &'static Language,
    learning_languages: Vec<&'static Language>,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a profile with a locally generated id
    pub fn new(
        name: impl Into<String>,
        teaching_language: &'static Language,
        learning_languages: Vec<&'static Language>,
    ) -> Self {
        Self::with_id(
            format!("user-{}", Uuid::new_v4()),
            name,
            teaching_language,
            learning_languages,
        )
    }

    /// Create a profile for an externally assigned id (account uid)
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        teaching_language: &'static Language,
        learning_languages: Vec<&'static Language>,
    ) -> Self {
        let mut user = Self {
            id: id.into(),
            name: name.into(),
            teaching_language,
            learning_languages: Vec::with_capacity(learning_languages.len()),
            created_at: Utc::now(),
        };
        for language in learning_languages {
            user.add_learning_language(language);
        }
        user
    }

    /// First-run profile: teaching Chinese, learning English and German
    pub fn default_profile() -> Self {
        Self::new(
            "Language Learner",
            &Language::CHINESE,
            vec![&Language::ENGLISH, &Language::GERMAN],
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn teaching_language(&self) -> &'static Language {
        self.teaching_language
    }

    pub fn set_teaching_language(&mut self, language: &'static Language) {
        self.teaching_language = language;
    }

    /// Copy of the learning languages in insertion order
    pub fn learning_languages(&self) -> Vec<&'static Language> {
        self.learning_languages.clone()
    }

    /// Add a learning language; no-op when its code is already present
    pub fn add_learning_language(&mut self, language: &'static Language) {
        if !self.learning_languages.iter().any(|l| l.code == language.code) {
            self.learning_languages.push(language);
        }
    }

    /// Remove a learning language by code, returns whether one was removed
    pub fn remove_learning_language(&mut self, code: &str) -> bool {
        let before = self.learning_languages.len();
        self.learning_languages.retain(|l| l.code != code);
        self.learning_languages.len() != before
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            teaching_language: self.teaching_language.code.to_string(),
            learning_languages: self
                .learning_languages
                .iter()
                .map(|l| l.code.to_string())
                .collect(),
            created_at: self.created_at,
        }
    }

    /// Rebuild a profile from its record.
    ///
    /// Unknown learning codes are dropped and an unknown teaching code falls back
    /// to [`Language::default_teaching`].
    pub fn from_record(record: UserRecord) -> Self {
        let teaching_language = Language::find_by_code(&record.teaching_language)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Unknown teaching language '{}', using {}",
                    record.teaching_language,
                    Language::default_teaching()
                );
                Language::default_teaching()
            });

        let learning_languages = record
            .learning_languages
            .iter()
            .filter_map(|code| Language::find_by_code(code))
            .collect();

        let mut user = Self::with_id(
            record.id,
            record.name,
            teaching_language,
            learning_languages,
        );
        user.created_at = record.created_at;
        user
    }
}

/// Persisted profile, languages stored by code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub teaching_language: String,
    #[serde(default)]
    pub learning_languages: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(user: &User) -> Vec<&'static str> {
        user.learning_languages().iter().map(|l| l.code).collect()
    }

    #[test]
    fn add_learning_language_is_idempotent() {
        let mut user = User::new("Ana", &Language::ENGLISH, vec![&Language::GERMAN]);
        user.add_learning_language(&Language::GERMAN);
        user.add_learning_language(&Language::CHINESE);
        user.add_learning_language(&Language::CHINESE);

        assert_eq!(codes(&user), vec!["de", "zh"]);
    }

    #[test]
    fn constructor_drops_duplicate_codes() {
        let user = User::new(
            "Ana",
            &Language::ENGLISH,
            vec![&Language::GERMAN, &Language::GERMAN, &Language::CHINESE],
        );
        assert_eq!(codes(&user), vec!["de", "zh"]);
    }

    #[test]
    fn remove_learning_language_by_code() {
        let mut user = User::default_profile();

        assert!(user.remove_learning_language("en"));
        assert!(!user.remove_learning_language("en"));
        assert_eq!(codes(&user), vec!["de"]);
    }

    #[test]
    fn learning_languages_is_a_copy() {
        let user = User::default_profile();
        let mut copy = user.learning_languages();
        copy.clear();

        assert_eq!(user.learning_languages().len(), 2);
    }

    #[test]
    fn default_profile_matches_first_run() {
        let user = User::default_profile();

        assert_eq!(user.name(), "Language Learner");
        assert_eq!(user.teaching_language().code, "zh");
        assert_eq!(codes(&user), vec!["en", "de"]);
        assert!(user.id().starts_with("user-"));
    }

    #[test]
    fn record_round_trip() {
        let mut user = User::default_profile();
        user.set_teaching_language(&Language::GERMAN);
        user.set_name("Max");

        let restored = User::from_record(user.to_record());

        assert_eq!(restored, user);
    }

    #[test]
    fn record_without_created_at_keeps_identity() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id":"u7","name":"Mei","teachingLanguage":"en","learningLanguages":["de"]}"#,
        )
        .unwrap();

        let user = User::from_record(record);

        assert_eq!(user.id(), "u7");
        assert_eq!(user.name(), "Mei");
        assert_eq!(codes(&user), vec!["de"]);
    }

    #[test]
    fn unknown_teaching_language_falls_back_to_default() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id":"u1","name":"Ana","teachingLanguage":"xx","learningLanguages":["en"],"createdAt":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        let user = User::from_record(record);

        assert_eq!(user.teaching_language(), Language::default_teaching());
        assert_eq!(user.id(), "u1");
    }

    #[test]
    fn unknown_learning_languages_are_dropped() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id":"u1","name":"Ana","teachingLanguage":"en","learningLanguages":["xx","de","yy"],"createdAt":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(codes(&User::from_record(record)), vec!["de"]);
    }

    #[test]
    fn record_serializes_codes() {
        let json = serde_json::to_value(User::default_profile().to_record()).unwrap();

        assert_eq!(json["teachingLanguage"], "zh");
        assert_eq!(json["learningLanguages"], serde_json::json!(["en", "de"]));
    }
}
