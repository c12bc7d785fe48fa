use lingo_core::Word;
use lingo_core::practice::{answers_match, choice_matches};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub example: Option<String>,
}

impl VocabularyEntry {
    /// Word book entry for this item; the example, if any, becomes the first example
    pub fn into_word(self, language_code: &str) -> Word {
        let examples = self
            .example
            .filter(|example| !example.trim().is_empty())
            .into_iter()
            .collect();
        Word::new(self.word, language_code)
            .with_translation(self.translation)
            .with_examples(examples)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceEntry {
    pub sentence: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub grammar: Option<String>,
    #[serde(default)]
    pub vocabulary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarLesson {
    pub title: String,
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub mistakes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LearningContent {
    Vocabulary(Vec<VocabularyEntry>),
    Sentences(Vec<SentenceEntry>),
    Grammar(GrammarLesson),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGloss {
    pub word: String,
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceTranslation {
    pub translation: String,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub word_by_word: Vec<WordGloss>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDetails {
    pub translation: String,
    pub explanation: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationExercise {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillInBlankExercise {
    pub sentence: String,
    pub answer: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceExercise {
    pub question: String,
    pub options: Vec<String>,
    #[serde(alias = "answer")]
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exercise {
    Translation(TranslationExercise),
    FillInBlank(FillInBlankExercise),
    MultipleChoice(MultipleChoiceExercise),
}

impl Exercise {
    /// Text shown to the learner
    pub fn prompt(&self) -> &str {
        match self {
            Exercise::Translation(e) => &e.question,
            Exercise::FillInBlank(e) => &e.sentence,
            Exercise::MultipleChoice(e) => &e.question,
        }
    }

    pub fn expected_answer(&self) -> &str {
        match self {
            Exercise::Translation(e) => &e.answer,
            Exercise::FillInBlank(e) => &e.answer,
            Exercise::MultipleChoice(e) => &e.correct_answer,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            Exercise::Translation(_) => &[],
            Exercise::FillInBlank(e) => &e.options,
            Exercise::MultipleChoice(e) => &e.options,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Exercise::Translation(e) => e.hint.as_deref(),
            _ => None,
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match self {
            Exercise::Translation(_) => None,
            Exercise::FillInBlank(e) => e.explanation.as_deref(),
            Exercise::MultipleChoice(e) => e.explanation.as_deref(),
        }
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        match self {
            Exercise::MultipleChoice(e) => choice_matches(answer, &e.correct_answer, &e.options),
            _ => answers_match(answer, self.expected_answer()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_choice_accepts_answer_alias() {
        let exercise: MultipleChoiceExercise = serde_json::from_str(
            r#"{"question": "Cat?", "options": ["A. Hund", "B. Katze"], "answer": "B"}"#,
        )
        .unwrap();

        assert_eq!(exercise.correct_answer, "B");
        assert!(Exercise::MultipleChoice(exercise).is_correct("Katze"));
    }

    #[test]
    fn vocabulary_entry_becomes_word() {
        let entry = VocabularyEntry {
            word: "Apfel".into(),
            translation: "apple".into(),
            example: Some("Der Apfel ist rot.".into()),
        };

        let word = entry.into_word("de");
        assert_eq!(word.text(), "Apfel");
        assert_eq!(word.language_code(), "de");
        assert_eq!(word.translation(), "apple");
        assert_eq!(word.examples(), ["Der Apfel ist rot.".to_string()]);
        assert_eq!(word.review_count(), 0);
    }

    #[test]
    fn translation_exercise_checks_free_text() {
        let exercise = Exercise::Translation(TranslationExercise {
            question: "Translate to German: the cat".into(),
            answer: "die Katze".into(),
            hint: Some("feminine".into()),
        });

        assert!(exercise.is_correct("Die Katze"));
        assert!(!exercise.is_correct("der Kater"));
        assert_eq!(exercise.hint(), Some("feminine"));
        assert!(exercise.options().is_empty());
    }

    #[test]
    fn fill_in_blank_prompt_is_sentence() {
        let exercise = Exercise::FillInBlank(FillInBlankExercise {
            sentence: "Ich ___ Brot.".into(),
            answer: "esse".into(),
            options: vec!["esse".into(), "isst".into()],
            explanation: None,
        });

        assert_eq!(exercise.prompt(), "Ich ___ Brot.");
        assert_eq!(exercise.expected_answer(), "esse");
        assert_eq!(exercise.options().len(), 2);
    }
}
