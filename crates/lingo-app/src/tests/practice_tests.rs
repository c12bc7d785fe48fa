use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lingo_generator::{
    ContentGenerator, Exercise, GenerateError, MultipleChoiceExercise, ProviderMetadata,
    TextGenerator, TranslationExercise,
};
use lingo_types::{HistoryKind, Language};

use crate::commands::practice::check_answer;

const ENGLISH: Language = Language::ENGLISH;
const GERMAN: Language = Language::GERMAN;

/// Replies with a fixed result and counts the prompts it receives
struct ScriptedGenerator {
    reply: Result<String, ()>,
    calls: Mutex<usize>,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        *self.calls.lock().unwrap() += 1;
        self.reply.clone().map_err(|_| GenerateError::RateLimitExceeded)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".into(),
            model: "none".into(),
            requires_api_key: false,
        }
    }
}

fn content(reply: Result<&str, ()>) -> (Arc<ScriptedGenerator>, ContentGenerator) {
    let generator = Arc::new(ScriptedGenerator {
        reply: reply.map(str::to_string),
        calls: Mutex::new(0),
    });
    (generator.clone(), ContentGenerator::new(generator))
}

fn translation() -> Exercise {
    Exercise::Translation(TranslationExercise {
        question: "Translate: the cat".into(),
        answer: "die Katze".into(),
        hint: None,
    })
}

#[tokio::test]
async fn correct_answer_skips_analysis() {
    let (generator, content) = content(Ok("unused"));

    let outcome = check_answer(&content, &translation(), "  Die Katze ", &GERMAN, &ENGLISH).await;

    assert!(outcome.correct);
    assert_eq!(outcome.entry.kind, HistoryKind::Practice);
    assert_eq!(outcome.entry.user_answer, "Die Katze");
    assert_eq!(outcome.entry.correct_answer, "die Katze");
    assert_eq!(*generator.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn wrong_answer_records_analysis() {
    let reply = r#"Here you go: {"analysis": "Katze is feminine", "grammarIssues": ["article"], "suggestions": "Learn nouns with their article"}"#;
    let (generator, content) = content(Ok(reply));

    let outcome = check_answer(&content, &translation(), "der Katze", &GERMAN, &ENGLISH).await;

    assert!(!outcome.correct);
    assert_eq!(outcome.entry.kind, HistoryKind::Mistake);
    assert_eq!(outcome.entry.user_answer, "der Katze");
    assert_eq!(outcome.entry.correct_answer, "die Katze");
    let analysis = outcome.entry.analysis.unwrap();
    assert_eq!(analysis.analysis, "Katze is feminine");
    assert_eq!(analysis.grammar_issues, vec!["article".to_string()]);
    assert_eq!(*generator.calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn unstructured_analysis_is_kept_as_text() {
    let (_, content) = content(Ok("The article is wrong."));

    let outcome = check_answer(&content, &translation(), "der Katze", &GERMAN, &ENGLISH).await;

    let analysis = outcome.entry.analysis.unwrap();
    assert_eq!(analysis.analysis, "The article is wrong.");
    assert!(analysis.grammar_issues.is_empty());
}

#[tokio::test]
async fn failed_analysis_still_records_mistake() {
    let (_, content) = content(Err(()));

    let outcome = check_answer(&content, &translation(), "der Hund", &GERMAN, &ENGLISH).await;

    assert!(!outcome.correct);
    assert_eq!(outcome.entry.kind, HistoryKind::Mistake);
    assert!(outcome.entry.analysis.is_none());
}

#[tokio::test]
async fn multiple_choice_accepts_option_letter() {
    let (generator, content) = content(Ok("unused"));
    let exercise = Exercise::MultipleChoice(MultipleChoiceExercise {
        question: "Which one means 'dog'?".into(),
        options: vec!["A. die Katze".into(), "B. der Hund".into()],
        correct_answer: "B".into(),
        explanation: None,
    });

    let outcome = check_answer(&content, &exercise, "b", &GERMAN, &ENGLISH).await;

    assert!(outcome.correct);
    assert_eq!(outcome.entry.correct_answer, "B");
    assert_eq!(*generator.calls.lock().unwrap(), 0);
}
