use std::sync::Arc;

use lingo_core::{MistakeAnalysis, VocabularyItem};
use lingo_types::{ContentKind, Difficulty, ExerciseKind, Language};

use crate::extract::{Extraction, JsonShape, extract};
use crate::types::{
    Exercise, FillInBlankExercise, GrammarLesson, LearningContent, MultipleChoiceExercise,
    SentenceEntry, SentenceTranslation, TranslationExercise, VocabularyEntry, WordDetails,
};
use crate::{GenerateError, ProviderMetadata, TextGenerator, prompts};

const DETAIL_EXAMPLE_COUNT: usize = 3;

/// Learning operations built on top of a [`TextGenerator`]
#[derive(Clone)]
pub struct ContentGenerator {
    generator: Arc<dyn TextGenerator>,
}

fn require(value: &str, what: &str) -> Result<(), GenerateError> {
    if value.trim().is_empty() {
        return Err(GenerateError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Strip "1.", "2)", "-" or "*" list markers from the start of a line
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    let digits = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if digits.len() < line.len() {
        if let Some(rest) = digits.strip_prefix(['.', ')']) {
            return rest.trim_start();
        }
        return line;
    }
    line.strip_prefix(['-', '*', '•'])
        .map(str::trim_start)
        .unwrap_or(line)
}

fn parse_numbered(text: &str, limit: usize) -> Vec<String> {
    text.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .take(limit)
        .collect()
}

fn parse_pipe_rows(text: &str, limit: usize) -> Vec<VocabularyItem> {
    text.lines()
        .filter(|line| line.contains('|'))
        .filter_map(|line| {
            let mut cells = strip_list_marker(line)
                .trim_matches('|')
                .split('|')
                .map(str::trim);
            let word = cells.next()?;
            let translation = cells.next()?;
            let is_rule = |cell: &str| cell.chars().all(|c| matches!(c, '-' | ':' | ' '));
            let is_header = word.eq_ignore_ascii_case("word");
            if word.is_empty() || translation.is_empty() || is_rule(word) || is_header {
                return None;
            }
            Some(VocabularyItem::new(word, translation))
        })
        .take(limit)
        .collect()
}

impl ContentGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn metadata(&self) -> ProviderMetadata {
        self.generator.metadata()
    }

    async fn ask(&self, prompt: String) -> Result<String, GenerateError> {
        let text = self.generator.generate(&prompt).await.inspect_err(|e| {
            tracing::error!("Generation failed: {e}");
        })?;
        Ok(text.trim().to_string())
    }

    pub async fn translate_word(
        &self,
        word: &str,
        from: &Language,
        to: &Language,
    ) -> Result<String, GenerateError> {
        require(word, "word")?;
        self.ask(prompts::translate_word(word, from, to)).await
    }

    pub async fn explain_word(
        &self,
        word: &str,
        word_language: &Language,
        explanation_language: &Language,
    ) -> Result<String, GenerateError> {
        require(word, "word")?;
        self.ask(prompts::explain_word(word, word_language, explanation_language))
            .await
    }

    /// Example sentences, parsed from a numbered list
    pub async fn generate_examples(
        &self,
        word: &str,
        word_language: &Language,
        example_language: &Language,
        count: usize,
    ) -> Result<Vec<String>, GenerateError> {
        require(word, "word")?;
        let text = self
            .ask(prompts::examples(word, word_language, example_language, count))
            .await?;
        Ok(parse_numbered(&text, count))
    }

    /// Translation, explanation and examples, requested concurrently
    pub async fn word_details(
        &self,
        word: &str,
        word_language: &Language,
        target_language: &Language,
        teaching_language: &Language,
    ) -> Result<WordDetails, GenerateError> {
        require(word, "word")?;
        let (translation, explanation, examples) = tokio::try_join!(
            self.translate_word(word, word_language, target_language),
            self.explain_word(word, word_language, teaching_language),
            self.generate_examples(word, word_language, teaching_language, DETAIL_EXAMPLE_COUNT),
        )?;

        Ok(WordDetails {
            translation,
            explanation,
            examples,
        })
    }

    /// Vocabulary list in `word | translation` rows
    pub async fn vocabulary_lesson(
        &self,
        topic: &str,
        target: &Language,
        teaching: &Language,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<VocabularyItem>, GenerateError> {
        require(topic, "topic")?;
        let text = self
            .ask(prompts::vocabulary_lesson(topic, target, teaching, difficulty, count))
            .await?;
        let items = parse_pipe_rows(&text, count);
        if items.is_empty() {
            tracing::warn!("Vocabulary reply for '{}' had no usable rows", topic);
        }
        Ok(items)
    }

    /// IPA transcription
    pub async fn pronunciation(
        &self,
        word: &str,
        language: &Language,
    ) -> Result<String, GenerateError> {
        require(word, "word")?;
        self.ask(prompts::pronunciation(word, language)).await
    }

    pub async fn chat_with_tutor(
        &self,
        message: &str,
        learning: &Language,
        teaching: &Language,
    ) -> Result<String, GenerateError> {
        require(message, "message")?;
        self.ask(prompts::tutor(message, learning, teaching)).await
    }

    pub async fn learning_content(
        &self,
        kind: ContentKind,
        learning: &Language,
        teaching: &Language,
        level: Difficulty,
        topic: &str,
    ) -> Result<Extraction<LearningContent>, GenerateError> {
        require(topic, "topic")?;
        let text = self
            .ask(prompts::learning_content(kind, learning, teaching, level, topic))
            .await?;

        Ok(match kind {
            ContentKind::Vocabulary => {
                extract::<Vec<VocabularyEntry>>(&text, JsonShape::Array)
                    .map(LearningContent::Vocabulary)
            }
            ContentKind::Sentences => {
                extract::<Vec<SentenceEntry>>(&text, JsonShape::Array)
                    .map(LearningContent::Sentences)
            }
            ContentKind::Grammar => {
                extract::<GrammarLesson>(&text, JsonShape::Object).map(LearningContent::Grammar)
            }
        })
    }

    /// Sentence translation; without analysis the whole reply is the translation
    pub async fn translate_sentence(
        &self,
        sentence: &str,
        from: &Language,
        to: &Language,
        with_analysis: bool,
    ) -> Result<Extraction<SentenceTranslation>, GenerateError> {
        require(sentence, "sentence")?;
        let text = self
            .ask(prompts::translate_sentence(sentence, from, to, with_analysis))
            .await?;

        if !with_analysis {
            return Ok(Extraction::Parsed(SentenceTranslation {
                translation: text,
                analysis: None,
                word_by_word: Vec::new(),
            }));
        }

        Ok(extract(&text, JsonShape::Object))
    }

    pub async fn analyze_mistake(
        &self,
        question: &str,
        user_answer: &str,
        correct_answer: &str,
        learning: &Language,
        teaching: &Language,
    ) -> Result<Extraction<MistakeAnalysis>, GenerateError> {
        require(question, "question")?;
        require(user_answer, "answer")?;
        require(correct_answer, "correct answer")?;
        let text = self
            .ask(prompts::analyze_mistake(
                question,
                user_answer,
                correct_answer,
                learning,
                teaching,
            ))
            .await?;

        Ok(extract(&text, JsonShape::Object))
    }

    pub async fn generate_exercises(
        &self,
        kind: ExerciseKind,
        learning: &Language,
        level: Difficulty,
        topic: &str,
    ) -> Result<Extraction<Vec<Exercise>>, GenerateError> {
        require(topic, "topic")?;
        let text = self
            .ask(prompts::exercises(kind, learning, level, topic))
            .await?;

        Ok(match kind {
            ExerciseKind::Translation => {
                extract::<Vec<TranslationExercise>>(&text, JsonShape::Array)
                    .map(|list| list.into_iter().map(Exercise::Translation).collect())
            }
            ExerciseKind::FillInBlank => {
                extract::<Vec<FillInBlankExercise>>(&text, JsonShape::Array)
                    .map(|list| list.into_iter().map(Exercise::FillInBlank).collect())
            }
            ExerciseKind::MultipleChoice => {
                extract::<Vec<MultipleChoiceExercise>>(&text, JsonShape::Array)
                    .map(|list| list.into_iter().map(Exercise::MultipleChoice).collect())
            }
        })
    }
}
