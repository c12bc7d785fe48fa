use lingo_core::{VocabularyLesson, Word};
use lingo_generator::{Extraction, LearningContent};
use lingo_types::{ContentKind, Language};

use crate::cli::TopicArgs;
use crate::state::{AppState, lookup_language};

fn print_raw(raw: &str) {
    tracing::warn!("Reply was not in the expected format, showing it as is");
    println!("{raw}");
}

pub async fn handle_lookup(
    state: &mut AppState,
    text: &str,
    language: Option<&str>,
    save: bool,
) -> anyhow::Result<()> {
    let language = state.learning_language(language)?;
    let teaching = state.user.teaching_language();
    let content = state.content()?;

    let details = content.word_details(text, language, teaching, teaching).await?;
    let pronunciation = match content.pronunciation(text, language).await {
        Ok(ipa) => Some(ipa),
        Err(e) => {
            tracing::warn!("No pronunciation for '{}': {}", text, e);
            None
        }
    };

    println!("{} {}", Language::flag(language.code), text.trim());
    if let Some(ipa) = &pronunciation {
        println!("  {ipa}");
    }
    println!("\n{}\n\n{}", details.translation, details.explanation);
    for (i, example) in details.examples.iter().enumerate() {
        println!("  {}. {}", i + 1, example);
    }

    if save {
        let word = Word::new(text.trim(), language.code)
            .with_translation(details.translation)
            .with_explanation(details.explanation)
            .with_examples(details.examples);
        state.save_word(word).await?;
        println!("\nSaved to word book");
    }
    Ok(())
}

pub async fn handle_learn(
    state: &mut AppState,
    topic: &TopicArgs,
    kind: ContentKind,
    save: bool,
) -> anyhow::Result<()> {
    let learning = state.learning_language(topic.language.as_deref())?;
    let teaching = state.user.teaching_language();
    let reply = state
        .content()?
        .learning_content(kind, learning, teaching, topic.level, &topic.topic)
        .await?;

    let content = match reply {
        Extraction::Parsed(content) => content,
        Extraction::Unparsed { raw } => {
            print_raw(&raw);
            return Ok(());
        }
    };

    match content {
        LearningContent::Vocabulary(entries) => {
            for entry in &entries {
                println!("{}  {}", entry.word, entry.translation);
                if let Some(example) = &entry.example {
                    println!("    {example}");
                }
            }
            if save {
                let count = entries.len();
                for entry in entries {
                    state.save_word(entry.into_word(learning.code)).await?;
                }
                println!("\nSaved {count} word(s)");
            }
        }
        LearningContent::Sentences(sentences) => {
            for sentence in sentences {
                println!("{}\n  {}", sentence.sentence, sentence.translation);
                if let Some(grammar) = sentence.grammar {
                    println!("  grammar: {grammar}");
                }
                if !sentence.vocabulary.is_empty() {
                    println!("  words: {}", sentence.vocabulary.join(", "));
                }
            }
        }
        LearningContent::Grammar(lesson) => {
            println!("{}\n\n{}", lesson.title, lesson.explanation);
            for example in &lesson.examples {
                println!("  - {example}");
            }
            if !lesson.mistakes.is_empty() {
                println!("\nCommon mistakes:");
                for mistake in &lesson.mistakes {
                    println!("  - {mistake}");
                }
            }
        }
    }
    Ok(())
}

pub async fn handle_lesson(
    state: &mut AppState,
    topic: &TopicArgs,
    count: usize,
) -> anyhow::Result<()> {
    let learning = state.learning_language(topic.language.as_deref())?;
    let teaching = state.user.teaching_language();
    let items = state
        .content()?
        .vocabulary_lesson(&topic.topic, learning, teaching, topic.level, count)
        .await?;

    let mut lesson = VocabularyLesson::new(
        topic.topic.trim(),
        format!("{} vocabulary: {}", learning.name, topic.topic.trim()),
        topic.topic.trim(),
        learning.code,
        topic.level,
    );
    for item in items {
        lesson.add_item(item);
    }

    println!("{} ({}, {})", lesson.title(), lesson.difficulty(), lesson.language_code());
    for item in lesson.items() {
        println!("  {}  {}", item.word, item.translation);
    }
    if lesson.item_count() == 0 {
        println!("  no words could be read from the reply");
    }
    state.lessons.add_lesson(lesson);
    Ok(())
}

pub async fn handle_translate(
    state: &mut AppState,
    sentence: &str,
    from: &str,
    to: Option<&str>,
    plain: bool,
) -> anyhow::Result<()> {
    let from = lookup_language(from)?;
    let to = match to {
        Some(code) => lookup_language(code)?,
        None => state.user.teaching_language(),
    };

    let reply = state
        .content()?
        .translate_sentence(sentence, from, to, !plain)
        .await?;
    let translation = match reply {
        Extraction::Parsed(translation) => translation,
        Extraction::Unparsed { raw } => {
            print_raw(&raw);
            return Ok(());
        }
    };

    println!("{}", translation.translation);
    if let Some(analysis) = &translation.analysis {
        println!("\n{analysis}");
    }
    if !translation.word_by_word.is_empty() {
        println!();
        for gloss in &translation.word_by_word {
            println!("  {} = {}", gloss.word, gloss.translation);
        }
    }
    Ok(())
}

pub async fn handle_tutor(
    state: &mut AppState,
    message: &str,
    language: Option<&str>,
) -> anyhow::Result<()> {
    let learning = state.learning_language(language)?;
    let reply = state
        .content()?
        .chat_with_tutor(message, learning, state.user.teaching_language())
        .await?;
    println!("{reply}");
    Ok(())
}
