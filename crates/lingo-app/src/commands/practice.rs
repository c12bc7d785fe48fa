use lingo_core::{HistoryEntry, MistakeAnalysis};
use lingo_generator::{ContentGenerator, Exercise, Extraction};
use lingo_types::{ExerciseKind, Language};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::TopicArgs;
use crate::state::AppState;

/// A graded answer and the history entry describing it
#[derive(Debug)]
pub struct Outcome {
    pub correct: bool,
    pub entry: HistoryEntry,
}

/// Grade `answer`; wrong answers get an analysis when the generator can produce one
pub async fn check_answer(
    content: &ContentGenerator,
    exercise: &Exercise,
    answer: &str,
    learning: &Language,
    teaching: &Language,
) -> Outcome {
    let expected = exercise.expected_answer();
    if exercise.is_correct(answer) {
        let mut entry = HistoryEntry::practice(exercise.prompt(), answer.trim());
        entry.correct_answer = expected.to_string();
        return Outcome {
            correct: true,
            entry,
        };
    }

    let analysis = match content
        .analyze_mistake(exercise.prompt(), answer, expected, learning, teaching)
        .await
    {
        Ok(Extraction::Parsed(analysis)) => Some(analysis),
        Ok(Extraction::Unparsed { raw }) => Some(MistakeAnalysis {
            analysis: raw,
            ..Default::default()
        }),
        Err(e) => {
            tracing::warn!("Mistake analysis failed: {e}");
            None
        }
    };

    Outcome {
        correct: false,
        entry: HistoryEntry::mistake(exercise.prompt(), answer.trim(), expected, analysis),
    }
}

fn print_exercise(index: usize, total: usize, exercise: &Exercise) {
    println!("\n[{}/{}] {}", index + 1, total, exercise.prompt());
    for option in exercise.options() {
        println!("    {option}");
    }
    if let Some(hint) = exercise.hint() {
        println!("    hint: {hint}");
    }
}

fn print_analysis(analysis: &MistakeAnalysis) {
    if !analysis.analysis.is_empty() {
        println!("  {}", analysis.analysis);
    }
    for issue in analysis.grammar_issues.iter().chain(&analysis.vocabulary_issues) {
        println!("  - {issue}");
    }
    if !analysis.suggestions.is_empty() {
        println!("  tip: {}", analysis.suggestions);
    }
}

pub async fn handle_practice(
    state: &mut AppState,
    topic: &TopicArgs,
    kind: ExerciseKind,
) -> anyhow::Result<()> {
    let learning = state.learning_language(topic.language.as_deref())?;
    let teaching = state.user.teaching_language();
    let content = state.content()?;

    let exercises = match content
        .generate_exercises(kind, learning, topic.level, &topic.topic)
        .await?
    {
        Extraction::Parsed(exercises) if !exercises.is_empty() => exercises,
        Extraction::Parsed(_) => anyhow::bail!("No exercises were generated"),
        Extraction::Unparsed { raw } => {
            tracing::debug!("Unusable exercise reply: {raw}");
            anyhow::bail!("Exercises could not be read from the reply, try again");
        }
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let total = exercises.len();
    let mut score = 0;

    for (index, exercise) in exercises.iter().enumerate() {
        print_exercise(index, total, exercise);
        let Some(answer) = lines.next_line().await? else {
            break;
        };
        if answer.trim().is_empty() {
            println!("  skipped, answer: {}", exercise.expected_answer());
            continue;
        }

        let outcome = check_answer(content, exercise, &answer, learning, teaching).await;
        if outcome.correct {
            score += 1;
            println!("  correct");
        } else {
            println!("  wrong, answer: {}", exercise.expected_answer());
            if let Some(analysis) = &outcome.entry.analysis {
                print_analysis(analysis);
            }
        }
        if let Some(explanation) = exercise.explanation() {
            println!("  {explanation}");
        }

        if let Err(e) = state.users.add_history(state.user.id(), &outcome.entry).await {
            tracing::warn!("Could not record history: {e}");
        }
    }

    println!("\nScore: {score}/{total}");
    Ok(())
}
