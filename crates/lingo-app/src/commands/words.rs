use lingo_core::Word;
use lingo_types::Language;

use crate::cli::WordsCmd;
use crate::state::AppState;

fn print_word(word: &Word) {
    let translation = match word.translation() {
        "" => "-",
        t => t,
    };
    println!(
        "{} {}  {}  [{}] reviewed {}x",
        Language::flag(word.language_code()),
        word.text(),
        translation,
        word.id(),
        word.review_count()
    );
}

fn print_words(words: &[Word]) {
    if words.is_empty() {
        println!("No words");
        return;
    }
    for word in words {
        print_word(word);
    }
}

pub async fn handle_words(state: &mut AppState, action: WordsCmd) -> anyhow::Result<()> {
    match action {
        WordsCmd::Add {
            text,
            language,
            translation,
            explanation,
            examples,
        } => {
            let text = text.trim();
            if text.is_empty() {
                anyhow::bail!("Word cannot be empty");
            }
            let code = match language {
                Some(code) => {
                    if Language::find_by_code(&code).is_none() {
                        tracing::warn!("Unknown language code '{}', saving as is", code);
                    }
                    code
                }
                None => state.learning_language(None)?.code.to_string(),
            };

            let mut word = Word::new(text, code).with_examples(examples);
            if let Some(translation) = translation {
                word.set_translation(translation);
            }
            if let Some(explanation) = explanation {
                word.set_explanation(explanation);
            }
            let id = word.id().to_string();
            state.save_word(word).await?;
            println!("Saved '{text}' [{id}]");
        }
        WordsCmd::List { language, remote } => {
            if remote {
                let Some(account) = &state.account else {
                    anyhow::bail!("--remote needs --email and --password");
                };
                let entries = state.users.get_word_book(&account.uid).await?;
                if entries.is_empty() {
                    println!("No words");
                }
                for entry in entries
                    .iter()
                    .filter(|e| language.as_deref().is_none_or(|code| e.data.language == code))
                {
                    println!(
                        "{} {}  {}  [{}]",
                        Language::flag(&entry.data.language),
                        entry.data.word,
                        entry.data.translation,
                        entry.id
                    );
                }
                return Ok(());
            }

            let words = match language {
                Some(code) => state.word_book.words_by_language(&code),
                None => state.word_book.all_words(),
            };
            print_words(&words);
            println!("{} word(s) in total", state.word_book.total_word_count());
        }
        WordsCmd::Search { query } => print_words(&state.word_book.search_words(&query)),
        WordsCmd::Recent { limit } => print_words(&state.word_book.recent_words(limit)),
        WordsCmd::Review => {
            let due = state.word_book.words_needing_review();
            print_words(&due);
        }
        WordsCmd::Mark { id } => {
            if !state.word_book.mark_reviewed(&id)? {
                anyhow::bail!("No word with id {id}");
            }
            if let Some(word) = state.word_book.get_word(&id) {
                println!("'{}' reviewed {} time(s)", word.text(), word.review_count());
            }
        }
        WordsCmd::Remove { id } => {
            if state.word_book.remove_word(&id)? {
                println!("Removed {id}");
                return Ok(());
            }
            // Ids from `list --remote` belong to the account word book
            let Some(account) = &state.account else {
                anyhow::bail!("No word with id {id}");
            };
            state.users.delete_word_from_word_book(&account.uid, &id).await?;
            println!("Removed {id} from the account word book");
        }
        WordsCmd::Clear => {
            let count = state.word_book.total_word_count();
            state.word_book.clear()?;
            println!("Removed {count} word(s)");
        }
    }
    Ok(())
}
