use crate::cli::Cmd;
use crate::state::AppState;

pub mod generate;
pub mod history;
pub mod practice;
pub mod profile;
pub mod words;

use generate::{handle_learn, handle_lesson, handle_lookup, handle_translate, handle_tutor};
use history::handle_history;
use practice::handle_practice;
use profile::handle_profile;
use words::handle_words;

/// Run one command against the loaded state
pub async fn dispatch(state: &mut AppState, cmd: Cmd) -> anyhow::Result<()> {
    match cmd {
        Cmd::Profile { action } => handle_profile(state, action).await,
        Cmd::Words { action } => handle_words(state, action).await,
        Cmd::Lookup {
            word,
            language,
            save,
        } => handle_lookup(state, &word, language.as_deref(), save).await,
        Cmd::Learn { topic, kind, save } => handle_learn(state, &topic, kind, save).await,
        Cmd::Lesson { topic, count } => handle_lesson(state, &topic, count).await,
        Cmd::Translate {
            sentence,
            from,
            to,
            plain,
        } => handle_translate(state, &sentence, &from, to.as_deref(), plain).await,
        Cmd::Practice { topic, kind } => handle_practice(state, &topic, kind).await,
        Cmd::History { action } => handle_history(state, action).await,
        Cmd::Tutor { message, language } => {
            handle_tutor(state, &message, language.as_deref()).await
        }
        Cmd::Signup => anyhow::bail!("signup is handled before state is loaded"),
    }
}
