use lingo_core::User;
use lingo_types::Language;

use crate::cli::ProfileCmd;
use crate::state::{AppState, lookup_language};

fn describe(language: &Language) -> String {
    format!("{} {} ({})", Language::flag(language.code), language.name, language.native_name)
}

fn print_profile(user: &User, signed_in_as: Option<&str>) {
    println!("{} [{}]", user.name(), user.id());
    if let Some(email) = signed_in_as {
        println!("  account:  {email}");
    }
    println!("  teaching: {}", describe(user.teaching_language()));
    let learning = user.learning_languages();
    if learning.is_empty() {
        println!("  learning: -");
    }
    for language in learning {
        println!("  learning: {}", describe(language));
    }
    println!("  since:    {}", user.created_at().format("%Y-%m-%d"));
}

pub async fn handle_profile(state: &mut AppState, action: ProfileCmd) -> anyhow::Result<()> {
    match action {
        ProfileCmd::Show => {
            let email = state.account.as_ref().map(|a| a.email.as_str());
            print_profile(&state.user, email);
            return Ok(());
        }
        ProfileCmd::SetTeaching { code } => {
            let language = lookup_language(&code)?;
            state.user.set_teaching_language(language);
            println!("Explanations will be in {}", Language::display_name(language.code));
        }
        ProfileCmd::AddLearning { code } => {
            let language = lookup_language(&code)?;
            state.user.add_learning_language(language);
            println!("Learning {}", describe(language));
        }
        ProfileCmd::RemoveLearning { code } => {
            if !state.user.remove_learning_language(code.trim()) {
                println!("Not learning '{code}'");
                return Ok(());
            }
            println!("Stopped learning {}", Language::display_name(code.trim()));
        }
        ProfileCmd::Rename { name } => {
            if name.trim().is_empty() {
                anyhow::bail!("Name cannot be empty");
            }
            state.user.set_name(name.trim());
        }
    }

    state.save_profile().await?;
    tracing::info!("Profile {} saved", state.user.id());
    Ok(())
}
