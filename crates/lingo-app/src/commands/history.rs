use lingo_types::HistoryKind;

use crate::cli::HistoryCmd;
use crate::state::AppState;

pub async fn handle_history(state: &mut AppState, action: HistoryCmd) -> anyhow::Result<()> {
    let user_id = state.user.id().to_string();
    match action {
        HistoryCmd::List => {
            let entries = state.users.get_history(&user_id).await?;
            if entries.is_empty() {
                println!("No practice history");
                return Ok(());
            }
            for stored in &entries {
                let entry = &stored.data;
                let mark = match entry.kind {
                    HistoryKind::Practice => "ok",
                    HistoryKind::Mistake => "x ",
                };
                println!(
                    "{} {}  {}  [{}]",
                    mark,
                    entry.created_at.format("%Y-%m-%d %H:%M"),
                    entry.question,
                    stored.id
                );
                if !entry.is_correct {
                    println!("     you: {}  correct: {}", entry.user_answer, entry.correct_answer);
                }
            }
            let correct = entries.iter().filter(|e| e.data.is_correct).count();
            println!("{}/{} correct", correct, entries.len());
        }
        HistoryCmd::Remove { id } => {
            state.users.delete_history_item(&user_id, &id).await?;
            println!("Removed {id}");
        }
    }
    Ok(())
}
