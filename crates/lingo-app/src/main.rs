use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use lingo_config::Config;
use lingo_store::{AuthProvider, FirebaseAuth, FirestoreStore, UserService};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod profile;
mod state;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Cmd};
use self::state::{AppState, build_generator};

const DEFAULT_FILTER: &str = "warn,lingo=info";

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::new();
    let content = build_generator(&config, cli.model.as_deref())?;

    if let Cmd::Signup = cli.cmd {
        return signup(&config, &cli).await;
    }

    let mut state = match cli.credentials() {
        Some((email, password)) => AppState::signed_in(config, content, email, password).await?,
        None => AppState::local(config, content)?,
    };

    let result = commands::dispatch(&mut state, cli.cmd).await;
    state.sign_out().await;
    result
}

async fn signup(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    let Some((email, password)) = cli.credentials() else {
        anyhow::bail!("signup needs --email and --password");
    };
    if !config.firebase.enabled() {
        anyhow::bail!("Account mode needs FIREBASE_API_KEY and FIREBASE_PROJECT_ID");
    }

    let auth = FirebaseAuth::new(&config.firebase);
    let account = auth.sign_up(email, password).await?;
    let users = UserService::new(Arc::new(FirestoreStore::new(
        &config.firebase,
        account.id_token.clone(),
    )));
    let user = profile::load_account_profile(&users, &account).await?;

    println!("Created account {} ({})", account.email, user.id());
    auth.logout().await?;
    Ok(())
}
