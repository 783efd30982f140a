use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linctl::cli::{self, Cli, Output};
use linctl::client::{ClientError, Entity, ErrorKind};
use linctl::{ClientConfig, LinearClient};

/// Initialize tracing on stderr so stdout stays clean for command output.
fn init_tracing(verbose: bool) {
    let default = if verbose { "linctl=debug" } else { "linctl=warn" };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Ask on stderr, read a y/N answer from stdin.
fn prompt(question: &str) -> anyhow::Result<bool> {
    eprint!("{} [y/N] ", question);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Suggest a follow-up command for common lookup failures.
fn hint(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<ClientError>()?.kind()? {
        ErrorKind::NotFound(Entity::Project) => Some("run 'linctl project list' to see projects"),
        ErrorKind::NotFound(Entity::Team) => Some("run 'linctl team list' to see team keys"),
        ErrorKind::NotFound(Entity::User) => Some("run 'linctl user list' to see users"),
        ErrorKind::AuthFailure => Some("check LINCTL_API_KEY or the api_key in your config file"),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ClientConfig::load()?;
    let client = LinearClient::from_config(&config)?;
    let mut out = Output::new(io::stdout().lock(), cli.json);

    if let Err(err) = cli::run(cli.command, &client, &mut out, &mut prompt).await {
        if let Some(hint) = hint(&err) {
            eprintln!("hint: {}", hint);
        }
        return Err(err);
    }

    Ok(())
}
