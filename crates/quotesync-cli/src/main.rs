//! quotesync CLI - keep a local quote collection in sync from the terminal

mod cli;
mod commands;
mod error;
mod view;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::categories::run_categories;
use crate::commands::clear::run_clear;
use crate::commands::common::CliContext;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::export::run_export;
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::random::run_random;
use crate::commands::sync::run_sync;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "quotesync_core=info,quotesync_cli=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { command }) => run_config(command, cli.config, cli.data_dir)?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        command => {
            let context = CliContext::load(cli.config, cli.data_dir)?;
            tracing::debug!(
                "Using data dir {} and config {}",
                context.data_dir.display(),
                context.config_path.display()
            );
            dispatch(command, &context).await?;
        }
    }

    Ok(())
}

async fn dispatch(command: Option<Commands>, context: &CliContext) -> Result<(), CliError> {
    match command {
        Some(Commands::Add {
            text,
            category,
            push,
        }) => run_add(&text, &category, push, context).await?,
        Some(Commands::Random { category }) => run_random(category.as_deref(), context).await?,
        Some(Commands::List { category, json }) => run_list(category.as_deref(), json, context)?,
        Some(Commands::Categories { json }) => run_categories(json, context)?,
        Some(Commands::Sync {
            watch,
            interval,
            json,
        }) => {
            run_sync(watch, interval, json, context).await?;
        }
        Some(Commands::Export { output }) => {
            run_export(output.as_deref(), context)?;
        }
        Some(Commands::Import { path }) => {
            run_import(&path, context)?;
        }
        Some(Commands::Clear) => run_clear(context)?,
        // Handled before the context is loaded.
        Some(Commands::Config { .. } | Commands::Completions { .. }) => {}
        None => run_random(None, context).await?,
    }

    Ok(())
}
