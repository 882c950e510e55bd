use std::path::{Path, PathBuf};

use quotesync_core::config::Settings;
use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::commands::common::{resolve_config_path, CliContext};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct EffectiveConfig<'a> {
    config_path: String,
    data_dir: String,
    settings: &'a Settings,
}

pub fn run_config(
    command: ConfigCommands,
    cli_config_path: Option<PathBuf>,
    cli_data_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            remote_url,
            no_remote,
            force,
        } => run_config_init(
            &resolve_config_path(cli_config_path),
            remote_url,
            no_remote,
            force,
        ),
        ConfigCommands::Show => {
            let context = CliContext::load(cli_config_path, cli_data_dir)?;
            run_config_show(&context)
        }
    }
}

pub fn run_config_init(
    config_path: &Path,
    remote_url: Option<String>,
    no_remote: bool,
    force: bool,
) -> Result<(), CliError> {
    if config_path.exists() && !force {
        return Err(CliError::ConfigExists(config_path.to_path_buf()));
    }

    let mut settings = Settings::default();
    if no_remote {
        settings.remote_url = None;
    } else if let Some(url) = remote_url {
        settings.remote_url = Some(url);
    }

    settings.save_to_path(config_path)?;
    println!("{}", config_path.display());
    Ok(())
}

pub fn run_config_show(context: &CliContext) -> Result<(), CliError> {
    let effective = EffectiveConfig {
        config_path: context.config_path.display().to_string(),
        data_dir: context.data_dir.display().to_string(),
        settings: &context.settings,
    };

    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}
