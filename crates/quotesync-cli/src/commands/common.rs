use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quotesync_core::app::QuoteApp;
use quotesync_core::config::Settings;
use quotesync_core::persistence::FileSlot;
use quotesync_core::sync::{HttpQuoteSource, SyncOutcome, SyncService};
use quotesync_core::{QuoteRecord, QuoteStore, ResolvedConflict};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::CliError;
use crate::view::TerminalView;

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "quotesync";
const ENV_CONFIG_PATH: &str = "QUOTESYNC_CONFIG";

pub type CliApp = QuoteApp<Option<HttpQuoteSource>, TerminalView>;

/// Resolved settings and locations for one CLI invocation
#[derive(Debug, Clone)]
pub struct CliContext {
    pub settings: Settings,
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
}

impl CliContext {
    pub fn load(
        cli_config_path: Option<PathBuf>,
        cli_data_dir: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let config_path = resolve_config_path(cli_config_path);
        let settings = load_settings(&config_path)?;
        let data_dir = cli_data_dir.unwrap_or_else(|| settings.data_dir_or(default_data_dir));

        Ok(Self {
            settings,
            data_dir,
            config_path,
        })
    }

    pub fn open_store(&self) -> QuoteStore {
        QuoteStore::open(FileSlot::quotes(&self.data_dir), self.settings.seed_defaults)
    }

    pub fn remote_source(&self) -> Result<Option<HttpQuoteSource>, CliError> {
        Ok(HttpQuoteSource::from_settings(&self.settings)?)
    }

    pub fn build_app(&self, view: TerminalView) -> Result<CliApp, CliError> {
        let store = Arc::new(Mutex::new(self.open_store()));
        let sync = SyncService::new(store, self.remote_source()?)
            .with_fetch_timeout(self.settings.fetch_timeout());
        Ok(QuoteApp::new(sync, view))
    }
}

#[derive(Debug, Serialize)]
pub struct SyncSummaryItem<'a> {
    pub skipped: bool,
    pub added: usize,
    pub conflicts: usize,
    pub resolved: &'a [ResolvedConflict],
}

pub fn load_settings(config_path: &Path) -> Result<Settings, CliError> {
    let mut settings = Settings::load_from_path(config_path)?;
    settings.apply_env()?;
    Ok(settings)
}

pub fn resolve_config_path(cli_config_path: Option<PathBuf>) -> PathBuf {
    cli_config_path
        .or_else(|| env::var_os(ENV_CONFIG_PATH).map(PathBuf::from))
        .unwrap_or_else(default_config_path)
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

pub fn format_quote_lines(quotes: &[&QuoteRecord]) -> Vec<String> {
    quotes
        .iter()
        .map(|quote| {
            let preview = quote_preview(&quote.text, 60);
            format!("{:<16}  {:<14}  {preview}", quote.id, quote.category)
        })
        .collect()
}

pub fn quote_preview(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_sync_summary(outcome: &SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Completed(result) => format!(
            "Sync completed: {} added, {} {} resolved",
            result.added,
            result.conflicts,
            if result.conflicts == 1 {
                "conflict"
            } else {
                "conflicts"
            }
        ),
        SyncOutcome::Skipped => "Sync skipped: another sync is in progress".to_string(),
    }
}

pub fn format_conflict_lines(conflicts: &[ResolvedConflict]) -> Vec<String> {
    conflicts
        .iter()
        .map(|conflict| {
            format!(
                "lww  quote={}  local={}  incoming={}",
                conflict.quote_id, conflict.local_updated_at, conflict.incoming_updated_at
            )
        })
        .collect()
}

pub fn sync_summary_item(outcome: &SyncOutcome) -> SyncSummaryItem<'_> {
    match outcome {
        SyncOutcome::Completed(result) => SyncSummaryItem {
            skipped: false,
            added: result.added,
            conflicts: result.conflicts,
            resolved: &result.resolved,
        },
        SyncOutcome::Skipped => SyncSummaryItem {
            skipped: true,
            added: 0,
            conflicts: 0,
            resolved: &[],
        },
    }
}
