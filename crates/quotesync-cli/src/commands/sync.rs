use std::time::Duration;

use quotesync_core::sync::SyncOutcome;

use crate::commands::common::{
    format_conflict_lines, format_sync_summary, sync_summary_item, CliContext,
};
use crate::error::CliError;
use crate::view::TerminalView;

pub async fn run_sync(
    watch: bool,
    interval_secs: Option<u64>,
    as_json: bool,
    context: &CliContext,
) -> Result<SyncOutcome, CliError> {
    if context.settings.remote_url().is_none() {
        return Err(CliError::SyncNotConfigured);
    }

    // Outcomes are reported once, through `outcome_lines`, not through the view.
    let app = context.build_app(TerminalView::new())?;
    let sync = app.sync_service();

    if !watch {
        let outcome = sync.trigger_sync().await;
        if as_json {
            println!(
                "{}",
                serde_json::to_string_pretty(&sync_summary_item(&outcome))?
            );
        } else {
            print_outcome(&outcome);
        }
        return Ok(outcome);
    }

    let period = match interval_secs {
        Some(0) => {
            return Err(CliError::Config(
                "--interval must be greater than zero".to_string(),
            ))
        }
        Some(secs) => Duration::from_secs(secs),
        None => context.settings.sync_interval(),
    };

    println!("Syncing every {}s; press Ctrl-C to stop", period.as_secs());
    let shutdown = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {error}");
            std::future::pending::<()>().await;
        }
    };

    let mut last = SyncOutcome::Skipped;
    sync.run_every(period, shutdown, |outcome| {
        print_outcome(&outcome);
        last = outcome;
    })
    .await;

    println!("Sync stopped");
    Ok(last)
}

/// Summary line followed by one indented line per resolved conflict
pub fn outcome_lines(outcome: &SyncOutcome) -> Vec<String> {
    let mut lines = vec![format_sync_summary(outcome)];
    if let SyncOutcome::Completed(result) = outcome {
        lines.extend(
            format_conflict_lines(&result.resolved)
                .into_iter()
                .map(|line| format!("  {line}")),
        );
    }
    lines
}

fn print_outcome(outcome: &SyncOutcome) {
    for line in outcome_lines(outcome) {
        println!("{line}");
    }
}
