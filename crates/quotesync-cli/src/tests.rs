use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use quotesync_core::config::Settings;
use quotesync_core::persistence::FileSlot;
use quotesync_core::sync::SyncOutcome;
use quotesync_core::{QuoteId, QuoteRecord, QuoteStore, ReconcileResult, ResolvedConflict};
use tempfile::tempdir;

use crate::cli::CompletionShell;
use crate::commands::add::run_add;
use crate::commands::clear::run_clear;
use crate::commands::common::{
    format_conflict_lines, format_quote_lines, format_sync_summary, quote_preview,
    resolve_config_path, sync_summary_item, CliContext,
};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config_init;
use crate::commands::export::run_export;
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::sync::{outcome_lines, run_sync};
use crate::error::CliError;
use crate::view::{format_conflict_notice, format_quote};

fn offline_context(root: &Path) -> CliContext {
    CliContext {
        settings: Settings {
            remote_url: None,
            seed_defaults: false,
            ..Settings::default()
        },
        data_dir: root.join("data"),
        config_path: root.join("config.json"),
    }
}

fn stored_quotes(context: &CliContext) -> Vec<QuoteRecord> {
    QuoteStore::open(FileSlot::quotes(&context.data_dir), false)
        .quotes()
        .to_vec()
}

#[test]
fn quote_preview_truncates_with_ellipsis() {
    let preview = quote_preview("This is a very long sentence that should be shortened", 20);
    assert_eq!(preview, "This is a very lo...");
    assert_eq!(quote_preview("  short \n text ", 20), "short text");
}

#[test]
fn format_quote_lines_include_id_and_category() {
    let quote = QuoteRecord::with_id(42, "Stay hungry", "inspiration", 1);
    let lines = format_quote_lines(&[&quote]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("42"));
    assert!(lines[0].contains("inspiration"));
    assert!(lines[0].ends_with("Stay hungry"));
}

#[test]
fn format_sync_summary_pluralizes_conflicts() {
    let one = SyncOutcome::Completed(ReconcileResult {
        conflicts: 1,
        added: 2,
        ..ReconcileResult::default()
    });
    assert_eq!(
        format_sync_summary(&one),
        "Sync completed: 2 added, 1 conflict resolved"
    );
    assert_eq!(
        format_sync_summary(&SyncOutcome::Completed(ReconcileResult::default())),
        "Sync completed: 0 added, 0 conflicts resolved"
    );
    assert!(format_sync_summary(&SyncOutcome::Skipped).contains("skipped"));
}

#[test]
fn format_conflict_lines_include_key_fields() {
    let lines = format_conflict_lines(&[ResolvedConflict {
        quote_id: QuoteId::new(7),
        local_updated_at: 100,
        incoming_updated_at: 200,
    }]);
    assert_eq!(lines, vec!["lww  quote=7  local=100  incoming=200".to_string()]);
}

#[test]
fn outcome_lines_report_each_conflict_once() {
    let conflict = ResolvedConflict {
        quote_id: QuoteId::new(7),
        local_updated_at: 100,
        incoming_updated_at: 200,
    };
    let outcome = SyncOutcome::Completed(ReconcileResult {
        conflicts: 1,
        resolved: vec![conflict],
        ..ReconcileResult::default()
    });

    let lines = outcome_lines(&outcome);

    assert_eq!(
        lines,
        vec![
            "Sync completed: 0 added, 1 conflict resolved".to_string(),
            "  lww  quote=7  local=100  incoming=200".to_string(),
        ]
    );
    assert_eq!(outcome_lines(&SyncOutcome::Skipped).len(), 1);
}

#[test]
fn sync_summary_item_serializes_outcome() {
    let json = serde_json::to_value(sync_summary_item(&SyncOutcome::Skipped)).unwrap();
    assert_eq!(json["skipped"], serde_json::Value::Bool(true));
    assert_eq!(json["resolved"], serde_json::json!([]));
}

#[test]
fn terminal_formatting_helpers() {
    let quote = QuoteRecord::with_id(1, "Hello", "greeting", 1);
    assert_eq!(format_quote(&quote), "\"Hello\"\n    (greeting)");
    assert!(format_conflict_notice(1).starts_with("1 local quote was"));
    assert!(format_conflict_notice(3).starts_with("3 local quotes were"));
}

#[test]
fn resolve_config_path_prefers_explicit_path() {
    let explicit = PathBuf::from("/tmp/quotesync-test/config.json");
    assert_eq!(resolve_config_path(Some(explicit.clone())), explicit);
}

#[test]
fn context_uses_explicit_data_dir() {
    let dir = tempdir().unwrap();
    let context = CliContext::load(
        Some(dir.path().join("missing-config.json")),
        Some(dir.path().join("quotes")),
    )
    .unwrap();
    assert_eq!(context.data_dir, dir.path().join("quotes"));
}

#[tokio::test]
async fn run_add_persists_quote() {
    let dir = tempdir().unwrap();
    let context = offline_context(dir.path());

    run_add(
        &["Stay".to_string(), "hungry".to_string()],
        "inspiration",
        false,
        &context,
    )
    .await
    .unwrap();

    let quotes = stored_quotes(&context);
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].text, "Stay hungry");
    assert_eq!(quotes[0].category, "inspiration");
}

#[tokio::test]
async fn run_add_rejects_blank_category() {
    let dir = tempdir().unwrap();
    let context = offline_context(dir.path());

    let error = run_add(&["Text".to_string()], "  ", false, &context)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        CliError::Core(quotesync_core::Error::Validation(_))
    ));
    assert!(stored_quotes(&context).is_empty());
}

#[tokio::test]
async fn run_add_push_requires_remote() {
    let dir = tempdir().unwrap();
    let context = offline_context(dir.path());

    let error = run_add(&["Text".to_string()], "cat", true, &context)
        .await
        .unwrap_err();
    assert!(matches!(error, CliError::SyncNotConfigured));
}

#[tokio::test]
async fn run_sync_requires_remote_configuration() {
    let dir = tempdir().unwrap();
    let context = offline_context(dir.path());

    let error = run_sync(false, None, false, &context).await.unwrap_err();
    assert!(matches!(error, CliError::SyncNotConfigured));
}

#[tokio::test]
async fn run_sync_with_unreachable_remote_leaves_store_unchanged() {
    let dir = tempdir().unwrap();
    let mut context = offline_context(dir.path());
    context.settings.remote_url = Some("http://127.0.0.1:9/posts".to_string());
    context.settings.fetch_timeout_secs = 2;

    run_add(&["Keep me".to_string()], "local", false, &context)
        .await
        .unwrap();
    let before = stored_quotes(&context);

    let outcome = run_sync(false, None, false, &context).await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Completed(ref result) if !result.has_changes()));
    assert_eq!(stored_quotes(&context), before);
}

#[test]
fn run_export_then_import_round_trips_into_new_store() {
    let dir = tempdir().unwrap();
    let source = offline_context(&dir.path().join("source"));
    let target = offline_context(&dir.path().join("target"));

    let mut store = source.open_store();
    store.add("Exported", "transfer").unwrap();
    drop(store);

    let export_path = dir.path().join("export.json");
    let written = run_export(Some(&export_path), &source).unwrap();
    assert_eq!(written.as_deref(), Some(export_path.as_path()));

    let exported = std::fs::read_to_string(&export_path).unwrap();
    assert!(exported.contains("\"text\": \"Exported\""));

    let imported = run_import(&export_path, &target).unwrap();
    assert_eq!(imported, 1);
    assert_eq!(stored_quotes(&target), stored_quotes(&source));
}

#[test]
fn run_export_into_directory_uses_timestamped_name() {
    let dir = tempdir().unwrap();
    let context = offline_context(dir.path());
    context.open_store().add("Kept", "dir").unwrap();

    let written = run_export(Some(dir.path()), &context).unwrap().unwrap();

    assert_eq!(written.parent(), Some(dir.path()));
    let name = written.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("quotes-export-"));
    assert!(name.ends_with(".json"));
    assert!(std::fs::read_to_string(&written).unwrap().contains("\"Kept\""));
}

#[test]
fn run_import_rejects_malformed_file_wholesale() {
    let dir = tempdir().unwrap();
    let context = offline_context(dir.path());
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"[{"text":"ok","category":"c"},{"text":"Z"}]"#).unwrap();

    let error = run_import(&path, &context).unwrap_err();

    assert!(matches!(
        error,
        CliError::Core(quotesync_core::Error::Validation(_))
    ));
    assert!(stored_quotes(&context).is_empty());
}

#[test]
fn run_list_and_clear() {
    let dir = tempdir().unwrap();
    let mut context = offline_context(dir.path());
    context.settings.seed_defaults = true;

    run_list(Some("life"), false, &context).unwrap();
    context.open_store().persist();
    assert_eq!(stored_quotes(&context).len(), 5);

    run_clear(&context).unwrap();
    assert!(!FileSlot::quotes(&context.data_dir).path().exists());
}

#[test]
fn run_config_init_refuses_to_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    run_config_init(&path, None, true, false).unwrap();
    let written = Settings::load_from_path(&path).unwrap();
    assert_eq!(written.remote_url, None);

    let error = run_config_init(&path, None, false, false).unwrap_err();
    assert!(matches!(error, CliError::ConfigExists(_)));

    run_config_init(
        &path,
        Some("http://localhost:3000/quotes".to_string()),
        false,
        true,
    )
    .unwrap();
    let rewritten = Settings::load_from_path(&path).unwrap();
    assert_eq!(
        rewritten.remote_url.as_deref(),
        Some("http://localhost:3000/quotes")
    );
}

#[test]
fn run_config_init_rejects_invalid_url() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let error = run_config_init(&path, Some("localhost".to_string()), false, false).unwrap_err();
    assert!(matches!(
        error,
        CliError::Core(quotesync_core::Error::Config(_))
    ));
    assert!(!path.exists());
}

#[test]
fn run_completions_writes_bash_script_file() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("quotesync.bash");

    run_completions(CompletionShell::Bash, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("_quotesync()"));
    assert!(script.contains("complete -F _quotesync"));
}
