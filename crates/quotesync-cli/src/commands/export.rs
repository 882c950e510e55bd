use std::path::{Path, PathBuf};

use quotesync_core::transfer::suggested_export_file_name;
use quotesync_core::util::unix_timestamp_ms;

use crate::commands::common::CliContext;
use crate::error::CliError;

/// Write the export to `output_path`, or stdout when omitted.
///
/// A directory gets a timestamped file name inside it. Returns the written path.
pub fn run_export(
    output_path: Option<&Path>,
    context: &CliContext,
) -> Result<Option<PathBuf>, CliError> {
    let rendered = context.open_store().export_json()?;

    let Some(path) = output_path else {
        println!("{rendered}");
        return Ok(None);
    };

    let target = if path.is_dir() {
        path.join(suggested_export_file_name(unix_timestamp_ms()))
    } else {
        path.to_path_buf()
    };
    std::fs::write(&target, rendered)?;
    println!("{}", target.display());

    Ok(Some(target))
}
