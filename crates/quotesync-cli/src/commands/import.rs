use std::path::Path;

use crate::commands::common::CliContext;
use crate::error::CliError;

pub fn run_import(path: &Path, context: &CliContext) -> Result<usize, CliError> {
    let payload = std::fs::read_to_string(path)?;
    let mut store = context.open_store();
    let count = store.import(&payload)?;

    println!("Imported {count} quotes from {}", path.display());
    Ok(count)
}
