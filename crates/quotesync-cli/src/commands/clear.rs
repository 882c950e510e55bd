use crate::commands::common::CliContext;
use crate::error::CliError;

pub fn run_clear(context: &CliContext) -> Result<(), CliError> {
    let mut store = context.open_store();
    let removed = store.len();
    store.clear()?;

    println!("Removed {removed} quotes");
    Ok(())
}
