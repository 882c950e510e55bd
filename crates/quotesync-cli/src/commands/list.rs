use quotesync_core::CategoryFilter;

use crate::commands::common::{format_quote_lines, CliContext};
use crate::error::CliError;
use crate::view::EMPTY_CATEGORY_MESSAGE;

pub fn run_list(
    category: Option<&str>,
    as_json: bool,
    context: &CliContext,
) -> Result<(), CliError> {
    let store = context.open_store();
    let quotes = store.filtered(&CategoryFilter::from_option(category));

    if as_json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
        return Ok(());
    }

    if quotes.is_empty() {
        println!("{EMPTY_CATEGORY_MESSAGE}");
        return Ok(());
    }

    for line in format_quote_lines(&quotes) {
        println!("{line}");
    }
    Ok(())
}
