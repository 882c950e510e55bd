use quotesync_core::app::QuoteView;

use crate::commands::common::CliContext;
use crate::error::CliError;
use crate::view::TerminalView;

pub fn run_categories(as_json: bool, context: &CliContext) -> Result<(), CliError> {
    let categories = context.open_store().categories();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        TerminalView::with_categories().render_categories(&categories);
    }
    Ok(())
}
