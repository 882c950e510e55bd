use quotesync_core::CategoryFilter;

use crate::commands::common::CliContext;
use crate::error::CliError;
use crate::view::TerminalView;

pub async fn run_random(category: Option<&str>, context: &CliContext) -> Result<(), CliError> {
    let app = context
        .build_app(TerminalView::new())?
        .with_filter(CategoryFilter::from_option(category));
    app.start().await;
    Ok(())
}
